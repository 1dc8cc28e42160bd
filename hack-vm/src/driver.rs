//! Filesystem discovery and output-path policy for the VM translator CLI.
//!
//! Kept separate from `main.rs` so the directory-vs-single-file policy and
//! the bootstrap-detection rule are independently testable (spec.md §6).
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use crate::{codegen::CodeGenerator, extract_vm_name, is_vm_file, read_vm_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    SingleFile,
    Directory,
}

pub struct Inputs {
    pub mode: InputMode,
    pub file_paths: Vec<PathBuf>,
}

/// Collects `.vm` file paths for `path`, sorted lexicographically so the
/// emitted assembly is a pure function of the input set (spec.md §5).
pub fn collect_file_paths<P: AsRef<Path>>(path: P) -> Result<Inputs> {
    let path = path.as_ref();

    if !path.exists() {
        bail!("Could not read {}", path.display());
    }

    let (mode, mut file_paths) = if path.is_dir() {
        let mut paths = Vec::new();
        for entry in path.read_dir()?.filter_map(|p| p.map(|p| p.path()).ok()) {
            if is_vm_file(&entry) {
                paths.push(entry);
            }
        }
        if paths.is_empty() {
            bail!("No .vm files found in directory: {}", path.display());
        }
        (InputMode::Directory, paths)
    } else if is_vm_file(path) {
        (InputMode::SingleFile, vec![path.to_path_buf()])
    } else {
        bail!("Input must be a .vm file or a directory containing .vm files");
    };

    file_paths.sort();
    Ok(Inputs { mode, file_paths })
}

/// Output file name for the given input path and mode, relative to the
/// current working directory (matching the original script's behavior of
/// deriving the output name from a bare basename in both modes).
pub fn output_file_name(input: &Path, mode: InputMode) -> Result<PathBuf> {
    match mode {
        InputMode::Directory => {
            let dir_name = input
                .file_name()
                .and_then(|n| n.to_str())
                .context("could not determine directory name")?;
            Ok(PathBuf::from(format!("{dir_name}.asm")))
        }
        InputMode::SingleFile => {
            let stem = extract_vm_name(input)?;
            Ok(PathBuf::from(format!("{stem}.asm")))
        }
    }
}

/// Whether bootstrap should be emitted: only in directory mode, and only
/// when one of the collected files is literally named `Sys.vm` (spec.md
/// §4.6/§6 — a filename test, not a scan for a `Sys.init` definition).
pub fn needs_bootstrap(mode: InputMode, file_paths: &[PathBuf]) -> bool {
    mode == InputMode::Directory
        && file_paths
            .iter()
            .any(|p| p.file_name().and_then(|n| n.to_str()) == Some("Sys.vm"))
}

/// Translates every `.vm` file reachable from `input` into a single
/// assembly unit and writes it to the returned output path.
pub fn translate(input: &Path) -> Result<PathBuf> {
    let inputs = collect_file_paths(input).context("could not retrieve given vm files")?;
    let bootstrap = needs_bootstrap(inputs.mode, &inputs.file_paths);

    let mut sources = Vec::new();
    for path in &inputs.file_paths {
        let name = extract_vm_name(path)?;
        let vm = read_vm_file(path)
            .with_context(|| format!("could not load vm file {}", path.display()))?;
        sources.push((name, vm));
    }

    let mut parsed = Vec::new();
    for (name, program) in &sources {
        let (instructions, errors) = crate::parser::parse(program);
        if !errors.is_empty() {
            bail!("failed to parse {name}: {errors:?}");
        }
        parsed.push((*name, instructions));
    }

    let output_path = output_file_name(input, inputs.mode)?;
    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("could not create {}", output_path.display()))?;
    let mut writer = std::io::BufWriter::new(file);

    let mut generator = CodeGenerator::new(&mut writer);
    generator.translate_unit(&parsed, bootstrap)?;

    Ok(output_path)
}
