use std::{env, fs, path::Path, process::exit};

use anyhow::{Context as _, Result};

use hack_asm::{compile, read_and_format};

fn output_path(input: &str) -> Result<std::path::PathBuf> {
    let stem = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .context("could not determine file stem")?;
    let parent = Path::new(input).parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(format!("{stem}.hack")))
}

/// Usage: `cargo run -p hack-asm -- sample.asm` writes `sample.hack`.
fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(fname) = args.get(1) else {
        eprintln!("asm file is not given\n\nUsage: cargo run -p hack-asm -- <asm filename>");
        exit(0);
    };

    let program = read_and_format(fname)?;
    let binary = compile(&program)?;

    let out = output_path(fname)?;
    fs::write(&out, binary.join("\n") + "\n")
        .with_context(|| format!("could not write {}", out.display()))?;

    println!("Wrote {}", out.display());

    Ok(())
}
