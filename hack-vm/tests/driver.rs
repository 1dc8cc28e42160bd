//! Filesystem-level integration tests for `hack_vm::driver`: directory
//! discovery, sort order, and bootstrap detection against real files.
//!
//! Kept as a single test function: `translate` resolves output paths
//! relative to the process's current directory, and `std::env::set_current_dir`
//! is process-global, so exercising it from more than one concurrently
//! scheduled `#[test]` would race.
use std::fs;

use hack_vm::driver::translate;

#[test]
fn filesystem_driver_scenarios() {
    directory_mode_sorts_files_and_bootstraps_with_sys_vm();
    single_file_mode_never_emits_bootstrap();
    empty_directory_is_rejected_without_writing_output();
}

fn directory_mode_sorts_files_and_bootstraps_with_sys_vm() {
    let dir = tempfile::tempdir().expect("could not create temp dir");
    let project = dir.path().join("Project");
    fs::create_dir(&project).unwrap();

    fs::write(project.join("Main.vm"), "call Sys.init 0\n").unwrap();
    fs::write(
        project.join("Sys.vm"),
        "function Sys.init 0\npush constant 1\nreturn\n",
    )
    .unwrap();

    let cwd = tempfile::tempdir().expect("could not create output dir");
    let result = with_current_dir(cwd.path(), || translate(&project));

    let output_path = result.expect("translation should succeed");
    assert_eq!(output_path, std::path::PathBuf::from("Project.asm"));

    let asm = fs::read_to_string(cwd.path().join("Project.asm")).unwrap();
    assert!(asm.starts_with("@256\nD=A\n@SP\nM=D"));
    assert!(asm.contains("@Sys.init\n0;JMP"));
    assert!(asm.ends_with("(INFINITE_LOOP)\n@INFINITE_LOOP\n0;JMP\n"));
}

fn single_file_mode_never_emits_bootstrap() {
    let dir = tempfile::tempdir().expect("could not create temp dir");
    let file = dir.path().join("Foo.vm");
    fs::write(&file, "push constant 1\npush constant 2\nadd\n").unwrap();

    let cwd = tempfile::tempdir().expect("could not create output dir");
    let result = with_current_dir(cwd.path(), || translate(&file));

    let output_path = result.expect("translation should succeed");
    assert_eq!(output_path, std::path::PathBuf::from("Foo.asm"));

    let asm = fs::read_to_string(cwd.path().join("Foo.asm")).unwrap();
    assert!(!asm.contains("@256\nD=A\n@SP\nM=D"));
    assert!(asm.ends_with("(END)\n@END\n0;JMP\n"));
}

fn empty_directory_is_rejected_without_writing_output() {
    let dir = tempfile::tempdir().expect("could not create temp dir");
    let empty = dir.path().join("Empty");
    fs::create_dir(&empty).unwrap();

    let cwd = tempfile::tempdir().expect("could not create output dir");
    let result = with_current_dir(cwd.path(), || translate(&empty));

    assert!(result.is_err());
    assert!(!cwd.path().join("Empty.asm").exists());
}

/// Runs `f` with the process's current directory temporarily set to `dir`,
/// restoring the original directory even if `f` panics.
fn with_current_dir<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir).unwrap();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    std::env::set_current_dir(original).unwrap();
    match result {
        Ok(v) => v,
        Err(e) => std::panic::resume_unwind(e),
    }
}
