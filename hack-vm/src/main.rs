use std::{env, process::exit};

use anyhow::Result;

fn help() -> ! {
    println!(
        "\
vm file name or directory is not given.

Usage: cargo run -p hack-vm -- <vm filename or directory>
"
    );
    exit(0);
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else { help() };

    let output = hack_vm::driver::translate(path.as_ref()).unwrap_or_else(|e| {
        eprintln!("{e:?}");
        exit(1);
    });

    println!("Wrote {}", output.display());

    Ok(())
}
