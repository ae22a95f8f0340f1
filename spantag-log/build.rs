#![allow(missing_docs)]

use std::env;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

fn list_dirs(base: &str, prefix: &str, crates: &mut Vec<String>) -> io::Result<()> {
    for result in fs::read_dir(base)? {
        let entry = result?;

        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        if let Some(s) = name.to_str().filter(|s| s.starts_with(prefix)) {
            crates.push(s.replace('-', "_"));
        }
    }

    Ok(())
}

fn list_crates() -> io::Result<Vec<String>> {
    let mut crates = Vec::new();
    list_dirs("../", "spantag", &mut crates)?;
    list_dirs("../tools/", "", &mut crates)?;
    crates.sort();
    Ok(crates)
}

fn emit_crate_list() -> io::Result<()> {
    let crates = list_crates()?;

    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
    let dest_path = Path::new(&out_dir).join("constants.gen.rs");
    let mut f = File::create(dest_path)?;

    write!(f, "const CRATE_NAMES: &[&str] = &[")?;
    for name in &crates {
        write!(f, "\"{name}\",")?;
    }
    writeln!(f, "];")?;

    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    emit_crate_list().expect("failed to emit the list of workspace crates");
}
