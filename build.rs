use std::{env, path::PathBuf};

use walkdir::WalkDir;

// localizations are embedded and checked by `fl!` at compile time
fn main() {
    let dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    println!("cargo:rerun-if-changed=i18n.toml");
    for e in WalkDir::new(dir.join("i18n")).into_iter().filter_map(Result::ok) {
        if let Some(path) = e.path().strip_prefix(&dir).ok().and_then(|p| p.to_str()) {
            println!("cargo:rerun-if-changed={path}");
        }
    }
}
