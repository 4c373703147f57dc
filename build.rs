//! Linker setup for the RP2350 target.
//!
//! Copies `memory.x` into the build output directory so `cortex-m-rt` can
//! find it via the `-Tlink.x` argument set in `.cargo/config.toml`.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();

    println!("cargo:rustc-link-search={}", out.display());

    // Rebuild if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
}
