//! Build script for the radio interface firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (memory.x comes from embassy-stm32)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds link normally
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
