use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

const DEFAULT_SCRIPT: &str = "scripts/hello.bio";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed=BAREIO_SCRIPT");
    println!("cargo:rerun-if-changed=link.ld");

    if env::var_os("CARGO_FEATURE_IMAGE").is_none() {
        return Ok(());
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let script = env::var("BAREIO_SCRIPT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCRIPT));
    let script = manifest_dir.join(script);
    println!("cargo:rerun-if-changed={}", script.display());

    let code = stage0::compile_file(&script, "SCRIPT").map_err(|diagnostic| {
        for line in diagnostic.lines() {
            println!("cargo:warning={line}");
        }
        format!("cannot compile {}", script.display())
    })?;

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("script.rs"), code)?;

    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        println!(
            "cargo:rustc-link-arg-bins=-T{}",
            manifest_dir.join("link.ld").display()
        );
    }
    Ok(())
}
