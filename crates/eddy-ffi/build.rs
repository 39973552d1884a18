use std::env;
use std::path::PathBuf;

/// Regenerate `include/eddy.h` from the `extern "C"` surface in `src/`.
fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"));
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-changed=src");

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("cbindgen.toml is unreadable");

    let include = crate_dir.join("include");
    std::fs::create_dir_all(&include).expect("cannot create include/");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("header generation failed");
    bindings.write_to_file(include.join("eddy.h"));
}
