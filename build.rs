fn main() {
    println!("cargo:rerun-if-changed=src/integration/raw.rs");
    if std::env::var_os("CARGO_FEATURE_FFI").is_none() {
        return;
    }

    // Generate C header for the raw interface
    let crate_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let out_dir = match std::env::var("OUT_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    match cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("ECKEYGEN_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(std::path::Path::new(&out_dir).join("eckeygen.h"));
        }
        Err(e) => println!("cargo:warning=Unable to generate C header: {e}"),
    }
}
