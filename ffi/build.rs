use std::env;
use std::path::PathBuf;

/// Generate `webcommon.h` into `OUT_DIR`; failures are reported as warnings.
fn main() {
    println!("cargo:rerun-if-changed=src");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        return;
    };

    let result = cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("WEBCOMMON_H")
        .generate();

    match result {
        Ok(bindings) => {
            bindings.write_to_file(PathBuf::from(out_dir).join("webcommon.h"));
        }
        Err(e) => println!("cargo:warning=header generation skipped: {e}"),
    }
}
