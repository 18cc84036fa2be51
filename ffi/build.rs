//! Generates `request_form.h` into `OUT_DIR`; packaging copies it from there.

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let (Ok(crate_dir), Ok(out_dir)) =
        (std::env::var("CARGO_MANIFEST_DIR"), std::env::var("OUT_DIR"))
    else {
        return;
    };
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("REQUEST_FORM_H")
        .with_documentation(true)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(format!("{out_dir}/request_form.h"));
        }
        Err(e) => println!("cargo:warning=skipping C header generation: {e}"),
    }
}
