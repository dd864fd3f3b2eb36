fn main() {
    println!("cargo:rerun-if-env-changed=LIBXC_LIB_DIR");

    let libxc_lib_dir =
        std::env::var("LIBXC_LIB_DIR").unwrap_or_else(|_| "/opt/libxc/lib".to_string());

    if std::path::Path::new(&libxc_lib_dir).exists() {
        println!("cargo:rustc-link-search=native={}", libxc_lib_dir);
    }

    println!("cargo:rustc-link-lib=xc");
}
