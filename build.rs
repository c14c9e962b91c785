#[cfg(feature = "desktop")]
fn build_desktop_context() {
    // WHY: generate_context! reads tauri.conf.json and the ui/ bundle at compile time.
    println!("cargo:rerun-if-changed=tauri.conf.json");
    println!("cargo:rerun-if-changed=ui");
    tauri_build::build();
}

#[cfg(not(feature = "desktop"))]
fn build_desktop_context() {}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    build_desktop_context();
}
