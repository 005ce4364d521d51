use std::env;

fn main() {
    let version = env::var("SCENE_VIEWER_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=SCENE_VIEWER_VERSION={version}");
    println!("cargo:rerun-if-env-changed=SCENE_VIEWER_VERSION");
}
