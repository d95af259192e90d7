#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Trackdeck renderer entry point.
//!
//! The renderer only runs inside the desktop host's webview; native builds
//! print how to produce the wasm bundle instead.

#[cfg(target_arch = "wasm32")]
fn main() {
    trackdeck_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_NOTICE: &str = "trackdeck-ui renders inside the desktop host's webview, which provides `window.api`.\n\
    Build the bundle with `trunk build --release` and point the host at `dist/index.html`.\n";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::io::Write;

    std::io::stderr().lock().write_all(NATIVE_NOTICE.as_bytes())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn notice_names_the_host_bridge_and_bundle() {
        assert!(NATIVE_NOTICE.contains("window.api"));
        assert!(NATIVE_NOTICE.contains("trunk build"));
    }

    #[test]
    fn native_main_only_prints() -> std::io::Result<()> {
        main()
    }
}
