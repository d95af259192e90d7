//! Document search form.

pub mod search;
#[cfg(target_arch = "wasm32")]
pub mod view;
