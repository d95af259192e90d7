//! Installed-tracker panel: polling refresh, row actions, configure modal.
//!
//! # Design
//! - `panel` owns fetching and mutation; `icons` and `modal` are pure helpers.
//! - The view drives `refresh` from an interval that dies with the component.

pub mod icons;
pub mod modal;
pub mod panel;
#[cfg(target_arch = "wasm32")]
pub mod view;
