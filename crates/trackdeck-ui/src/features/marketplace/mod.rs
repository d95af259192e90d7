//! Tracker marketplace feature slice.
//!
//! # Design
//! - Listing derivation is pure and lives in `listing`.
//! - Installation is serialized by `install`; `state` wires both to the modal.

pub mod install;
pub mod listing;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
