//! Core, DOM-free primitives and helpers for the renderer UI.
pub mod bridge;
pub mod click_hub;
pub mod config;
pub mod dropdown;
pub mod failure;
pub mod notify;
pub mod store;
