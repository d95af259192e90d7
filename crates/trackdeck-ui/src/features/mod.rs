//! Feature slices: controllers first, wasm views alongside.

pub mod apps;
pub mod chat;
pub mod documents;
pub mod marketplace;
