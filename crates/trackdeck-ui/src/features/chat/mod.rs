//! Chat list: message stream, stick-to-bottom scrolling, compose box.
//!
//! # Design
//! - Messages are rendered in the order the caller supplies; nothing reorders them.
//! - Sending only emits text; the caller owns the draft and the history.

pub mod attachments;
pub mod compose;
pub mod logic;
pub mod scroll;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
