//! Browser-side services: the `window.api` adapter and the document click listener.

pub(crate) mod bridge;
pub(crate) mod clicks;
