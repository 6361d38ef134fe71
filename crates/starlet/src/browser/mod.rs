//! Browser runtime for the `<star-rating>` element.
//!
//! Bridges the widget's element tree to a real shadow DOM and forwards
//! pointer events from the page back to the widget.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod element;
#[cfg(target_arch = "wasm32")]
pub mod events;

#[cfg(target_arch = "wasm32")]
pub use element::{init, upgrade_all, StarRatingElement};
