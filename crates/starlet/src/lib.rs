//! Starlet: a star rating web component.
//!
//! The widget itself lives in [`widgets`]; this crate adds the story
//! catalog and, on `wasm32`, the `<star-rating>` element runtime.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { StarRatingElement, upgrade_all } from './starlet.js';
//!
//! async function main() {
//!     await init();
//!     upgrade_all();
//!     document.querySelector('star-rating')
//!         .addEventListener('rating', (e) => console.log(e.detail.rating));
//! }
//! ```

#![allow(clippy::doc_markdown, clippy::missing_const_for_fn)]

pub use starlet_core::*;
pub use starlet_widgets as widgets;

pub mod browser;
pub mod stories;

#[cfg(target_arch = "wasm32")]
pub use browser::{upgrade_all, StarRatingElement};
pub use stories::{Story, StoryBook, StoryEntry, StoryError};
