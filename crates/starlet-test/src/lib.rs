#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
//! Testing harness for Starlet widgets.
//!
//! Mount a widget from host markup, drive it with pointer events and query
//! its rendered tree with CSS-like selectors:
//!
//! ```
//! use starlet_test::Harness;
//!
//! let mut harness = Harness::fixture(r#"<star-rating rating="3"></star-rating>"#).unwrap();
//! harness.assert_count(".star.filled", 3);
//!
//! harness.click_star(0);
//! harness.assert_emitted(&[1]);
//! ```

mod fixture;
mod harness;
mod selector;

pub use fixture::{Fixture, FixtureError};
pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
pub use starlet_widgets::STAR_RATING_TAG;
