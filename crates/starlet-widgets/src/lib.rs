//! Widget implementations for Starlet.
//!
//! - [`StarRating`]: the star rating widget
//! - [`RatingTheme`]: its style hooks, loadable from TOML
//! - [`glyph`]: the star outline shared by the HTML and canvas renderers

pub mod glyph;
pub mod star_rating;
pub mod theme;

pub use star_rating::{
    RatingChanged, StarFill, StarRating, DEFAULT_MAX_RATING, OBSERVED_ATTRIBUTES,
    PARTIAL_FILL_WIDTH, RATING_EVENT, STAR_RATING_TAG,
};
pub use theme::{CssLength, LengthUnit, RatingTheme, ThemeError};
