//! Rating theme: the style hooks a host can customize.
//!
//! The theme maps onto the `--rating-*` custom properties declared on the
//! component's `:host`. Themes load from TOML:
//!
//! ```toml
//! star-size = "32px"
//! star-color = "#ff4444"
//! hover-color = "#ff6666"
//! ```
//!
//! Missing keys keep their defaults.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use starlet_core::{Color, ColorParseError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or loading a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Theme file could not be read
    #[error("failed to read theme file {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// Theme file is not valid TOML or has invalid values
    #[error("invalid theme: {0}")]
    Toml(#[from] toml::de::Error),
    /// A color hook was given a value that is not a hex color
    #[error("invalid color for {variable}: {value:?} ({source})")]
    InvalidColor {
        /// Custom property name
        variable: String,
        /// Offending value
        value: String,
        /// Parse failure
        source: ColorParseError,
    },
    /// A length hook was given a value that is not a CSS length
    #[error("invalid length {0:?} (expected a number followed by px, em, rem or %)")]
    InvalidLength(String),
    /// Custom property is not one of the rating hooks
    #[error("unknown theme variable {0:?}")]
    UnknownVariable(String),
}

/// Unit of a [`CssLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Pixels
    Px,
    /// Relative to the element font size
    Em,
    /// Relative to the root font size
    Rem,
    /// Percentage
    Percent,
}

impl LengthUnit {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Percent => "%",
        }
    }
}

/// A CSS length such as `24px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssLength {
    /// Numeric part
    pub value: f32,
    /// Unit
    pub unit: LengthUnit,
}

impl CssLength {
    /// Length in pixels.
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// Pixel value, if the unit is `px`.
    #[must_use]
    pub const fn as_px(&self) -> Option<f32> {
        match self.unit {
            LengthUnit::Px => Some(self.value),
            LengthUnit::Em | LengthUnit::Rem | LengthUnit::Percent => None,
        }
    }
}

impl FromStr for CssLength {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // rem before em: "1rem" also ends with "em"
        let (number, unit) = if let Some(n) = s.strip_suffix("rem") {
            (n, LengthUnit::Rem)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, LengthUnit::Px)
        } else if let Some(n) = s.strip_suffix("em") {
            (n, LengthUnit::Em)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, LengthUnit::Percent)
        } else {
            return Err(ThemeError::InvalidLength(s.to_string()));
        };
        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| ThemeError::InvalidLength(s.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ThemeError::InvalidLength(s.to_string()));
        }
        Ok(Self { value, unit })
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl Serialize for CssLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CssLength {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

mod css_color {
    use serde::{Deserialize, Deserializer, Serializer};
    use starlet_core::Color;

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_css())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw).map_err(|e| serde::de::Error::custom(format!("{raw:?}: {e}")))
    }
}

/// Style hooks for the rating widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RatingTheme {
    /// `--rating-star-size`
    pub star_size: CssLength,
    /// `--rating-star-color`
    #[serde(with = "css_color")]
    pub star_color: Color,
    /// `--rating-star-unrated-color`
    #[serde(with = "css_color")]
    pub unrated_color: Color,
    /// `--rating-star-hover-color`
    #[serde(with = "css_color")]
    pub hover_color: Color,
    /// `--rating-star-spacing`
    pub spacing: CssLength,
    /// `--rating-text-color`
    #[serde(with = "css_color")]
    pub text_color: Color,
    /// `--rating-text-hover-color`
    #[serde(with = "css_color")]
    pub text_hover_color: Color,
}

/// Star size used for painting when the theme size is not in pixels.
pub const FALLBACK_STAR_SIZE_PX: f32 = 24.0;

/// Spacing used for painting when the theme spacing is not in pixels.
pub const FALLBACK_SPACING_PX: f32 = 2.0;

fn hex(value: &str) -> Color {
    Color::from_hex(value).unwrap_or(Color::BLACK)
}

impl Default for RatingTheme {
    fn default() -> Self {
        Self {
            star_size: CssLength::px(24.0),
            star_color: hex("#ffd700"),
            unrated_color: hex("#d3d3d3"),
            hover_color: hex("#ffed4e"),
            spacing: CssLength::px(2.0),
            text_color: hex("#666666"),
            text_hover_color: hex("#333333"),
        }
    }
}

impl RatingTheme {
    /// Parse a theme from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a theme from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = Self::from_toml_str(&source)?;
        log::debug!("loaded rating theme from {}", path.display());
        Ok(theme)
    }

    /// Set a hook by its custom property name, e.g. `--rating-star-color`.
    pub fn set_variable(&mut self, name: &str, value: &str) -> Result<(), ThemeError> {
        let color = |variable: &str| {
            Color::from_hex(value).map_err(|source| ThemeError::InvalidColor {
                variable: variable.to_string(),
                value: value.to_string(),
                source,
            })
        };
        match name {
            "--rating-star-size" => self.star_size = value.parse()?,
            "--rating-star-spacing" => self.spacing = value.parse()?,
            "--rating-star-color" => self.star_color = color(name)?,
            "--rating-star-unrated-color" => self.unrated_color = color(name)?,
            "--rating-star-hover-color" => self.hover_color = color(name)?,
            "--rating-text-color" => self.text_color = color(name)?,
            "--rating-text-hover-color" => self.text_hover_color = color(name)?,
            _ => return Err(ThemeError::UnknownVariable(name.to_string())),
        }
        Ok(())
    }

    /// Builder form of [`RatingTheme::set_variable`].
    pub fn with_variable(mut self, name: &str, value: &str) -> Result<Self, ThemeError> {
        self.set_variable(name, value)?;
        Ok(self)
    }

    /// The hooks as `(name, value)` pairs, in declaration order.
    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--rating-star-size", self.star_size.to_string()),
            ("--rating-star-color", self.star_color.to_css()),
            ("--rating-star-unrated-color", self.unrated_color.to_css()),
            ("--rating-star-hover-color", self.hover_color.to_css()),
            ("--rating-star-spacing", self.spacing.to_string()),
            ("--rating-text-color", self.text_color.to_css()),
            ("--rating-text-hover-color", self.text_hover_color.to_css()),
        ]
    }

    /// Hooks whose value differs from `base`, in declaration order.
    #[must_use]
    pub fn changed_variables(&self, base: &Self) -> Vec<(&'static str, String)> {
        self.variables()
            .into_iter()
            .zip(base.variables())
            .filter_map(|(own, base)| (own != base).then_some(own))
            .collect()
    }

    /// Apply the hooks declared in an inline `style` value such as
    /// `--rating-star-size: 16px; color: red`. Other properties are skipped.
    /// Returns the number of hooks applied.
    pub fn apply_inline_style(&mut self, style: &str) -> Result<usize, ThemeError> {
        let mut applied = 0;
        for declaration in style.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            match self.set_variable(name.trim(), value.trim()) {
                Ok(()) => applied += 1,
                Err(ThemeError::UnknownVariable(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(applied)
    }

    /// The hooks as CSS declarations, one per line.
    #[must_use]
    pub fn css_variables(&self) -> String {
        self.variables()
            .into_iter()
            .map(|(name, value)| format!("\t{name}: {value};\n"))
            .collect()
    }

    /// Star edge length in pixels for canvas painting.
    #[must_use]
    pub fn star_size_px(&self) -> f32 {
        self.star_size.as_px().unwrap_or(FALLBACK_STAR_SIZE_PX)
    }

    /// Gap between stars in pixels for canvas painting.
    #[must_use]
    pub fn spacing_px(&self) -> f32 {
        self.spacing.as_px().unwrap_or(FALLBACK_SPACING_PX)
    }

    /// Full component stylesheet with this theme's hook values.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        format!(
            ":host {{\n\tdisplay: inline-block;\n{}}}\n{COMPONENT_RULES}{}",
            self.css_variables(),
            mask_rule()
        )
    }
}

const STAR_MASK: &str = "url(\"data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 24 24'%3E%3Cpath d='M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z'/%3E%3C/svg%3E\")";

const COMPONENT_RULES: &str = concat!(
    ".rating-container {\n",
    "\tdisplay: flex;\n",
    "\talign-items: center;\n",
    "\tgap: var(--rating-star-spacing);\n",
    "}\n",
    ".star {\n",
    "\twidth: var(--rating-star-size);\n",
    "\theight: var(--rating-star-size);\n",
    "\tcursor: pointer;\n",
    "\ttransition: color 0.2s ease;\n",
    "\tposition: relative;\n",
    "\tdisplay: inline-block;\n",
    "}\n",
    ".star:not(.disabled):not(.readonly):hover {\n",
    "\tcolor: var(--rating-star-hover-color);\n",
    "}\n",
    ".star.disabled,\n.star.readonly {\n",
    "\tcursor: default;\n",
    "}\n",
    ".star svg {\n",
    "\twidth: 100%;\n",
    "\theight: 100%;\n",
    "\tdisplay: block;\n",
    "}\n",
    ".star svg path {\n",
    "\tfill: currentColor;\n",
    "}\n",
    ".star.filled {\n",
    "\tcolor: var(--rating-star-color);\n",
    "}\n",
    ".star.unrated {\n",
    "\tcolor: var(--rating-star-unrated-color);\n",
    "}\n",
    ".star.partial {\n",
    "\tcolor: var(--rating-star-color);\n",
    "}\n",
    ".star.partial svg {\n",
    "\tposition: relative;\n",
    "\tz-index: 2;\n",
    "}\n",
    ".star.partial::before,\n.star.partial::after {\n",
    "\tcontent: '';\n",
    "\tposition: absolute;\n",
    "\ttop: 0;\n",
    "\tleft: 0;\n",
    "\twidth: 100%;\n",
    "\theight: 100%;\n",
    "\tpointer-events: none;\n",
    "\tmask-size: 100% 100%;\n",
    "\tmask-repeat: no-repeat;\n",
    "}\n",
    ".star.partial::before {\n",
    "\tbackground: var(--rating-star-unrated-color);\n",
    "\tclip-path: polygon(var(--partial-width, 50%) 0, 100% 0, 100% 100%, var(--partial-width, 50%) 100%);\n",
    "\tz-index: 3;\n",
    "}\n",
    ".star.partial::after {\n",
    "\tbackground: var(--rating-star-color);\n",
    "\tclip-path: polygon(0 0, var(--partial-width, 50%) 0, var(--partial-width, 50%) 100%, 0 100%);\n",
    "\tz-index: 4;\n",
    "}\n",
    ".rating-display {\n",
    "\tmargin-left: 10px;\n",
    "\tfont-size: 14px;\n",
    "\tcolor: var(--rating-text-color, #666);\n",
    "\tfont-weight: 500;\n",
    "\ttransition: color 0.2s ease;\n",
    "}\n",
    ".rating-display:hover {\n",
    "\tcolor: var(--rating-text-hover-color, #333);\n",
    "}\n",
);

/// Mask rule shared by both halves of a partial star.
fn mask_rule() -> String {
    format!(".star.partial::before,\n.star.partial::after {{\n\tmask: {STAR_MASK};\n}}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hooks() {
        let vars = RatingTheme::default().variables();
        assert_eq!(
            vars,
            vec![
                ("--rating-star-size", "24px".to_string()),
                ("--rating-star-color", "#ffd700".to_string()),
                ("--rating-star-unrated-color", "#d3d3d3".to_string()),
                ("--rating-star-hover-color", "#ffed4e".to_string()),
                ("--rating-star-spacing", "2px".to_string()),
                ("--rating-text-color", "#666666".to_string()),
                ("--rating-text-hover-color", "#333333".to_string()),
            ]
        );
    }

    #[test]
    fn test_css_length_parse() {
        assert_eq!("24px".parse::<CssLength>().unwrap(), CssLength::px(24.0));
        let rem: CssLength = "1.5rem".parse().unwrap();
        assert_eq!(rem.unit, LengthUnit::Rem);
        assert_eq!(rem.value, 1.5);
        assert_eq!("2em".parse::<CssLength>().unwrap().unit, LengthUnit::Em);
        assert_eq!("50%".parse::<CssLength>().unwrap().to_string(), "50%");
        assert!("24".parse::<CssLength>().is_err());
        assert!("bigpx".parse::<CssLength>().is_err());
        assert!("-4px".parse::<CssLength>().is_err());
    }

    #[test]
    fn test_from_toml_partial_overrides() {
        let theme = RatingTheme::from_toml_str(
            r##"
            star-size = "32px"
            star-color = "#ff4444"
            hover-color = "#ff6666"
            "##,
        )
        .unwrap();
        assert_eq!(theme.star_size_px(), 32.0);
        assert_eq!(theme.star_color.to_hex(), "#ff4444");
        assert_eq!(theme.hover_color.to_hex(), "#ff6666");
        assert_eq!(theme.unrated_color, RatingTheme::default().unrated_color);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let err = RatingTheme::from_toml_str(r#"star-color = "gold""#).unwrap_err();
        assert!(matches!(err, ThemeError::Toml(_)));
        let err = RatingTheme::from_toml_str(r#"star-size = "big""#).unwrap_err();
        assert!(err.to_string().contains("invalid theme"));
        let err = RatingTheme::from_toml_str(r#"unknown = "1px""#).unwrap_err();
        assert!(matches!(err, ThemeError::Toml(_)));
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = RatingTheme::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn test_set_variable() {
        let mut theme = RatingTheme::default();
        theme.set_variable("--rating-star-color", "#4444ff").unwrap();
        theme.set_variable("--rating-star-size", "48px").unwrap();
        assert_eq!(theme.star_color.to_hex(), "#4444ff");
        assert_eq!(theme.star_size_px(), 48.0);

        let err = theme.set_variable("--rating-star-color", "blue").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { .. }));
        let err = theme.set_variable("--size", "16px").unwrap_err();
        assert!(matches!(err, ThemeError::UnknownVariable(_)));
    }

    #[test]
    fn test_changed_variables_against_default() {
        let base = RatingTheme::default();
        assert!(base.changed_variables(&base).is_empty());

        let small = base.clone().with_variable("--rating-star-size", "16px").unwrap();
        assert_eq!(
            small.changed_variables(&base),
            vec![("--rating-star-size", "16px".to_string())]
        );
    }

    #[test]
    fn test_apply_inline_style() {
        let mut theme = RatingTheme::default();
        let applied = theme
            .apply_inline_style("--rating-star-size: 32px; color: red;--rating-star-color:#ff4444;")
            .unwrap();
        assert_eq!(applied, 2);
        assert_eq!(theme.star_size_px(), 32.0);
        assert_eq!(theme.star_color.to_hex(), "#ff4444");

        let err = theme.apply_inline_style("--rating-text-color: teal").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { .. }));
        assert_eq!(theme.apply_inline_style("").unwrap(), 0);
    }

    #[test]
    fn test_non_px_sizes_fall_back_for_painting() {
        let theme = RatingTheme::default()
            .with_variable("--rating-star-size", "2em")
            .unwrap()
            .with_variable("--rating-star-spacing", "10%")
            .unwrap();
        assert_eq!(theme.star_size_px(), FALLBACK_STAR_SIZE_PX);
        assert_eq!(theme.spacing_px(), FALLBACK_SPACING_PX);
    }

    #[test]
    fn test_stylesheet_contains_hooks_and_rules() {
        let css = RatingTheme::default().stylesheet();
        assert!(css.starts_with(":host {"));
        assert!(css.contains("--rating-star-color: #ffd700;"));
        assert!(css.contains(".star:not(.disabled):not(.readonly):hover"));
        assert!(css.contains("var(--partial-width, 50%)"));
        assert!(css.contains(".rating-display {"));
    }

    #[test]
    fn test_theme_serializes_as_css_strings() {
        let text = toml::to_string(&RatingTheme::default()).unwrap();
        assert!(text.contains(r##"star-color = "#ffd700""##));
        assert!(text.contains(r#"star-size = "24px""#));
    }
}
