//! Markup fixtures for widget tests.
//!
//! A fixture is the host tag as it would appear in a page:
//!
//! ```
//! use starlet_test::Fixture;
//!
//! let fixture = Fixture::parse(r#"<star-rating rating="3.5" readonly></star-rating>"#).unwrap();
//! assert_eq!(fixture.tag(), "star-rating");
//! assert_eq!(fixture.attribute("rating"), Some("3.5"));
//! assert_eq!(fixture.attribute("readonly"), Some(""));
//! ```

use starlet_widgets::{StarRating, STAR_RATING_TAG};
use thiserror::Error;

/// Error type for fixture parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// Markup does not start with a tag
    #[error("expected an opening tag")]
    MissingTag,
    /// Opening tag is never closed with `>`
    #[error("unterminated tag <{0}")]
    UnterminatedTag(String),
    /// Attribute value quote is never closed
    #[error("unterminated value for attribute {0}")]
    UnterminatedValue(String),
    /// Tag is not one the harness can mount
    #[error("unknown element <{0}>")]
    UnknownElement(String),
    /// Inline style sets a theme hook to an invalid value
    #[error("invalid style: {0}")]
    InvalidStyle(String),
}

/// A parsed host tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Fixture {
    /// Parse the opening tag of `markup`. Anything after the first `>` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup has no well-formed opening tag.
    pub fn parse(markup: &str) -> Result<Self, FixtureError> {
        let rest = markup
            .trim_start()
            .strip_prefix('<')
            .ok_or(FixtureError::MissingTag)?;
        let tag_end = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let tag = rest[..tag_end].to_ascii_lowercase();
        if tag.is_empty() {
            return Err(FixtureError::MissingTag);
        }

        let mut attributes = Vec::new();
        let mut chars = rest[tag_end..].char_indices().peekable();
        let body = &rest[tag_end..];
        loop {
            while chars.next_if(|(_, c)| c.is_whitespace() || *c == '/').is_some() {}
            let Some(&(start, c)) = chars.peek() else {
                return Err(FixtureError::UnterminatedTag(tag));
            };
            if c == '>' {
                break;
            }

            let mut end = start;
            while let Some((i, c)) =
                chars.next_if(|(_, c)| !c.is_whitespace() && !matches!(*c, '=' | '>' | '/'))
            {
                end = i + c.len_utf8();
            }
            // Attribute names are case-insensitive in HTML.
            let name = body[start..end].to_ascii_lowercase();

            let value = if chars.next_if(|(_, c)| *c == '=').is_some() {
                match chars.peek().copied() {
                    Some((i, q @ ('"' | '\''))) => {
                        chars.next();
                        let close = body[i + 1..]
                            .find(q)
                            .ok_or_else(|| FixtureError::UnterminatedValue(name.clone()))?;
                        let value = body[i + 1..i + 1 + close].to_string();
                        while chars.next_if(|(j, _)| *j <= i + 1 + close).is_some() {}
                        value
                    }
                    _ => {
                        let mut value = String::new();
                        while let Some((_, c)) =
                            chars.next_if(|(_, c)| !c.is_whitespace() && *c != '>')
                        {
                            value.push(c);
                        }
                        value
                    }
                }
            } else {
                String::new()
            };
            attributes.push((name, value));
        }

        Ok(Self { tag, attributes })
    }

    /// Tag name, lowercased.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value; boolean attributes have an empty value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in source order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Mount a rating widget with the fixture's attributes applied in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is not `star-rating` or its inline style
    /// sets a theme hook to an invalid value.
    pub fn mount(&self) -> Result<StarRating, FixtureError> {
        if self.tag != STAR_RATING_TAG {
            return Err(FixtureError::UnknownElement(self.tag.clone()));
        }
        let mut widget = StarRating::new();
        for (name, value) in &self.attributes {
            if name == "style" {
                widget
                    .theme_mut()
                    .apply_inline_style(value)
                    .map_err(|err| FixtureError::InvalidStyle(err.to_string()))?;
            } else {
                widget.set_attribute(name, value);
            }
        }
        Ok(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes() {
        let fixture =
            Fixture::parse(r#"<star-rating rating="3.5" maxRating='10' disabled data-x=y>"#)
                .unwrap();
        assert_eq!(
            fixture.attributes(),
            [
                ("rating".to_string(), "3.5".to_string()),
                ("maxrating".to_string(), "10".to_string()),
                ("disabled".to_string(), String::new()),
                ("data-x".to_string(), "y".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_bare_tag() {
        let fixture = Fixture::parse("<star-rating></star-rating>").unwrap();
        assert_eq!(fixture.tag(), "star-rating");
        assert!(fixture.attributes().is_empty());
        assert!(Fixture::parse("<star-rating/>").is_ok());
    }

    #[test]
    fn test_parse_value_with_spaces() {
        let fixture = Fixture::parse(r#"<star-rating title="five stars max">"#).unwrap();
        assert_eq!(fixture.attribute("title"), Some("five stars max"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Fixture::parse("star-rating"), Err(FixtureError::MissingTag));
        assert_eq!(Fixture::parse("< >"), Err(FixtureError::MissingTag));
        assert_eq!(
            Fixture::parse("<star-rating rating=3"),
            Err(FixtureError::UnterminatedTag("star-rating".to_string()))
        );
        assert_eq!(
            Fixture::parse(r#"<star-rating rating="3>"#),
            Err(FixtureError::UnterminatedValue("rating".to_string()))
        );
    }

    #[test]
    fn test_mount_applies_attributes() {
        let widget = Fixture::parse(r#"<star-rating rating="null" maxRating="3" readonly>"#)
            .unwrap()
            .mount()
            .unwrap();
        assert_eq!(widget.get_rating(), None);
        assert_eq!(widget.star_count(), 3);
        assert!(widget.is_readonly());
    }

    #[test]
    fn test_mount_applies_host_style_hooks() {
        let widget = Fixture::parse(
            r##"<star-rating style="--rating-star-size: 48px; margin: 0" rating="2">"##,
        )
        .unwrap()
        .mount()
        .unwrap();
        assert_eq!(widget.get_theme().star_size_px(), 48.0);
        assert_eq!(widget.get_rating(), Some(2.0));

        let err = Fixture::parse(r#"<star-rating style="--rating-star-color: blue">"#)
            .unwrap()
            .mount()
            .unwrap_err();
        assert!(matches!(err, FixtureError::InvalidStyle(_)));
    }

    #[test]
    fn test_mount_unknown_element() {
        let err = Fixture::parse("<div>").unwrap().mount().unwrap_err();
        assert_eq!(err, FixtureError::UnknownElement("div".to_string()));
        assert_eq!(err.to_string(), "unknown element <div>");
    }
}
