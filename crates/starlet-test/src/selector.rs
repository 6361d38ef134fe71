//! CSS-like selector parsing for element queries.
//!
//! Supports:
//! - `"div"` - by tag
//! - `".star"` - by class, compound `".star.filled"`
//! - `"[part='star']"`, `"[data-index=2]"`, `"[style]"` - by attribute
//! - `".rating-container .star"` - descendant combinator

use starlet_core::Element;
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by tag name
    Type(String),
    /// Match by class (e.g., `.star`)
    Class(String),
    /// Match by exposed part name (e.g., `[part='star']`)
    Part(String),
    /// Match by attribute presence or value (e.g., `[data-index='2']`)
    Attribute {
        /// Attribute name
        name: String,
        /// Required value, `None` for presence only
        value: Option<String>,
    },
    /// All parts must match the same element (e.g., `.star.filled`)
    Compound(Vec<Selector>),
    /// Right side must have an ancestor matching the left side
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches `element`, given its ancestors from
    /// the root down.
    #[must_use]
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        match self {
            Self::Type(tag) => element.tag() == tag,
            Self::Class(class) => element.has_class(class),
            Self::Part(part) => element.part_name() == Some(part.as_str()),
            Self::Attribute { name, value } => {
                let actual = match name.as_str() {
                    "class" => (!element.classes().is_empty()).then(|| element.class_attr()),
                    "style" => {
                        let style = element.style_attr();
                        (!style.is_empty()).then_some(style)
                    }
                    _ => element.attribute(name).map(str::to_string),
                };
                match (actual, value) {
                    (Some(actual), Some(expected)) => actual == *expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                }
            }
            Self::Compound(parts) => parts.iter().all(|p| p.matches(element, ancestors)),
            Self::Descendant(ancestor, inner) => {
                inner.matches(element, ancestors)
                    && (0..ancestors.len())
                        .rev()
                        .any(|i| ancestor.matches(ancestors[i], &ancestors[..i]))
            }
        }
    }

    /// All elements in `root`'s subtree (including `root`) matching this
    /// selector, in document order.
    #[must_use]
    pub fn select<'a>(&self, root: &'a Element) -> Vec<&'a Element> {
        let mut results = Vec::new();
        let mut ancestors = Vec::new();
        self.collect(root, &mut ancestors, &mut results);
        results
    }

    fn collect<'a>(
        &self,
        element: &'a Element,
        ancestors: &mut Vec<&'a Element>,
        results: &mut Vec<&'a Element>,
    ) {
        if self.matches(element, ancestors) {
            results.push(element);
        }
        ancestors.push(element);
        for child in element.child_elements() {
            self.collect(child, ancestors, results);
        }
        ancestors.pop();
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or malformed.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = self.parse_compound()?;
        loop {
            self.skip_whitespace();
            if self.peek_char().is_none() {
                return Ok(selector);
            }
            let inner = self.parse_compound()?;
            selector = Selector::Descendant(Box::new(selector), Box::new(inner));
        }
    }

    fn parse_compound(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek_char() {
            let part = match c {
                '.' => self.parse_class()?,
                '[' => self.parse_attribute()?,
                _ if c.is_alphabetic() && parts.is_empty() => self.parse_type()?,
                _ if c.is_whitespace() => break,
                _ => return Err(SelectorError::UnexpectedChar(c)),
            };
            parts.push(part);
        }

        match parts.len() {
            0 => Err(SelectorError::ExpectedIdentifier),
            1 => Ok(parts.remove(0)),
            _ => Ok(Selector::Compound(parts)),
        }
    }

    fn parse_class(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '.'
        let class = self.read_identifier()?;
        Ok(Selector::Class(class))
    }

    fn parse_type(&mut self) -> Result<Selector, SelectorError> {
        let name = self.read_identifier()?;
        Ok(Selector::Type(name))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // Skip '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        let value = if self.peek_char() == Some('=') {
            self.advance();
            let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
            if let Some(q) = quote {
                self.advance();
                let value = self.read_until_any(&[q]);
                if self.peek_char() != Some(q) {
                    return Err(SelectorError::UnclosedAttribute);
                }
                self.advance();
                Some(value)
            } else {
                Some(self.read_until_any(&[']']).trim().to_string())
            }
        } else {
            None
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        match (name.as_str(), value) {
            ("part", Some(part)) => Ok(Selector::Part(part)),
            (_, value) => Ok(Selector::Attribute { name, value }),
        }
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
}
