//! Virtual element tree produced by widget renders.
//!
//! Widgets describe their markup as an [`Element`] tree: tags, classes,
//! `part` names, inline style properties and text. Web hosts turn the tree
//! into real DOM nodes; tests query it directly; [`Element::to_html`]
//! serializes it for static pages.
//!
//! # Examples
//!
//! ```
//! use starlet_core::Element;
//!
//! let star = Element::new("div")
//!     .class("star")
//!     .class("partial")
//!     .style("--partial-width", "50%");
//!
//! assert!(star.has_class("partial"));
//! assert_eq!(star.style_value("--partial-width"), Some("50%"));
//! assert_eq!(
//!     star.to_html(),
//!     r#"<div class="star partial" style="--partial-width: 50%"></div>"#
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Text content, escaped on output
    Text(String),
    /// Trusted markup inserted verbatim (static glyphs)
    Raw(String),
}

/// A virtual DOM element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    part: Option<String>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add one or more whitespace-separated classes.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    /// Set the `part` name exposed for external styling.
    #[must_use]
    pub fn part(mut self, part: impl Into<String>) -> Self {
        self.part = Some(part.into());
        self
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set an inline style property, replacing any previous value.
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.style.push((property, value)),
        }
        self
    }

    /// Append a text node.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append trusted raw markup.
    #[must_use]
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Node::Raw(markup.into()));
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append several child elements.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The `class` attribute value.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// The `part` name, if any.
    #[must_use]
    pub fn part_name(&self) -> Option<&str> {
        self.part.as_deref()
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Value of an inline style property.
    #[must_use]
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// The `style` attribute value (`prop: value; prop: value`).
    #[must_use]
    pub fn style_attr(&self) -> String {
        self.style
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Child nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) | Node::Raw(_) => None,
        })
    }

    /// All elements in the subtree, depth first, including `self`.
    #[must_use]
    pub fn walk(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el);
            let kids: Vec<&Self> = el.child_elements().collect();
            stack.extend(kids.into_iter().rev());
        }
        out
    }

    /// Elements in the subtree (including `self`) matching `pred`.
    pub fn find_all(&self, pred: impl Fn(&Self) -> bool) -> Vec<&Self> {
        self.walk().into_iter().filter(|e| pred(e)).collect()
    }

    /// First element in the subtree (including `self`) matching `pred`.
    pub fn find(&self, pred: impl Fn(&Self) -> bool) -> Option<&Self> {
        self.walk().into_iter().find(|e| pred(e))
    }

    /// Concatenated text of the subtree. Raw markup is not text.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
                Node::Raw(_) => {}
            }
        }
    }

    /// Serialize the subtree to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, r#" class="{}""#, escape_attr(&self.class_attr()));
        }
        if !self.style.is_empty() {
            let _ = write!(out, r#" style="{}""#, escape_attr(&self.style_attr()));
        }
        if let Some(part) = &self.part {
            let _ = write!(out, r#" part="{}""#, escape_attr(part));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, r#" {name}="{}""#, escape_attr(value));
        }
        out.push('>');
        for node in &self.children {
            match node {
                Node::Element(e) => e.write_html(out),
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Raw(markup) => out.push_str(markup),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text content for HTML.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for HTML (double-quoted).
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
