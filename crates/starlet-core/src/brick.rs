//! Brick contract: self-verifying render units.
//!
//! Every widget is also a brick. A brick names the assertions that must hold
//! for its current state, can verify them, and can render itself to HTML and
//! CSS for web hosts. Hosts check [`Brick::can_render`] before mounting.

use std::fmt;

/// Assertion that must hold for a brick to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrickAssertion {
    /// Text content must be rendered when the brick is interactive
    TextVisible,

    /// An element matching the class selector must be present
    ElementPresent(String),

    /// Named structural check evaluated by the brick itself
    Custom(&'static str),
}

impl BrickAssertion {
    /// Create an element presence assertion.
    #[must_use]
    pub fn element_present(selector: impl Into<String>) -> Self {
        Self::ElementPresent(selector.into())
    }
}

impl fmt::Display for BrickAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextVisible => write!(f, "text visible"),
            Self::ElementPresent(selector) => write!(f, "element present: {selector}"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Result of verifying brick assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrickVerification {
    /// Assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// Assertions that failed, with reasons
    pub failed: Vec<(BrickAssertion, String)>,
}

impl BrickVerification {
    /// Create an empty verification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one assertion.
    pub fn check(&mut self, assertion: BrickAssertion, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.passed.push(assertion),
            Err(reason) => self.failed.push((assertion, reason)),
        }
    }

    /// Check if all assertions passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Core brick trait.
pub trait Brick {
    /// Unique type name of the brick.
    fn brick_name(&self) -> &'static str;

    /// Assertions that apply to the brick in its current state.
    fn assertions(&self) -> Vec<BrickAssertion>;

    /// Verify all assertions against current state.
    fn verify(&self) -> BrickVerification;

    /// Render the brick as HTML. Same state, same output.
    fn to_html(&self) -> String;

    /// CSS rules for the HTML produced by [`Brick::to_html`].
    fn to_css(&self) -> String;

    /// Check if this brick can be rendered (all assertions pass).
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(bool);

    impl Brick for Fixed {
        fn brick_name(&self) -> &'static str {
            "Fixed"
        }

        fn assertions(&self) -> Vec<BrickAssertion> {
            vec![BrickAssertion::Custom("fixed")]
        }

        fn verify(&self) -> BrickVerification {
            let mut v = BrickVerification::new();
            let outcome = if self.0 { Ok(()) } else { Err("forced".to_string()) };
            v.check(BrickAssertion::Custom("fixed"), outcome);
            v
        }

        fn to_html(&self) -> String {
            "<div></div>".to_string()
        }

        fn to_css(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_verification_collects_results() {
        let mut v = BrickVerification::new();
        assert!(v.is_valid());
        v.check(BrickAssertion::TextVisible, Ok(()));
        v.check(BrickAssertion::element_present(".star"), Err("missing".into()));
        assert!(!v.is_valid());
        assert_eq!(v.passed, [BrickAssertion::TextVisible]);
        assert_eq!(v.failed.len(), 1);
        assert_eq!(v.failed[0].1, "missing");
    }

    #[test]
    fn test_can_render_follows_verify() {
        assert!(Fixed(true).can_render());
        assert!(!Fixed(false).can_render());
    }

    #[test]
    fn test_assertion_display() {
        assert_eq!(
            BrickAssertion::element_present(".star").to_string(),
            "element present: .star"
        );
        assert_eq!(BrickAssertion::Custom("one fill class").to_string(), "one fill class");
    }
}
