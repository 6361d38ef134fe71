//! Test harness for the star rating widget.
//!
//! The harness mounts a [`StarRating`], lays it out in a viewport, drives it
//! with pointer events the way a user would and captures the rating
//! notifications it emits. Queries run against the widget's rendered
//! element tree using [`Selector`]s.

use starlet_core::{Brick, Constraints, Element, Event, MouseButton, Point, Rect, Widget};
use starlet_widgets::{RatingChanged, StarRating};
use std::collections::VecDeque;

use crate::fixture::{Fixture, FixtureError};
use crate::selector::Selector;

/// Test harness for interacting with a rating widget.
pub struct Harness {
    /// Widget under test
    widget: StarRating,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Notifications emitted so far
    emitted: Vec<RatingChanged>,
    /// Current viewport
    viewport: Rect,
}

impl Harness {
    /// Create a harness around `widget`.
    pub fn new(widget: StarRating) -> Self {
        let mut harness = Self {
            widget,
            event_queue: VecDeque::new(),
            emitted: Vec::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
        };
        harness.relayout();
        harness
    }

    /// Mount the widget described by host markup, e.g.
    /// `<star-rating rating="3"></star-rating>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup is not a `star-rating` tag.
    pub fn fixture(markup: &str) -> Result<Self, FixtureError> {
        Ok(Self::new(Fixture::parse(markup)?.mount()?))
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// Widget under test.
    #[must_use]
    pub const fn widget(&self) -> &StarRating {
        &self.widget
    }

    /// Update the widget in place, then lay it out again.
    pub fn update(&mut self, f: impl FnOnce(&mut StarRating)) -> &mut Self {
        f(&mut self.widget);
        self.relayout();
        self
    }

    /// Apply an attribute, as a host would on `setAttribute`.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.update(|w| {
            w.set_attribute(name, value);
        })
    }

    /// Remove an attribute, as a host would on `removeAttribute`.
    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.update(|w| {
            w.remove_attribute(name);
        })
    }

    // === Event Simulation ===

    /// Click the first star matching the selector.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        if let Some(index) = self.star_index(selector) {
            self.click_star(index);
        }
        self
    }

    /// Click the star at `index`: move over it, press and release.
    pub fn click_star(&mut self, index: usize) -> &mut Self {
        let center = self.widget.star_rect(index).center();
        self.event_queue.push_back(Event::MouseMove { position: center });
        self.event_queue.push_back(Event::MouseDown {
            position: center,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position: center,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Move the pointer over the first star matching the selector.
    pub fn hover(&mut self, selector: &str) -> &mut Self {
        if let Some(index) = self.star_index(selector) {
            self.hover_star(index);
        }
        self
    }

    /// Move the pointer over the star at `index`.
    pub fn hover_star(&mut self, index: usize) -> &mut Self {
        let position = self.widget.star_rect(index).center();
        self.event_queue.push_back(Event::MouseMove { position });
        self.process_events();
        self
    }

    /// Move the pointer to an arbitrary point.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.event_queue.push_back(Event::MouseMove {
            position: Point::new(x, y),
        });
        self.process_events();
        self
    }

    /// Move the pointer out of the widget.
    pub fn leave(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::MouseLeave);
        self.process_events();
        self
    }

    // === Queries ===

    /// Current rendered element tree.
    #[must_use]
    pub fn tree(&self) -> Element {
        self.widget.render()
    }

    /// First element matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<Element> {
        self.query_all(selector).into_iter().next()
    }

    /// All elements matching the selector, in document order. Invalid
    /// selectors match nothing.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let tree = self.tree();
        sel.select(&tree).into_iter().cloned().collect()
    }

    /// Trimmed text content of the first matching element, empty if none.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .map(|e| e.text_content().trim().to_string())
            .unwrap_or_default()
    }

    /// Check if an element exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Notifications emitted so far, oldest first.
    #[must_use]
    pub fn emitted(&self) -> &[RatingChanged] {
        &self.emitted
    }

    /// Drain captured notifications.
    pub fn take_emitted(&mut self) -> Vec<RatingChanged> {
        std::mem::take(&mut self.emitted)
    }

    // === Assertions ===

    /// Assert that an element exists.
    ///
    /// # Panics
    ///
    /// Panics if no element matches.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected element matching '{selector}' to exist"
        );
        self
    }

    /// Assert that no element matches.
    ///
    /// # Panics
    ///
    /// Panics if an element matches.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected element matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching elements.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} elements matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert an inline style property on the first matching element.
    ///
    /// # Panics
    ///
    /// Panics if no element matches or the value differs.
    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> &Self {
        let element = self
            .query(selector)
            .unwrap_or_else(|| panic!("Expected element matching '{selector}' to exist"));
        assert_eq!(
            element.style_value(property),
            Some(expected),
            "Expected {property}: {expected} on '{selector}'"
        );
        self
    }

    /// Assert the notifications emitted so far.
    ///
    /// # Panics
    ///
    /// Panics if the emitted ratings differ.
    pub fn assert_emitted(&self, expected: &[u32]) -> &Self {
        let actual: Vec<u32> = self.emitted.iter().map(|e| e.rating).collect();
        assert_eq!(actual, expected, "Unexpected rating notifications");
        self
    }

    /// Assert that every brick assertion holds.
    ///
    /// # Panics
    ///
    /// Panics listing the failed assertions.
    pub fn assert_valid(&self) -> &Self {
        let verification = self.widget.verify();
        assert!(
            verification.is_valid(),
            "Brick assertions failed: {:?}",
            verification.failed
        );
        self
    }

    // === Internal ===

    fn relayout(&mut self) {
        let size = self.widget.measure(Constraints::loose(self.viewport.size()));
        self.widget
            .layout(Rect::new(self.viewport.x, self.viewport.y, size.width, size.height));
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(msg) = self.widget.event(&event) {
                if let Ok(changed) = msg.downcast::<RatingChanged>() {
                    self.emitted.push(*changed);
                }
            }
        }
        // Display text width follows hover state.
        self.relayout();
    }

    fn star_index(&self, selector: &str) -> Option<usize> {
        self.query_all(selector)
            .iter()
            .find(|e| e.has_class("star"))
            .and_then(|e| e.attribute("data-index"))
            .and_then(|i| i.parse().ok())
    }
}
