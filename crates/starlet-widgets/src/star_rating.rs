//! Star rating widget.
//!
//! A row of `max_rating` stars showing a possibly fractional rating. While
//! interactive, hovering a star previews a pending rating and clicking it
//! emits [`RatingChanged`]. The widget never changes its own `rating`: the
//! host decides whether to accept the selection.

use crate::glyph::{star_polygon, STAR_SVG};
use crate::theme::RatingTheme;
use serde::{Deserialize, Serialize};
use starlet_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Constraints, Element, Event, MouseButton,
    Point, Rect, Size, TypeId, Widget,
};
use std::any::Any;

/// Star count used when no valid maximum is given.
pub const DEFAULT_MAX_RATING: i32 = 5;

/// Inline width of the filled half of a partial star.
pub const PARTIAL_FILL_WIDTH: &str = "50%";

/// Tag name of the host element.
pub const STAR_RATING_TAG: &str = "star-rating";

/// Name of the notification event dispatched on selection.
pub const RATING_EVENT: &str = "rating";

/// Attributes a host element forwards to [`StarRating::set_attribute`].
pub const OBSERVED_ATTRIBUTES: [&str; 5] =
    ["rating", "disabled", "readonly", "maxrating", "max-rating"];

const PARTIAL_FRACTION: f32 = 0.5;
const TEXT_GAP: f32 = 10.0;
const TEXT_SIZE: f32 = 14.0;
const TEXT_CHAR_WIDTH: f32 = 7.0;

/// Message emitted when the user selects a rating.
///
/// Serializes as the event detail, `{"rating":3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChanged {
    /// Selected rating, `index + 1`
    pub rating: u32,
}

/// Visual state of one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarFill {
    /// Fully colored
    Filled,
    /// Left half colored
    Partial,
    /// Uncolored
    Unrated,
}

impl StarFill {
    /// Class name carried by the star element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Partial => "partial",
            Self::Unrated => "unrated",
        }
    }
}

/// Star rating widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarRating {
    /// Current rating, `None` when unrated
    rating: Option<f64>,
    /// Number of stars
    max_rating: i32,
    /// Whether the widget is disabled
    disabled: bool,
    /// Whether the widget is read-only
    readonly: bool,
    /// Hover preview, 1-based
    #[serde(skip)]
    hover: Option<u32>,
    /// Style hooks
    theme: RatingTheme,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Default for StarRating {
    fn default() -> Self {
        Self {
            rating: None,
            max_rating: DEFAULT_MAX_RATING,
            disabled: false,
            readonly: false,
            hover: None,
            theme: RatingTheme::default(),
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }
}

impl StarRating {
    /// Create an unrated five-star widget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rating.
    #[must_use]
    pub const fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the number of stars.
    #[must_use]
    pub const fn max_rating(mut self, max_rating: i32) -> Self {
        self.max_rating = max_rating;
        self
    }

    /// Set whether the widget is disabled.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether the widget is read-only.
    #[must_use]
    pub const fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: RatingTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the rating.
    #[must_use]
    pub const fn get_rating(&self) -> Option<f64> {
        self.rating
    }

    /// Get the configured maximum.
    #[must_use]
    pub const fn get_max_rating(&self) -> i32 {
        self.max_rating
    }

    /// Get disabled state.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Get read-only state.
    #[must_use]
    pub const fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Get the hover preview.
    #[must_use]
    pub const fn hover_preview(&self) -> Option<u32> {
        self.hover
    }

    /// Get the theme.
    #[must_use]
    pub const fn get_theme(&self) -> &RatingTheme {
        &self.theme
    }

    /// Mutable access to the theme.
    pub fn theme_mut(&mut self) -> &mut RatingTheme {
        &mut self.theme
    }

    /// Set or clear the rating.
    pub fn set_rating(&mut self, rating: Option<f64>) {
        self.rating = rating;
    }

    /// Set the number of stars.
    pub fn set_max_rating(&mut self, max_rating: i32) {
        self.max_rating = max_rating;
    }

    /// Set disabled state. Disabling drops any hover preview.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.drop_stale_hover();
    }

    /// Set read-only state. Read-only drops any hover preview.
    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        self.drop_stale_hover();
    }

    fn drop_stale_hover(&mut self) {
        if !self.is_interactive_state() {
            self.hover = None;
        }
    }

    /// Apply an HTML attribute. Returns `false` for attributes the widget
    /// does not observe.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match name {
            "rating" => self.set_rating(parse_rating(value)),
            "maxrating" | "max-rating" | "maxRating" => {
                self.set_max_rating(parse_max_rating(value));
            }
            "disabled" => self.set_disabled(value != "false"),
            "readonly" => self.set_readonly(value != "false"),
            _ => return false,
        }
        true
    }

    /// Remove an HTML attribute, restoring the property default.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        match name {
            "rating" => self.set_rating(None),
            "maxrating" | "max-rating" | "maxRating" => self.set_max_rating(DEFAULT_MAX_RATING),
            "disabled" => self.set_disabled(false),
            "readonly" => self.set_readonly(false),
            _ => return false,
        }
        true
    }

    const fn is_interactive_state(&self) -> bool {
        !self.disabled && !self.readonly
    }

    /// Number of rendered stars.
    #[must_use]
    pub fn star_count(&self) -> usize {
        usize::try_from(self.max_rating).unwrap_or(0)
    }

    /// Rating the stars currently show: the hover preview while interactive,
    /// otherwise the rating.
    #[must_use]
    pub fn effective_rating(&self) -> Option<f64> {
        match self.hover {
            Some(preview) if self.is_interactive_state() => Some(f64::from(preview)),
            _ => self.rating,
        }
    }

    /// Fill state of the star at `index`.
    #[must_use]
    pub fn star_fill(&self, index: usize) -> StarFill {
        let Some(value) = self.effective_rating() else {
            return StarFill::Unrated;
        };
        let star_value = index as f64 + 1.0;
        let full = value.floor();
        if star_value <= full {
            StarFill::Filled
        } else if star_value == full + 1.0 && value % 1.0 != 0.0 {
            StarFill::Partial
        } else {
            StarFill::Unrated
        }
    }

    /// Inline partial width for the star at `index`, if it is partial.
    #[must_use]
    pub fn partial_width(&self, index: usize) -> Option<&'static str> {
        (self.star_fill(index) == StarFill::Partial).then_some(PARTIAL_FILL_WIDTH)
    }

    /// Classes of the star at `index`.
    #[must_use]
    pub fn star_classes(&self, index: usize) -> Vec<&'static str> {
        let mut classes = vec!["star"];
        if !self.is_interactive_state() {
            classes.extend(["disabled", "readonly"]);
        }
        classes.push(self.star_fill(index).class_name());
        classes
    }

    /// Status line under the stars. `None` when not interactive.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        if !self.is_interactive_state() {
            return None;
        }
        let text = match (self.hover, self.rating) {
            (Some(n), _) => format!("Preview: {n} star{}", plural(n != 1)),
            (None, Some(r)) => {
                format!("Current: {} star{}", js_number(r), plural(r != 1.0))
            }
            (None, None) => "Click to rate".to_string(),
        };
        Some(text)
    }

    /// Handle a click on the star at `index`.
    ///
    /// Returns the selection to notify the host with. The rating itself is
    /// left unchanged.
    pub fn on_star_click(&mut self, index: usize) -> Option<RatingChanged> {
        if !self.is_interactive_state() || index >= self.star_count() {
            return None;
        }
        let rating = u32::try_from(index + 1).ok()?;
        log::debug!("star {index} clicked, emitting rating {rating}");
        Some(RatingChanged { rating })
    }

    /// Handle the pointer entering the star at `index`. Returns `true` when
    /// the preview changed.
    pub fn on_star_hover_enter(&mut self, index: usize) -> bool {
        if !self.is_interactive_state() || index >= self.star_count() {
            return false;
        }
        let preview = u32::try_from(index + 1).ok();
        if self.hover == preview {
            return false;
        }
        log::debug!("hover preview {preview:?}");
        self.hover = preview;
        true
    }

    /// Handle the pointer leaving the star row. Returns `true` when a
    /// preview was cleared.
    pub fn on_star_hover_leave(&mut self) -> bool {
        if !self.is_interactive_state() {
            return false;
        }
        let cleared = self.hover.take().is_some();
        if cleared {
            log::debug!("hover preview cleared");
        }
        cleared
    }

    /// Render the widget as an element tree.
    #[must_use]
    pub fn render(&self) -> Element {
        let stars = (0..self.star_count()).map(|index| {
            let mut star = Element::new("div")
                .class(&self.star_classes(index).join(" "))
                .part("star")
                .attr("data-index", index.to_string());
            if let Some(width) = self.partial_width(index) {
                star = star.style("--partial-width", width);
            }
            star.raw(STAR_SVG)
        });

        let mut container = Element::new("div")
            .class("rating-container")
            .part("container")
            .children(stars);
        if let Some(text) = self.display_text() {
            container = container.child(
                Element::new("div")
                    .class("rating-display")
                    .part("rating-display")
                    .text(text),
            );
        }
        log::trace!(
            "rendered {} stars, effective rating {:?}",
            self.star_count(),
            self.effective_rating()
        );
        container
    }

    fn star_size(&self) -> f32 {
        self.theme.star_size_px()
    }

    fn spacing(&self) -> f32 {
        self.theme.spacing_px()
    }

    fn row_width(&self) -> f32 {
        let n = self.star_count() as f32;
        if n == 0.0 {
            0.0
        } else {
            n.mul_add(self.star_size(), (n - 1.0) * self.spacing())
        }
    }

    /// Bounds of the star at `index` after layout.
    #[must_use]
    pub fn star_rect(&self, index: usize) -> Rect {
        let size = self.star_size();
        let x = (index as f32).mul_add(size + self.spacing(), self.bounds.x);
        Rect::new(x, self.bounds.y, size, size)
    }

    fn row_rect(&self) -> Rect {
        Rect::new(self.bounds.x, self.bounds.y, self.row_width(), self.star_size())
    }

    /// Star under `point`, if any. Gaps between stars hit nothing.
    #[must_use]
    pub fn star_at(&self, point: Point) -> Option<usize> {
        (0..self.star_count()).find(|&i| self.star_rect(i).contains_point(&point))
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            size: TEXT_SIZE,
            color: self.theme.text_color,
            weight: FontWeight::Medium,
        }
    }
}

fn plural(many: bool) -> &'static str {
    if many {
        "s"
    } else {
        ""
    }
}

/// Format a number the way a JavaScript template literal does.
fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn parse_rating(value: &str) -> Option<f64> {
    match value.trim() {
        "" | "null" | "undefined" => None,
        v => v.parse().ok(),
    }
}

fn parse_max_rating(value: &str) -> i32 {
    match value.trim().parse::<i32>() {
        Ok(0) | Err(_) => DEFAULT_MAX_RATING,
        Ok(n) => n,
    }
}

impl Widget for StarRating {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let text_width = self
            .display_text()
            .map_or(0.0, |t| (t.chars().count() as f32).mul_add(TEXT_CHAR_WIDTH, TEXT_GAP));
        let height = self.star_size().max(TEXT_SIZE);
        constraints.constrain(Size::new(self.row_width() + text_width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let hovered = self
            .hover
            .filter(|_| self.is_interactive_state())
            .and_then(|n| usize::try_from(n).ok())
            .map(|n| n - 1);

        for index in 0..self.star_count() {
            let rect = self.star_rect(index);
            let glyph = star_polygon(rect);
            if hovered == Some(index) {
                canvas.fill_polygon(&glyph, self.theme.hover_color);
                continue;
            }
            match self.star_fill(index) {
                StarFill::Filled => canvas.fill_polygon(&glyph, self.theme.star_color),
                StarFill::Unrated => canvas.fill_polygon(&glyph, self.theme.unrated_color),
                StarFill::Partial => {
                    canvas.fill_polygon(&glyph, self.theme.unrated_color);
                    canvas.push_clip(rect.left_fraction(PARTIAL_FRACTION));
                    canvas.fill_polygon(&glyph, self.theme.star_color);
                    canvas.pop_clip();
                }
            }
        }

        if let Some(text) = self.display_text() {
            let row = self.row_rect();
            let baseline = Point::new(
                row.right() + TEXT_GAP,
                row.center().y + TEXT_SIZE / 2.0,
            );
            canvas.draw_text(&text, baseline, &self.text_style());
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseMove { position } => {
                if let Some(index) = self.star_at(*position) {
                    self.on_star_hover_enter(index);
                } else if !self.row_rect().contains_point(position) {
                    // Gaps inside the row keep the preview.
                    self.on_star_hover_leave();
                }
                None
            }
            Event::MouseLeave => {
                self.on_star_hover_leave();
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                let index = self.star_at(*position)?;
                self.on_star_click(index)
                    .map(|msg| Box::new(msg) as Box<dyn Any + Send>)
            }
            Event::MouseDown { .. } | Event::MouseUp { .. } | Event::MouseEnter => None,
        }
    }

    fn is_interactive(&self) -> bool {
        self.is_interactive_state()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        if self.is_interactive_state() {
            AccessibleRole::RadioGroup
        } else {
            AccessibleRole::Image
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

const STAR_COUNT_CHECK: &str = "one star per rating step";
const FILL_CLASS_CHECK: &str = "exactly one fill class per star";
const MARKERS_CHECK: &str = "non-interactive stars carry disabled and readonly";

impl Brick for StarRating {
    fn brick_name(&self) -> &'static str {
        "StarRating"
    }

    fn assertions(&self) -> Vec<BrickAssertion> {
        let mut assertions = vec![
            BrickAssertion::element_present(".rating-container"),
            BrickAssertion::Custom(STAR_COUNT_CHECK),
            BrickAssertion::Custom(FILL_CLASS_CHECK),
        ];
        if self.is_interactive_state() {
            assertions.push(BrickAssertion::TextVisible);
        } else {
            assertions.push(BrickAssertion::Custom(MARKERS_CHECK));
        }
        assertions
    }

    fn verify(&self) -> BrickVerification {
        let tree = self.render();
        let stars = tree.find_all(|e| e.has_class("star"));
        let mut verification = BrickVerification::new();

        for assertion in self.assertions() {
            let outcome = match &assertion {
                BrickAssertion::ElementPresent(selector) => {
                    let class = selector.trim_start_matches('.');
                    tree.find(|e| e.has_class(class))
                        .map(|_| ())
                        .ok_or_else(|| format!("no element matches {selector}"))
                }
                BrickAssertion::TextVisible => tree
                    .find(|e| e.has_class("rating-display"))
                    .filter(|e| !e.text_content().is_empty())
                    .map(|_| ())
                    .ok_or_else(|| "display text missing".to_string()),
                BrickAssertion::Custom(STAR_COUNT_CHECK) => {
                    if stars.len() == self.star_count() {
                        Ok(())
                    } else {
                        Err(format!("{} stars for max {}", stars.len(), self.max_rating))
                    }
                }
                BrickAssertion::Custom(FILL_CLASS_CHECK) => {
                    let fill_classes = |e: &Element| {
                        ["filled", "partial", "unrated"]
                            .iter()
                            .filter(|c| e.has_class(c))
                            .count()
                    };
                    match stars.iter().position(|s| fill_classes(s) != 1) {
                        None => Ok(()),
                        Some(i) => Err(format!("star {i} has classes {:?}", stars[i].class_attr())),
                    }
                }
                BrickAssertion::Custom(MARKERS_CHECK) => {
                    if stars
                        .iter()
                        .all(|s| s.has_class("disabled") && s.has_class("readonly"))
                    {
                        Ok(())
                    } else {
                        Err("star missing a mode marker".to_string())
                    }
                }
                BrickAssertion::Custom(other) => Err(format!("unknown check {other}")),
            };
            verification.check(assertion, outcome);
        }
        verification
    }

    fn to_html(&self) -> String {
        self.render().to_html()
    }

    fn to_css(&self) -> String {
        self.theme.stylesheet()
    }
}
