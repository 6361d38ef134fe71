//! Story catalog: the rating widget in each of its documented states.
//!
//! Every [`Story`] groups one or more labelled widget instances. The book
//! renders them to a static gallery page where each `<star-rating>` carries
//! its shadow content as a declarative shadow root, so the page displays
//! without any script.

use serde::Serialize;
use starlet_core::{Brick, Element};
use starlet_widgets::{RatingChanged, RatingTheme, StarRating, ThemeError, STAR_RATING_TAG};
use thiserror::Error;

/// Errors raised by the story book.
#[derive(Debug, Error)]
pub enum StoryError {
    /// No story with that name
    #[error("unknown story {0:?}")]
    UnknownStory(String),
    /// Story has no entry with that id
    #[error("story {story:?} has no entry {entry:?}")]
    UnknownEntry {
        /// Story name
        story: String,
        /// Entry id
        entry: String,
    },
    /// A theme override is invalid
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// One labelled widget instance inside a story.
#[derive(Debug, Clone, Serialize)]
pub struct StoryEntry {
    /// Caption shown above the widget
    pub label: String,
    /// Element id, for entries other entries refer to
    pub id: Option<String>,
    /// The widget
    pub widget: StarRating,
}

impl StoryEntry {
    fn new(label: impl Into<String>, widget: StarRating) -> Self {
        Self {
            label: label.into(),
            id: None,
            widget,
        }
    }

    fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Host element with the widget's state as attributes and its shadow
    /// content inlined. Theme hooks that differ from the default go on the
    /// host's inline style, where they outlive a re-render of the shadow
    /// root.
    #[must_use]
    pub fn host_element(&self) -> Element {
        let widget = &self.widget;
        let mut host = Element::new(STAR_RATING_TAG);
        for (name, value) in widget.get_theme().changed_variables(&RatingTheme::default()) {
            host = host.style(name, value);
        }
        if let Some(id) = &self.id {
            host = host.attr("id", id.as_str());
        }
        if let Some(rating) = widget.get_rating() {
            host = host.attr("rating", rating.to_string());
        }
        host = host.attr("maxrating", widget.get_max_rating().to_string());
        if widget.is_disabled() {
            host = host.attr("disabled", "");
        }
        if widget.is_readonly() {
            host = host.attr("readonly", "");
        }
        host.raw(format!(
            r#"<template shadowrootmode="open"><style>{}</style>{}</template>"#,
            widget.to_css(),
            widget.to_html()
        ))
    }
}

/// A named group of widget instances.
#[derive(Debug, Clone, Serialize)]
pub struct Story {
    /// Identifier, kebab-case
    pub name: &'static str,
    /// Display title
    pub title: &'static str,
    /// Optional explanation shown under the title
    pub description: Option<&'static str>,
    /// Widget instances
    pub entries: Vec<StoryEntry>,
    /// `(source id, target id)`: a selection on the source sets the
    /// target's rating
    pub links: Vec<(String, String)>,
}

impl Story {
    fn new(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            description: None,
            entries: Vec::new(),
            links: Vec::new(),
        }
    }

    fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn entry(mut self, entry: StoryEntry) -> Self {
        self.entries.push(entry);
        self
    }

    fn link(mut self, source: &str, target: &str) -> Self {
        self.links.push((source.to_string(), target.to_string()));
        self
    }

    /// Entry with the given id.
    #[must_use]
    pub fn entry_by_id(&self, id: &str) -> Option<&StoryEntry> {
        self.entries.iter().find(|e| e.id.as_deref() == Some(id))
    }

    fn render(&self) -> Element {
        let mut section = Element::new("section")
            .class("story")
            .attr("id", self.name)
            .child(Element::new("h2").text(self.title));
        if let Some(description) = self.description {
            section = section.child(Element::new("p").class("story-description").text(description));
        }
        section.children(self.entries.iter().map(|entry| {
            Element::new("div")
                .class("story-entry")
                .child(Element::new("strong").text(entry.label.as_str()))
                .child(entry.host_element())
        }))
    }
}

/// The full catalog.
#[derive(Debug, Clone, Serialize)]
pub struct StoryBook {
    stories: Vec<Story>,
}

fn themed(base: &RatingTheme, overrides: &[(&str, &str)]) -> Result<RatingTheme, ThemeError> {
    overrides
        .iter()
        .try_fold(base.clone(), |theme, (name, value)| theme.with_variable(name, value))
}

fn rated(rating: f64, theme: &RatingTheme) -> StarRating {
    StarRating::new().rating(rating).theme(theme.clone())
}

impl StoryBook {
    /// Build the catalog, with every widget starting from `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if a story's theme override does not apply.
    pub fn new(base: &RatingTheme) -> Result<Self, StoryError> {
        let plain = || StarRating::new().theme(base.clone());

        let fractional = [
            (5.0, "5.0 stars:"),
            (4.5, "4.5 stars (half):"),
            (4.0, "4.0 stars:"),
            (3.5, "3.5 stars (half):"),
            (3.23, "3.23 stars:"),
            (3.0, "3.0 stars:"),
            (2.5, "2.5 stars (half):"),
            (2.0, "2.0 stars:"),
            (1.5, "1.5 stars (half):"),
            (1.0, "1.0 stars:"),
        ]
        .into_iter()
        .fold(Story::new("fractional-ratings", "Fractional Ratings"), |story, (r, label)| {
            story.entry(StoryEntry::new(label, rated(r, base)))
        });

        let mut sizes = Story::new("different-sizes", "Different Sizes");
        for (size, label) in [
            ("16px", "Small (16px):"),
            ("24px", "Medium (24px - default):"),
            ("32px", "Large (32px):"),
            ("48px", "Extra Large (48px):"),
        ] {
            let theme = themed(base, &[("--rating-star-size", size)])?;
            sizes = sizes.entry(StoryEntry::new(label, rated(3.5, &theme)));
        }

        let mut colors = Story::new("custom-colors", "Custom Colors");
        for (star, hover, label) in [
            ("#ffd700", "#ffed4e", "Gold (default):"),
            ("#ff4444", "#ff6666", "Red:"),
            ("#4444ff", "#6666ff", "Blue:"),
            ("#44ff44", "#66ff66", "Green:"),
        ] {
            let theme = themed(
                base,
                &[("--rating-star-color", star), ("--rating-star-hover-color", hover)],
            )?;
            colors = colors.entry(StoryEntry::new(label, rated(3.5, &theme)));
        }

        let stories = vec![
            Story::new("default", "Default").entry(StoryEntry::new("Rating:", rated(3.5, base))),
            Story::new("unrated", "Unrated").entry(StoryEntry::new("Rating:", plain())),
            Story::new("readonly", "Readonly")
                .entry(StoryEntry::new("Rating:", rated(4.2, base).readonly(true))),
            Story::new("disabled", "Disabled")
                .entry(StoryEntry::new("Rating:", rated(2.7, base).disabled(true))),
            fractional,
            sizes,
            colors,
            Story::new("interactive-demo", "Interactive Demo")
                .describe(
                    "Hover over stars to see preview, click to set rating. The component \
                     shows current rating and preview text.",
                )
                .entry(
                    StoryEntry::new("Interactive Rating with Hover Preview:", rated(0.0, base))
                        .with_id("interactive-rating"),
                )
                .entry(
                    StoryEntry::new(
                        "Readonly Display (updates automatically):",
                        rated(0.0, base).readonly(true),
                    )
                    .with_id("readonly-display"),
                )
                .link("interactive-rating", "readonly-display"),
            Story::new("max-rating-variations", "Max Rating Variations")
                .entry(StoryEntry::new("3 stars max:", rated(2.5, base).max_rating(3)))
                .entry(StoryEntry::new("5 stars max (default):", rated(3.5, base).max_rating(5)))
                .entry(StoryEntry::new("10 stars max:", rated(7.3, base).max_rating(10))),
            Story::new("hover-feedback-demo", "Hover Feedback Demo")
                .describe(
                    "Hover over the stars below to see the preview functionality in action. \
                     The text will show \"Preview: X stars\" as you hover, and \"Current: X \
                     stars\" when not hovering.",
                )
                .entry(StoryEntry::new("Hover Feedback Demo:", rated(2.5, base)))
                .entry(StoryEntry::new("Unrated with Hover Preview:", plain())),
        ];

        log::debug!("story book built with {} stories", stories.len());
        Ok(Self { stories })
    }

    /// All stories in display order.
    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Story by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.name == name)
    }

    /// Deliver a selection made on entry `source` of `story`: every entry
    /// linked from it takes the selected rating. The source itself keeps
    /// its rating. Returns the number of updated entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the story or the source entry does not exist.
    pub fn apply_rating(
        &mut self,
        story: &str,
        source: &str,
        changed: RatingChanged,
    ) -> Result<usize, StoryError> {
        let story_ref = self
            .stories
            .iter_mut()
            .find(|s| s.name == story)
            .ok_or_else(|| StoryError::UnknownStory(story.to_string()))?;
        if story_ref.entry_by_id(source).is_none() {
            return Err(StoryError::UnknownEntry {
                story: story.to_string(),
                entry: source.to_string(),
            });
        }

        let targets: Vec<String> = story_ref
            .links
            .iter()
            .filter(|(from, _)| from == source)
            .map(|(_, to)| to.clone())
            .collect();
        let mut updated = 0;
        for entry in &mut story_ref.entries {
            if entry.id.as_ref().is_some_and(|id| targets.contains(id)) {
                entry.widget.set_rating(Some(f64::from(changed.rating)));
                updated += 1;
            }
        }
        log::info!("{story}: {source} selected {}, {updated} linked", changed.rating);
        Ok(updated)
    }

    /// Render one story as an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no story with that name.
    pub fn render_story(&self, name: &str) -> Result<String, StoryError> {
        self.get(name)
            .map(|s| s.render().to_html())
            .ok_or_else(|| StoryError::UnknownStory(name.to_string()))
    }

    /// Render the whole catalog as a standalone HTML page.
    #[must_use]
    pub fn render_gallery(&self) -> String {
        let body: String = self.stories.iter().map(|s| s.render().to_html()).collect();
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Star Rating</title>\n<style>{GALLERY_CSS}</style>\n</head>\n\
             <body>\n<h1>Star Rating</h1>\n{body}\n</body>\n</html>\n"
        )
    }
}

const GALLERY_CSS: &str = "body { font-family: sans-serif; margin: 2rem; } \
.story { margin-bottom: 2rem; } \
.story-description { color: #666; font-size: 14px; margin-bottom: 10px; } \
.story-entry { display: flex; flex-direction: column; gap: 4px; margin-bottom: 20px; }";
