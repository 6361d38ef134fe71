//! Behavior of the rating widget as a page sees it.

use proptest::prelude::*;
use starlet_test::Harness;
use starlet_widgets::{RatingTheme, StarRating};

fn mount(markup: &str) -> Harness {
    Harness::fixture(markup).expect("valid fixture")
}

// ===== Defaults =====

#[test]
fn renders_with_default_props() {
    let harness = mount("<star-rating></star-rating>");
    let widget = harness.widget();
    assert_eq!(widget.get_rating(), None);
    assert!(!widget.is_disabled());
    assert!(!widget.is_readonly());
    assert_eq!(widget.get_max_rating(), 5);
    harness.assert_exists("[part=container]").assert_valid();
}

#[test]
fn renders_star_count_from_max_rating() {
    mount(r#"<star-rating maxRating="3"></star-rating>"#).assert_count(".star", 3);
    mount(r#"<star-rating maxrating="10"></star-rating>"#).assert_count(".star", 10);
}

#[test]
fn every_star_exposes_part_and_glyph() {
    let harness = mount("<star-rating></star-rating>");
    harness.assert_count("[part=star]", 5);
    let html = harness.tree().to_html();
    assert_eq!(html.matches("<svg").count(), 5);
}

// ===== Fill =====

#[test]
fn shows_unrated_state_when_rating_is_null() {
    mount(r#"<star-rating rating="null"></star-rating>"#)
        .assert_count(".star.unrated", 5)
        .assert_text(".rating-display", "Click to rate");
}

#[test]
fn shows_filled_stars_for_whole_ratings() {
    mount(r#"<star-rating rating="3"></star-rating>"#)
        .assert_count(".star.filled", 3)
        .assert_count(".star.unrated", 2)
        .assert_count(".star.partial", 0);
}

#[test]
fn shows_partial_star_for_fractional_rating() {
    for rating in ["3.5", "3.23"] {
        mount(&format!(r#"<star-rating rating="{rating}"></star-rating>"#))
            .assert_count(".star.filled", 3)
            .assert_count(".star.partial", 1)
            .assert_count(".star.unrated", 1);
    }
}

#[test]
fn partial_star_width_is_fixed_at_half() {
    for rating in ["3.23", "3.5", "3.7"] {
        mount(&format!(r#"<star-rating rating="{rating}"></star-rating>"#))
            .assert_style(".star.partial", "--partial-width", "50%")
            .assert_exists("[data-index='3'].partial");
    }
    mount(r#"<star-rating rating="3"></star-rating>"#).assert_not_exists("[style]");
}

#[test]
fn three_and_a_half_of_five() {
    mount(r#"<star-rating rating="3.5" maxRating="5"></star-rating>"#)
        .assert_exists("[data-index='0'].filled")
        .assert_exists("[data-index='2'].filled")
        .assert_exists("[data-index='3'].partial")
        .assert_exists("[data-index='4'].unrated")
        .assert_text(".rating-display", "Current: 3.5 stars");
}

// ===== Modes =====

#[test]
fn disabled_marks_every_star_with_both_markers() {
    mount("<star-rating disabled></star-rating>")
        .assert_count(".star.disabled", 5)
        .assert_count(".star.readonly", 5)
        .assert_not_exists(".rating-display");
}

#[test]
fn readonly_marks_every_star_with_both_markers() {
    mount("<star-rating readonly></star-rating>")
        .assert_count(".star.disabled.readonly", 5)
        .assert_not_exists(".rating-display")
        .assert_valid();
}

#[test]
fn does_not_fire_when_disabled() {
    let mut harness = mount("<star-rating disabled></star-rating>");
    harness.click(".star");
    harness.assert_emitted(&[]);
}

#[test]
fn does_not_fire_when_readonly() {
    let mut harness = mount("<star-rating readonly></star-rating>");
    harness.click(".star");
    harness.assert_emitted(&[]);
}

#[test]
fn hover_is_ignored_when_not_interactive() {
    let mut harness = mount(r#"<star-rating rating="2" readonly></star-rating>"#);
    harness.hover_star(4);
    harness.assert_count(".star.filled", 2);
    assert_eq!(harness.widget().hover_preview(), None);
}

// ===== Events =====

#[test]
fn fires_rating_event_when_star_is_clicked() {
    let mut harness = mount("<star-rating></star-rating>");
    harness.click(".star");
    harness.assert_emitted(&[1]);
}

#[test]
fn click_on_last_of_three_reports_three() {
    let mut harness = mount(r#"<star-rating maxRating="3"></star-rating>"#);
    harness.click_star(2);
    harness.assert_emitted(&[3]);
    // the host has not accepted it yet
    assert_eq!(harness.widget().get_rating(), None);
}

#[test]
fn click_does_not_change_rating_until_host_sets_it() {
    let mut harness = mount(r#"<star-rating rating="1"></star-rating>"#);
    harness.click_star(3);
    harness.leave();
    harness.assert_text(".rating-display", "Current: 1 star");

    let selected = harness.take_emitted()[0].rating;
    harness.set_attribute("rating", &selected.to_string());
    harness.assert_text(".rating-display", "Current: 4 stars");
}

// ===== Hover =====

#[test]
fn hover_previews_and_leave_restores() {
    let mut harness = mount(r#"<star-rating rating="3"></star-rating>"#);
    harness.hover("[data-index='1']");
    harness
        .assert_text(".rating-display", "Preview: 2 stars")
        .assert_count(".star.filled", 2)
        .assert_emitted(&[]);
    assert_eq!(harness.widget().get_rating(), Some(3.0));

    harness.hover_star(0);
    harness.assert_text(".rating-display", "Preview: 1 star");

    harness.leave();
    harness
        .assert_text(".rating-display", "Current: 3 stars")
        .assert_count(".star.filled", 3);
}

#[test]
fn moving_across_the_gap_keeps_the_preview() {
    let mut harness = mount("<star-rating></star-rating>");
    harness.hover_star(1);
    let gap_x = harness.widget().star_rect(1).right() + 1.0;
    harness.move_to(gap_x, 12.0);
    harness.assert_text(".rating-display", "Preview: 2 stars");
    harness.hover_star(2);
    harness.assert_text(".rating-display", "Preview: 3 stars");
}

#[test]
fn disabling_while_hovering_drops_the_preview() {
    let mut harness = mount(r#"<star-rating rating="1"></star-rating>"#);
    harness.hover_star(4);
    harness.set_attribute("disabled", "");
    harness.remove_attribute("disabled");
    harness.assert_text(".rating-display", "Current: 1 star");
}

// ===== Display =====

#[test]
fn shows_rating_display_for_interactive_component() {
    mount("<star-rating></star-rating>")
        .assert_exists("[part=rating-display]")
        .assert_text(".rating-display", "Click to rate");
}

#[test]
fn shows_current_rating_in_display() {
    mount(r#"<star-rating rating="3"></star-rating>"#)
        .assert_text(".rating-display", "Current: 3 stars");
    mount(r#"<star-rating rating="1"></star-rating>"#)
        .assert_text(".rating-display", "Current: 1 star");
}

// ===== Styling =====

#[test]
fn uses_default_style_hooks() {
    let css = StarRating::new().get_theme().stylesheet();
    assert!(css.contains("--rating-star-color: #ffd700;"));
    assert!(css.contains("--rating-star-unrated-color: #d3d3d3;"));
}

#[test]
fn custom_theme_flows_into_stylesheet() {
    let theme = RatingTheme::default()
        .with_variable("--rating-star-color", "#ff4444")
        .and_then(|t| t.with_variable("--rating-star-size", "48px"))
        .expect("valid hooks");
    let harness = Harness::new(StarRating::new().theme(theme));
    let css = harness.widget().get_theme().stylesheet();
    assert!(css.contains("--rating-star-color: #ff4444;"));
    assert_eq!(harness.widget().star_rect(1).x, 50.0);
}

// ===== Properties =====

proptest! {
    #[test]
    fn unrated_widget_has_all_unrated(n in 1i32..15) {
        let harness = Harness::new(StarRating::new().max_rating(n));
        prop_assert_eq!(harness.query_all(".star.unrated").len(), n as usize);
        prop_assert_eq!(harness.text(".rating-display"), "Click to rate");
    }

    #[test]
    fn clicking_star_i_emits_i_plus_one(i in 0usize..8, extra in 0usize..4) {
        let max = (i + 1 + extra) as i32;
        let mut harness = Harness::new(StarRating::new().max_rating(max));
        harness.click_star(i);
        prop_assert_eq!(harness.emitted().len(), 1);
        prop_assert_eq!(harness.emitted()[0].rating as usize, i + 1);
    }

    #[test]
    fn hover_preview_text(i in 0usize..5) {
        let mut harness = Harness::new(StarRating::new());
        harness.hover_star(i);
        let expected = if i == 0 {
            "Preview: 1 star".to_string()
        } else {
            format!("Preview: {} stars", i + 1)
        };
        prop_assert_eq!(harness.text(".rating-display"), expected);
        prop_assert!(harness.emitted().is_empty());
    }
}
