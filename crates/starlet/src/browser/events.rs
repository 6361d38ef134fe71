//! Browser event handling: locating the star under a pointer event and
//! building the outgoing `rating` event.

use starlet_widgets::{RatingChanged, RATING_EVENT};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Event};

/// Star index of the `.star` element the event targets, if any.
///
/// Pointer events usually land on the star's SVG path, so this walks up
/// from the target to the nearest star.
pub fn star_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let star = target.closest(".star").ok()??;
    star.get_attribute("data-index")?.parse().ok()
}

/// True if the event targets the status line.
pub fn targets_display(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|e| e.closest(".rating-display").ok().flatten())
        .is_some()
}

/// `{ rating }` detail object.
pub fn rating_detail(changed: RatingChanged) -> Result<JsValue, JsValue> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(
        &detail,
        &JsValue::from_str("rating"),
        &JsValue::from(changed.rating),
    )?;
    Ok(detail.into())
}

/// The `rating` event: bubbles and crosses shadow boundaries.
pub fn rating_event(changed: RatingChanged) -> Result<CustomEvent, JsValue> {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_composed(true);
    init.set_detail(&rating_detail(changed)?);
    CustomEvent::new_with_event_init_dict(RATING_EVENT, &init)
}
