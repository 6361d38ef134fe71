//! The `<star-rating>` element: a [`StarRating`] mounted into a host
//! element's shadow root.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use starlet_core::Brick;
use starlet_widgets::{RatingChanged, StarRating, OBSERVED_ATTRIBUTES, STAR_RATING_TAG};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, Event, EventTarget, HtmlElement, MutationObserver, MutationObserverInit, MutationRecord,
    ShadowRoot, ShadowRootInit, ShadowRootMode,
};

use super::{dom, events};

static INIT: Once = Once::new();

thread_local! {
    static MOUNTED: RefCell<Vec<StarRatingElement>> = const { RefCell::new(Vec::new()) };
}

/// Install the panic hook and the console logger. Runs once.
#[wasm_bindgen(start)]
pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"starlet: logger already installed".into());
        }
    });
}

/// Mount every `<star-rating>` in the document that is not mounted yet.
/// Returns the number of newly mounted elements.
#[wasm_bindgen]
pub fn upgrade_all() -> Result<usize, JsValue> {
    let document = window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;
    let hosts = document.query_selector_all(STAR_RATING_TAG)?;

    let mut count = 0;
    for i in 0..hosts.length() {
        let Some(host) = hosts.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let node: &web_sys::Node = &host;
        let mounted = MOUNTED.with(|m| {
            m.borrow()
                .iter()
                .any(|e| e.inner.borrow().host.is_same_node(Some(node)))
        });
        if mounted {
            continue;
        }
        let element = StarRatingElement::new(host)?;
        MOUNTED.with(|m| m.borrow_mut().push(element));
        count += 1;
    }
    log::info!("mounted {count} {STAR_RATING_TAG} elements");
    Ok(count)
}

struct Inner {
    document: Document,
    host: HtmlElement,
    root: ShadowRoot,
    widget: StarRating,
}

impl Inner {
    fn render(&self) -> Result<(), JsValue> {
        if !self.widget.can_render() {
            let verification = self.widget.verify();
            log::error!("{STAR_RATING_TAG} failed verification: {:?}", verification.failed);
            return Err(JsValue::from_str("star rating failed verification"));
        }
        dom::replace_shadow_content(
            &self.document,
            &self.root,
            &self.widget.to_css(),
            &self.widget.render(),
        )
    }

    fn rerender(&self) {
        if let Err(err) = self.render() {
            log::error!("render failed: {err:?}");
        }
    }

    fn apply_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.widget.set_attribute(name, value),
            None => self.widget.remove_attribute(name),
        }
    }
}

fn dispatch_rating(host: &HtmlElement, changed: RatingChanged) {
    match events::rating_event(changed) {
        Ok(event) => {
            if let Err(err) = host.dispatch_event(&event) {
                log::error!("rating dispatch failed: {err:?}");
            }
        }
        Err(err) => log::error!("rating event construction failed: {err:?}"),
    }
}

/// A rating widget attached to a host element.
#[wasm_bindgen]
pub struct StarRatingElement {
    inner: Rc<RefCell<Inner>>,
    observer: MutationObserver,
    click_callback: Closure<dyn FnMut(Event)>,
    mouseover_callback: Closure<dyn FnMut(Event)>,
    mouseleave_callback: Closure<dyn FnMut(Event)>,
    _observer_callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

#[wasm_bindgen]
impl StarRatingElement {
    /// Mount onto `host`, reusing its shadow root when it already has one.
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<StarRatingElement, JsValue> {
        init();

        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;
        let root = match host.shadow_root() {
            Some(root) => root,
            None => host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?,
        };

        let mut widget = StarRating::new();
        for name in OBSERVED_ATTRIBUTES {
            if let Some(value) = host.get_attribute(name) {
                widget.set_attribute(name, &value);
            }
        }
        // Inline hooks already win over `:host`; mirror them for painting.
        if let Some(style) = host.get_attribute("style") {
            if let Err(err) = widget.theme_mut().apply_inline_style(&style) {
                log::warn!("{STAR_RATING_TAG} host style ignored: {err}");
            }
        }

        let inner = Rc::new(RefCell::new(Inner {
            document,
            host: host.clone(),
            root: root.clone(),
            widget,
        }));
        inner.borrow().render()?;

        let shared = Rc::clone(&inner);
        let click_callback = Closure::new(move |e: Event| {
            let Some(index) = events::star_index(&e) else {
                return;
            };
            // Released before dispatch: listeners may call back into us.
            let changed = shared.borrow_mut().widget.on_star_click(index);
            if let Some(changed) = changed {
                let host = shared.borrow().host.clone();
                dispatch_rating(&host, changed);
            }
        });
        root.add_event_listener_with_callback("click", click_callback.as_ref().unchecked_ref())?;

        let shared = Rc::clone(&inner);
        let mouseover_callback = Closure::new(move |e: Event| {
            let mut inner = shared.borrow_mut();
            let changed = match events::star_index(&e) {
                Some(index) => inner.widget.on_star_hover_enter(index),
                None if events::targets_display(&e) => inner.widget.on_star_hover_leave(),
                None => false,
            };
            if changed {
                inner.rerender();
            }
        });
        root.add_event_listener_with_callback(
            "mouseover",
            mouseover_callback.as_ref().unchecked_ref(),
        )?;

        let shared = Rc::clone(&inner);
        let mouseleave_callback = Closure::new(move |_: Event| {
            let mut inner = shared.borrow_mut();
            if inner.widget.on_star_hover_leave() {
                inner.rerender();
            }
        });
        host.add_event_listener_with_callback(
            "mouseleave",
            mouseleave_callback.as_ref().unchecked_ref(),
        )?;

        let shared = Rc::clone(&inner);
        let observer_callback =
            Closure::new(move |records: js_sys::Array, _: MutationObserver| {
                let mut inner = shared.borrow_mut();
                let mut changed = false;
                for record in records.iter() {
                    let Ok(record) = record.dyn_into::<MutationRecord>() else {
                        continue;
                    };
                    let Some(name) = record.attribute_name() else {
                        continue;
                    };
                    let value = inner.host.get_attribute(&name);
                    changed |= inner.apply_attribute(&name, value.as_deref());
                }
                if changed {
                    inner.rerender();
                }
            });
        let observer = MutationObserver::new(observer_callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_attributes(true);
        let filter: js_sys::Array = OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect();
        options.set_attribute_filter(&filter);
        observer.observe_with_options(&host, &options)?;

        log::debug!(
            "mounted {STAR_RATING_TAG} with {} stars",
            inner.borrow().widget.star_count()
        );
        Ok(Self {
            inner,
            observer,
            click_callback,
            mouseover_callback,
            mouseleave_callback,
            _observer_callback: observer_callback,
        })
    }

    /// Current rating, `undefined` when unrated.
    pub fn rating(&self) -> Option<f64> {
        self.inner.borrow().widget.get_rating()
    }

    /// Set or clear the rating.
    pub fn set_rating(&self, rating: Option<f64>) -> Result<(), JsValue> {
        self.update(|w| w.set_rating(rating))
    }

    /// Maximum rating.
    pub fn max_rating(&self) -> i32 {
        self.inner.borrow().widget.get_max_rating()
    }

    /// Set the maximum rating.
    pub fn set_max_rating(&self, max_rating: i32) -> Result<(), JsValue> {
        self.update(|w| w.set_max_rating(max_rating))
    }

    /// Whether the element is disabled.
    pub fn disabled(&self) -> bool {
        self.inner.borrow().widget.is_disabled()
    }

    /// Enable or disable the element.
    pub fn set_disabled(&self, disabled: bool) -> Result<(), JsValue> {
        self.update(|w| w.set_disabled(disabled))
    }

    /// Whether the element is readonly.
    pub fn readonly(&self) -> bool {
        self.inner.borrow().widget.is_readonly()
    }

    /// Toggle readonly mode.
    pub fn set_readonly(&self, readonly: bool) -> Result<(), JsValue> {
        self.update(|w| w.set_readonly(readonly))
    }

    /// Apply an attribute change by hand, `None` meaning removal.
    pub fn attribute_changed(&self, name: &str, value: Option<String>) -> Result<(), JsValue> {
        let changed = self
            .inner
            .borrow_mut()
            .apply_attribute(&name.to_ascii_lowercase(), value.as_deref());
        if changed {
            self.inner.borrow().render()?;
        }
        Ok(())
    }

    /// Status line, `undefined` when the element is not interactive.
    pub fn display_text(&self) -> Option<String> {
        self.inner.borrow().widget.display_text()
    }

    /// The host element.
    pub fn host(&self) -> HtmlElement {
        self.inner.borrow().host.clone()
    }
}

impl StarRatingElement {
    fn update(&self, f: impl FnOnce(&mut StarRating)) -> Result<(), JsValue> {
        f(&mut self.inner.borrow_mut().widget);
        self.inner.borrow().render()
    }
}

impl Drop for StarRatingElement {
    fn drop(&mut self) {
        self.observer.disconnect();
        let inner = self.inner.borrow();
        let listeners: [(&EventTarget, &str, &Closure<dyn FnMut(Event)>); 3] = [
            (&inner.root, "click", &self.click_callback),
            (&inner.root, "mouseover", &self.mouseover_callback),
            (&inner.host, "mouseleave", &self.mouseleave_callback),
        ];
        for (target, kind, callback) in listeners {
            if let Err(err) =
                target.remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            {
                log::debug!("failed to remove {kind} listener: {err:?}");
            }
        }
        log::debug!("unmounted {STAR_RATING_TAG}");
    }
}
