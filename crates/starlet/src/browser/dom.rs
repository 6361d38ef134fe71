//! Element tree to DOM conversion.

use starlet_core::{Element, Node};
use wasm_bindgen::prelude::*;
use web_sys::{Document, ShadowRoot};

/// Build a DOM element, with its subtree, from `element`.
pub fn build(document: &Document, element: &Element) -> Result<web_sys::Element, JsValue> {
    let node = document.create_element(element.tag())?;
    if !element.classes().is_empty() {
        node.set_attribute("class", &element.class_attr())?;
    }
    let style = element.style_attr();
    if !style.is_empty() {
        node.set_attribute("style", &style)?;
    }
    if let Some(part) = element.part_name() {
        node.set_attribute("part", part)?;
    }
    for (name, value) in element.attributes() {
        node.set_attribute(name, value)?;
    }

    for child in element.nodes() {
        match child {
            Node::Element(e) => {
                node.append_child(&build(document, e)?)?;
            }
            Node::Text(text) => {
                node.append_child(&document.create_text_node(text))?;
            }
            Node::Raw(markup) => node.insert_adjacent_html("beforeend", markup)?,
        }
    }
    Ok(node)
}

/// Replace the content of `root` with a stylesheet and the rendered tree.
pub fn replace_shadow_content(
    document: &Document,
    root: &ShadowRoot,
    css: &str,
    tree: &Element,
) -> Result<(), JsValue> {
    root.set_inner_html("");
    let style = document.create_element("style")?;
    style.set_text_content(Some(css));
    root.append_child(&style)?;
    root.append_child(&build(document, tree)?)?;
    Ok(())
}
