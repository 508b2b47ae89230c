use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Window};

use crate::surface::Surface;

/// `Surface` over the live document.
#[derive(Clone, Debug)]
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport_size(&self) -> (f64, f64) {
        let read = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        (read(self.window.inner_width()), read(self.window.inner_height()))
    }
}

fn inline_style(node: &Element) -> Option<CssStyleDeclaration> {
    node.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

// parseFloat-style: leading number, unit ignored.
fn parse_px(value: &str) -> f64 {
    value.trim().trim_end_matches("px").trim().parse().unwrap_or(0.0)
}

impl Surface for DomSurface {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn within(&self, node: &Element, selector: &str) -> bool {
        matches!(node.closest(selector), Ok(Some(_)))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&self, node: &Element, class: &str, on: bool) {
        let list = node.class_list();
        let result = if on { list.add_1(class) } else { list.remove_1(class) };
        if let Err(err) = result {
            log::warn!("class `{class}` not updated: {err:?}");
        }
    }

    fn replace_content(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn style(&self, node: &Element, property: &str) -> String {
        inline_style(node)
            .and_then(|style| style.get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(style) = inline_style(node) else {
            return;
        };
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            log::warn!("style `{property}` not updated: {err:?}");
        }
    }

    fn computed_px(&self, node: &Element, property: &str) -> f64 {
        self.window
            .get_computed_style(node)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
            .map_or(0.0, |value| parse_px(&value))
    }

    fn scrollbar_width(&self) -> f64 {
        let (viewport, _) = self.viewport_size();
        let content = self
            .document
            .document_element()
            .map_or(viewport, |root| f64::from(root.client_width()));
        viewport - content
    }

    fn flush_layout(&self, node: &Element) {
        // Reading a layout property forces style recalculation.
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.offset_width();
        }
    }
}
