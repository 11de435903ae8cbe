//! Binding the favorite toggle to the browser page.
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

use crate::client::HttpFavoriteClient;
use crate::components::{Error, FavoriteToggle, ToggleSelectors};
use crate::dom::{Document, Element, Event};

#[derive(Clone)]
pub struct WebElement(web_sys::Element);

impl Element for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name().to_ascii_lowercase()
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            console::warn_1(&err);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            console::warn_1(&err);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            console::warn_1(&err);
        }
    }

    fn closest(&self, tag: &str) -> Option<Self> {
        self.0.closest(tag).ok().flatten().map(WebElement)
    }
}

pub struct WebDocument(web_sys::Document);

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }
}

impl Event for web_sys::Event {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self)
    }
}

/// Entry point, run when the module is loaded.
///
/// Binds once the document is parsed. Pages without a toggle button are left
/// alone.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Err(err) = bind(&target) {
                console::error_1(&err);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
        Ok(())
    } else {
        bind(&document)
    }
}

fn bind(document: &web_sys::Document) -> Result<(), JsValue> {
    let base_url = document
        .location()
        .map(|location| location.href())
        .transpose()?;
    let client = HttpFavoriteClient::new(base_url.as_deref())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let selectors = ToggleSelectors::default();
    let toggle = match FavoriteToggle::init(&WebDocument(document.clone()), client, &selectors) {
        Ok(toggle) => Rc::new(toggle),
        // No button: not a poem page.
        Err(Error::MissingElement { context })
            if document.get_element_by_id(&selectors.button).is_none() =>
        {
            console::debug_1(&JsValue::from_str(&context));
            return Ok(());
        }
        Err(err) => return Err(JsValue::from_str(&err.to_string())),
    };

    let handler = Rc::clone(&toggle);
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let pending = handler.on_toggle_click(&event);
        spawn_local(async move {
            if let Err(err) = pending.await {
                console::error_1(&JsValue::from_str(&err.to_string()));
            }
        });
    });
    toggle
        .button()
        .0
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(())
}
