//! WASM application entry point
//!
//! Mounts the controller on the signup page, loads the roster and wires the
//! signup form and the participant remove buttons.

use std::rc::Rc;
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use super::RosterController;
use crate::{
    client::gloo::WasmClient,
    config::ClientConfig,
    interface::HttpClient,
    view::dom::{DomView, FORM_ID, LIST_ID, SELECT_ID},
};

const EMAIL_ID: &str = "email";

type PageController = RosterController<WasmClient, DomView>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let config = ClientConfig::same_origin();
    let api = WasmClient::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let view = DomView::mount(&document).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let controller = Rc::new(RosterController::new(api, view, config));

    wire_signup_form(&document, Rc::clone(&controller))?;
    wire_remove_buttons(&document, Rc::clone(&controller))?;

    spawn_local(async move {
        let source = controller.start().await;
        log::info!("roster ready ({source:?})");
    });

    Ok(())
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("page has no #{id} element")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

fn wire_signup_form(document: &Document, controller: Rc<PageController>) -> Result<(), JsValue> {
    let form: HtmlFormElement = by_id(document, FORM_ID)?;
    let email_input: HtmlInputElement = by_id(document, EMAIL_ID)?;
    let select: HtmlSelectElement = by_id(document, SELECT_ID)?;

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let activity_id = select.value();
        let email = email_input.value();
        let controller = Rc::clone(&controller);

        spawn_local(async move {
            let outcome = controller.signup(&activity_id, &email).await;
            if let Some(id) = outcome.notice() {
                controller.expire_notice(id).await;
            }
        });
    });

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

/// One delegated listener on the list, so re-rendered rows need no rewiring.
fn wire_remove_buttons(document: &Document, controller: Rc<PageController>) -> Result<(), JsValue> {
    let container: Element = by_id(document, LIST_ID)?;

    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(button)) = target.closest(".participant-remove") else {
            return;
        };
        let Ok(Some(card)) = button.closest(".activity-card") else {
            return;
        };
        let (Some(activity_id), Some(email)) = (
            card.get_attribute("data-activity-id"),
            button.get_attribute("data-email"),
        ) else {
            return;
        };
        let controller = Rc::clone(&controller);

        spawn_local(async move {
            let outcome = controller.unregister(&activity_id, &email).await;
            if let Some(id) = outcome.notice() {
                controller.expire_notice(id).await;
            }
        });
    });

    container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
