//! Small view helpers shared by the pages.
//!
//! - Feedback: spinner, inline alerts, the error panel shown in place of a list,
//!   the empty-state placeholder, and the transient toast.
//! - Files: saving downloaded PDF bytes to disk through a temporary object URL.

use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlElement};
use yew::prelude::*;

use common::workflow::{Feedback, Severity};

pub const BRAND_COLOR: &str = "#f73b20";

pub fn spinner() -> Html {
    html! {
        <div style="display:flex;justify-content:center;padding:32px 0;">
            <div class="spin" />
        </div>
    }
}

pub fn alert(feedback: &Feedback) -> Html {
    let (background, color) = match feedback.severity {
        Severity::Success => ("#edf7ed", "#1e4620"),
        Severity::Error => ("#fdeded", "#5f2120"),
    };
    html! {
        <div
            role="alert"
            style={format!("background:{background};color:{color};padding:12px 16px;border-radius:4px;margin:12px 0;")}
        >
            { &feedback.message }
        </div>
    }
}

/// Error panel rendered instead of a list that failed to load.
pub fn error_panel(message: &str) -> Html {
    html! {
        <div role="alert" style="background:#fdeded;color:#5f2120;padding:16px;border-radius:4px;margin:16px 0;">
            <strong style="display:block;margin-bottom:4px;">{"Error"}</strong>
            { message }
        </div>
    }
}

pub struct EmptyAction {
    pub label: &'static str,
    pub on_click: Callback<MouseEvent>,
}

pub fn empty_state(title: &str, description: &str, action: Option<EmptyAction>) -> Html {
    html! {
        <div style="text-align:center;padding:48px 16px;border:1px dashed #ddd;border-radius:8px;margin-top:16px;">
            <h3 style="margin:0 0 8px 0;">{ title }</h3>
            <p style="color:#666;margin:0 0 16px 0;">{ description }</p>
            if let Some(action) = action {
                <button class="btn btn-primary" onclick={action.on_click}>{ action.label }</button>
            }
        </div>
    }
}

/// Shows a message at the bottom of the screen for three seconds.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name("toast");
    let toast: HtmlElement = toast.unchecked_into();
    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            toast.remove();
        });
    }
}

/// Wraps PDF bytes in a blob and returns an object URL revoked on drop.
pub fn pdf_object_url(bytes: &[u8]) -> ObjectUrl {
    ObjectUrl::from(Blob::new_with_options(bytes, Some("application/pdf")))
}

/// Triggers a browser download of `bytes` as `file_name`.
pub fn save_pdf(bytes: &[u8], file_name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document is unavailable")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "could not create download link")?
        .unchecked_into();
    let url = pdf_object_url(bytes);
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    // The URL must outlive the click; release it once the download has started.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1000).await;
        drop(url);
    });
    Ok(())
}
