//! Thin wrappers over `window` used by the routing shell.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use common::routing::AppRoute;

pub fn current_pathname() -> String {
    let Some(window) = web_sys::window() else {
        return "/".to_string();
    };
    match window.location().pathname() {
        Ok(pathname) if !pathname.trim().is_empty() => pathname,
        _ => "/".to_string(),
    }
}

pub fn push_route(route: AppRoute) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if current_pathname() == route.to_path() {
        return;
    }
    if history
        .push_state_with_url(&JsValue::NULL, "", Some(route.to_path()))
        .is_err()
    {
        log::warn!("could not push {} to history", route.to_path());
    }
}

pub fn replace_route(route: AppRoute) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if history
        .replace_state_with_url(&JsValue::NULL, "", Some(route.to_path()))
        .is_err()
    {
        log::warn!("could not replace history entry with {}", route.to_path());
    }
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(common::listing::TABLE_MIN_WIDTH)
}

/// `window` event listener that is removed when dropped.
pub struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
    pub fn new(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
        window
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { event, callback })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        }
    }
}
