pub mod admin;
pub mod agent;
pub mod buyer;

use yew::prelude::*;

use common::listing::{ListState, ListView};

use crate::components::helpers::{error_panel, spinner};

/// Loading, error, empty or populated body of a dashboard list.
pub fn list_body<T>(state: &ListState<T>, empty: impl FnOnce() -> Html, rows: impl FnOnce(&[T]) -> Html) -> Html {
    match state.view() {
        ListView::Loading => spinner(),
        ListView::Error(message) => error_panel(message),
        ListView::Empty => empty(),
        ListView::Rows(items) => rows(items),
    }
}

pub fn page_header(title: &str, action: Html) -> Html {
    html! {
        <div class="page-header">
            <h1 class="page-title">{ title }</h1>
            { action }
        </div>
    }
}
