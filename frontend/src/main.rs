use crate::app::App;

mod api;
mod app;
mod browser;
mod components;
mod layout;
mod logger;
mod storage;
mod tops_sheet;
mod transport;

fn main() {
    logger::init();
    yew::Renderer::<App>::new().render();
}
