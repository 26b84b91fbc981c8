mod components;
mod config;
mod controller;
mod error;
mod model;
mod render;
mod state;
mod web;

#[cfg(test)]
mod test_support;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }
    yew::Renderer::<App>::new().render();
}
