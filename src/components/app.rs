use super::map_view::MapView;
use crate::web::load_page_config;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(load_page_config);
    html! { <MapView config={(*config).clone()} /> }
}
