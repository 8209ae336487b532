use gloo_console::error;
use linkfeed::logout;
use yew::prelude::*;
use yew_router::prelude::{use_location, use_navigator, Link};

use crate::{
    routes::Route,
    storage::{token, LocalStorage},
};

#[function_component(Header)]
pub fn header() -> Html {
    // re-render on navigation, the token changes on login and logout
    let _location = use_location();
    let navigator = use_navigator();
    let authenticated = token().is_some();

    let onlogout = Callback::from(move |_| {
        if let Err(e) = logout(&LocalStorage) {
            error!(format!("Error signing out {e}"));
        }
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    html! {
      <header>
        <h1>{"Link"}<span>{"Feed"}</span></h1>
        <nav>
          <Link<Route> to={Route::New}>{"new"}</Link<Route>>
          <Link<Route> to={Route::Top}>{"top"}</Link<Route>>
        </nav>
        <div>
          if authenticated {
            <button class="pointer" onclick={onlogout}>{"logout"}</button>
          } else {
            <Link<Route> to={Route::Login}>{"login"}</Link<Route>>
          }
        </div>
      </header>
    }
}
