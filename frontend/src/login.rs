use gloo_console::error;
use linkfeed::{submit, FormState};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::{api::client, routes::Route, storage::LocalStorage};

fn on_field(
    form: &UseStateHandle<FormState>,
    assign: fn(&mut FormState, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        assign(&mut next, input.value());
        form.set(next);
    })
}

#[function_component(Login)]
pub fn login() -> Html {
    let form = use_state(FormState::default);
    let failure = use_state(|| None::<String>);
    let navigator = use_navigator();

    let onsubmit = {
        let form = form.clone();
        let failure = failure.clone();
        Callback::from(move |_| {
            let form = (*form).clone();
            let failure = failure.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match submit(&client(), &LocalStorage, &form).await {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        error!(format!("{} failed: {e}", form.submit_label()));
                        failure.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let ontoggle = {
        let form = form.clone();
        Callback::from(move |_| form.set(form.toggled()))
    };

    html! {
      <div class="login">
        <h4>{form.heading()}</h4>
        <div class="fields">
          if form.shows_email() {
            <input
              value={form.email.clone()}
              oninput={on_field(&form, |f, v| f.email = v)}
              type="text"
              placeholder="Your email address"
            />
          }
          <input
            value={form.username.clone()}
            oninput={on_field(&form, |f, v| f.username = v)}
            type="text"
            placeholder="Your username"
          />
          <input
            value={form.password.clone()}
            oninput={on_field(&form, |f, v| f.password = v)}
            type="password"
            placeholder="Choose a safe password"
          />
        </div>
        if let Some(failure) = &*failure {
          <p class="error">{failure}</p>
        }
        <div class="actions">
          <button class="pointer button" onclick={onsubmit}>
            {form.submit_label()}
          </button>
          <button class="pointer button" onclick={ontoggle}>
            {form.toggle_label()}
          </button>
        </div>
      </div>
    }
}
