use linkfeed::FeedRoute;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{feed::FeedView, header::Header, login::Login, routes::Route};

fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::Top | Route::New | Route::NewPage { .. } => {
            let route = FeedRoute::from_path(&route.to_path());
            html! { <FeedView route={route} /> }
        }
        Route::Login => html! { <Login /> },
        Route::NotFound => html! { <div class="empty">{"Nothing here"}</div> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
      <BrowserRouter>
        <Header />
        <main>
          <Switch<Route> render={switch} />
        </main>
      </BrowserRouter>
    }
}
