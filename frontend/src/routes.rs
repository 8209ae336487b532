use linkfeed::FeedRoute;
use yew_router::Routable;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/top")]
    Top,
    #[at("/new")]
    New,
    // kept as a string, a malformed page still shows the first page
    #[at("/new/:page")]
    NewPage { page: String },
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<FeedRoute> for Route {
    fn from(route: FeedRoute) -> Self {
        match route {
            FeedRoute::Top => Route::Top,
            FeedRoute::New { page: None } => Route::New,
            FeedRoute::New { page: Some(page) } => Route::NewPage {
                page: page.to_string(),
            },
        }
    }
}
