use futures::StreamExt;
use gloo_console::error;
use linkfeed::{Feed, FeedRoute, Link, LinkId, LiveUpdate, Subscription, Vote};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link as RouterLink;

use crate::{
    api::{client, config, subscriptions_url},
    link::LinkItem,
    routes::Route,
    storage::token,
    websocket::SubscriptionService,
};

pub enum Msg {
    Links(u64, Result<Vec<Link>, String>),
    Live(LiveUpdate),
    Vote(LinkId),
    Voted(Vote),
}

#[derive(Properties, PartialEq)]
pub struct FeedViewProps {
    pub route: FeedRoute,
}

pub struct FeedView {
    feed: Option<Feed>,
    error: Option<String>,
    loading: bool,
    /// bumped per fetch, responses for an older route are dropped
    generation: u64,
    subscriptions: Option<SubscriptionService>,
}

impl FeedView {
    fn fetch(&mut self, ctx: &Context<Self>) {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.feed = None;

        let generation = self.generation;
        let variables = ctx.props().route.variables(config());
        let link = ctx.link().clone();
        spawn_local(async move {
            let links = client()
                .links(variables, token().as_ref())
                .await
                .map_err(|e| e.to_string());
            link.send_message(Msg::Links(generation, links));
        });
    }

    fn subscribe(&mut self, ctx: &Context<Self>) {
        let mut subscriptions = vec![Subscription::NewLinks];
        if config().vote_feed {
            subscriptions.push(Subscription::NewVotes);
        }

        match SubscriptionService::open(&subscriptions_url(), token().as_ref(), subscriptions) {
            Ok((service, mut updates)) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    while let Some(update) = updates.next().await {
                        link.send_message(Msg::Live(update));
                    }
                });

                self.subscriptions = Some(service);
            }
            Err(e) => error!(format!("Could not subscribe to live updates {e}")),
        }
    }

    fn pagination(&self, feed: &Feed, route: &FeedRoute) -> Html {
        let page_size = config().page_size;
        let control = |label: &'static str, target: Option<FeedRoute>| match target {
            Some(target) => html! {
              <RouterLink<Route> classes="pointer" to={Route::from(target)}>{label}</RouterLink<Route>>
            },
            None => html! { <span class="disabled">{label}</span> },
        };

        html! {
          <div class="pagination">
            {control("Previous", route.previous())}
            {control("Next", route.next(feed.count(), page_size))}
          </div>
        }
    }
}

impl Component for FeedView {
    type Message = Msg;
    type Properties = FeedViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            feed: None,
            error: None,
            loading: true,
            generation: 0,
            subscriptions: None,
        };
        view.fetch(ctx);

        view
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().route != old_props.route {
            self.fetch(ctx);
        }

        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Links(generation, _) if generation != self.generation => return false,
            Msg::Links(_, result) => {
                self.loading = false;
                match result {
                    Ok(links) => {
                        let route = ctx.props().route;
                        self.feed = Some(Feed::for_page(links, &route, config().page_size));
                        if self.subscriptions.is_none() {
                            self.subscribe(ctx);
                        }
                    }
                    Err(e) => self.error = Some(e),
                }
            }
            Msg::Live(LiveUpdate::NewLink(link)) => {
                return self
                    .feed
                    .as_mut()
                    .is_some_and(|feed| feed.merge_new_link(link));
            }
            Msg::Live(LiveUpdate::NewVote(vote)) | Msg::Voted(vote) => {
                return self
                    .feed
                    .as_mut()
                    .is_some_and(|feed| feed.apply_vote(vote));
            }
            Msg::Vote(id) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    match client().create_vote(&id, token().as_ref()).await {
                        Ok(vote) => link.send_message(Msg::Voted(vote)),
                        Err(e) => error!(format!("Error voting for link {id}: {e}")),
                    }
                });
                return false;
            }
        };

        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let title = match ctx.props().route {
            FeedRoute::Top => "Top links".to_owned(),
            route => format!("New links ({})", route.page()),
        };
        gloo_utils::document().set_title(&title);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        // stops the subscriptions and closes the socket
        self.subscriptions.take();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let route = ctx.props().route;
        let authenticated = token().is_some();
        let vote = ctx.link().callback(Msg::Vote);

        html! {
          <div class="feed">
            if self.loading {
              <p>{"Loading..."}</p>
            }
            if let Some(error) = &self.error {
              <pre>{error}</pre>
            }
            if let Some(feed) = &self.feed {
              <ul class="links">
                {for feed.render(&route, config().page_size).into_iter().map(|(index, link)| html! {
                  <LinkItem
                    key={link.id.clone()}
                    link={link.clone()}
                    index={index}
                    authenticated={authenticated}
                    vote={vote.clone()}
                  />
                })}
              </ul>
              if route.is_paginated() {
                {self.pagination(feed, &route)}
              }
            }
          </div>
        }
    }
}
