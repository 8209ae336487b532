mod auth;
mod client;
mod config;
mod error;
mod feed;
mod graphql;
mod protocol;
mod route;
mod types;

/// retrieve the version from Cargo.toml, note that this will yield an error
/// when compiling without cargo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use auth::{
    logout, submit, AuthMode, Authenticated, FormState, MemoryStore, TokenStore, AUTH_TOKEN,
};
pub use client::{ApiClient, Transport};
pub use config::{parse_var, Config};
pub use error::{Error, Result};
pub use feed::{ranked, Feed};
pub use graphql::{
    CreateUserVariables, Direction, FeedVariables, GraphQlError, OrderBy, Request, Response,
    TokenAuthVariables, CREATE_VOTE_MUTATION, FEED_QUERY, LOGIN_MUTATION,
    NEW_LINKS_SUBSCRIPTION, NEW_VOTES_SUBSCRIPTION, SIGNUP_MUTATION,
};
pub use protocol::{
    live_update, ClientMessage, LiveUpdate, ServerMessage, Subscription, PROTOCOL,
};
pub use route::FeedRoute;
pub use types::{Link, LinkId, LinkRef, Token, User, UserId, UserRef, Vote, Votes};
