use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{event, Level};

use crate::{
    config::Config,
    error::Result,
    graphql::{
        CreateUserData, CreateUserVariables, CreateVoteData, CreateVoteVariables, FeedData,
        FeedVariables, Request, Response, TokenAuthData, TokenAuthVariables, CREATE_VOTE_MUTATION,
        FEED_QUERY, LOGIN_MUTATION, SIGNUP_MUTATION,
    },
    types::{Link, Token, User, Vote},
};

/// carries a serialized GraphQL request to the endpoint and returns the raw
/// response body
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, body: String, authorization: Option<String>) -> Result<String>;
}

pub struct ApiClient<T> {
    transport: T,
    token_prefix: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        ApiClient {
            transport,
            token_prefix: config.token_prefix.clone(),
        }
    }

    fn authorization(&self, token: Option<&Token>) -> Option<String> {
        token.map(|t| format!("{} {}", self.token_prefix, t.as_str()))
    }

    async fn execute<V: Serialize, D: DeserializeOwned>(
        &self,
        request: Request<'_, V>,
        token: Option<&Token>,
        what: &'static str,
    ) -> Result<D> {
        let body = serde_json::to_string(&request)?;
        let text = self
            .transport
            .post(body, self.authorization(token))
            .await?;
        // errors are checked before the data is typed, failed fields come back as null
        let response: Response<Value> = serde_json::from_str(&text)?;

        Ok(serde_json::from_value(response.into_result(what)?)?)
    }

    pub async fn links(&self, variables: FeedVariables, token: Option<&Token>) -> Result<Vec<Link>> {
        let data: FeedData = self
            .execute(
                Request::new(FEED_QUERY, variables).named("FeedQuery"),
                token,
                "links",
            )
            .await?;
        event!(Level::DEBUG, "fetched {} links", data.links.len());

        Ok(data.links)
    }

    pub async fn create_vote(&self, link_id: &str, token: Option<&Token>) -> Result<Vote> {
        let variables = CreateVoteVariables {
            link_id: link_id.to_owned(),
        };
        let data: CreateVoteData = self
            .execute(
                Request::new(CREATE_VOTE_MUTATION, variables).named("CreateVote"),
                token,
                "vote",
            )
            .await?;

        Ok(data.create_vote)
    }

    pub async fn create_user(&self, variables: CreateUserVariables) -> Result<User> {
        let data: CreateUserData = self
            .execute(
                Request::new(SIGNUP_MUTATION, variables).named("CreateUser"),
                None,
                "user",
            )
            .await?;
        event!(Level::INFO, "account {} created", data.create_user.user.username);

        Ok(data.create_user.user)
    }

    pub async fn token_auth(&self, variables: TokenAuthVariables) -> Result<Token> {
        let data: TokenAuthData = self
            .execute(
                Request::new(LOGIN_MUTATION, variables).named("TokenAuth"),
                None,
                "token",
            )
            .await?;

        Ok(data.token_auth.token)
    }
}
