use std::sync::OnceLock;

use gloo_net::http::Request;
use linkfeed::{ApiClient, Config, Error, Result, Transport};

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_build_env)
}

fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn graphql_url() -> String {
    config().graphql_endpoint(&origin())
}

pub fn subscriptions_url() -> String {
    config().subscriptions_endpoint(&origin())
}

pub struct FetchTransport {
    url: String,
}

impl Transport for FetchTransport {
    async fn post(&self, body: String, authorization: Option<String>) -> Result<String> {
        let mut request = Request::post(&self.url).header("Content-Type", "application/json");
        if let Some(authorization) = authorization {
            request = request.header("Authorization", &authorization);
        }

        let response = request
            .body(body)
            .map_err(|e| Error::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        // graphql servers report invalid queries as 400 with a regular body
        if !response.ok() && response.status() != 400 {
            return Err(Error::Transport(format!(
                "{} {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }
}

pub fn client() -> ApiClient<FetchTransport> {
    ApiClient::new(FetchTransport { url: graphql_url() }, config())
}
