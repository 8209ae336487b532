use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TOP_LIMIT: usize = 100;
pub const DEFAULT_TOKEN_PREFIX: &str = "JWT";
pub const GRAPHQL_PATH: &str = "/graphql/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// GraphQL endpoint, defaults to `/graphql/` on the page origin
    pub graphql_url: Option<String>,
    /// websocket endpoint, defaults to the GraphQL endpoint with a ws scheme
    pub subscriptions_url: Option<String>,
    pub page_size: usize,
    pub top_limit: usize,
    pub token_prefix: String,
    /// subscribe to the `newVote` feed, only when the server offers it
    pub vote_feed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            graphql_url: None,
            subscriptions_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            top_limit: DEFAULT_TOP_LIMIT,
            token_prefix: DEFAULT_TOKEN_PREFIX.to_owned(),
            vote_feed: false,
        }
    }
}

/// parse a configuration value or return the default
pub fn parse_var<T: FromStr>(value: Option<&str>, default: T) -> T {
    value
        .unwrap_or_default()
        .trim()
        .parse::<T>()
        .unwrap_or(default)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl Config {
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let defaults = Config::default();

        Config {
            graphql_url: non_empty(lookup("LINKFEED_GRAPHQL_URL")),
            subscriptions_url: non_empty(lookup("LINKFEED_WS_URL")),
            page_size: Some(parse_var(lookup("LINKFEED_PAGE_SIZE"), defaults.page_size))
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            top_limit: parse_var(lookup("LINKFEED_TOP_LIMIT"), defaults.top_limit),
            token_prefix: non_empty(lookup("LINKFEED_TOKEN_PREFIX"))
                .unwrap_or(defaults.token_prefix),
            vote_feed: parse_var(
                lookup("LINKFEED_VOTE_FEED")
                    .map(str::to_ascii_lowercase)
                    .as_deref(),
                defaults.vote_feed,
            ),
        }
    }

    /// configuration baked in at compile time, the browser has no environment
    pub fn from_build_env() -> Self {
        Config::from_lookup(|name| match name {
            "LINKFEED_GRAPHQL_URL" => option_env!("LINKFEED_GRAPHQL_URL"),
            "LINKFEED_WS_URL" => option_env!("LINKFEED_WS_URL"),
            "LINKFEED_PAGE_SIZE" => option_env!("LINKFEED_PAGE_SIZE"),
            "LINKFEED_TOP_LIMIT" => option_env!("LINKFEED_TOP_LIMIT"),
            "LINKFEED_TOKEN_PREFIX" => option_env!("LINKFEED_TOKEN_PREFIX"),
            "LINKFEED_VOTE_FEED" => option_env!("LINKFEED_VOTE_FEED"),
            _ => None,
        })
    }

    pub fn graphql_endpoint(&self, origin: &str) -> String {
        match &self.graphql_url {
            Some(url) => url.clone(),
            None => format!("{}{GRAPHQL_PATH}", origin.trim_end_matches('/')),
        }
    }

    pub fn subscriptions_endpoint(&self, origin: &str) -> String {
        match &self.subscriptions_url {
            Some(url) => url.clone(),
            None => self
                .graphql_endpoint(origin)
                .replacen("http://", "ws://", 1)
                .replacen("https://", "wss://", 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.top_limit, 100);
        assert!(!config.vote_feed);
    }

    #[test]
    fn overrides() {
        let vars: HashMap<&str, &str> = [
            ("LINKFEED_GRAPHQL_URL", "https://api.example.com/graphql/"),
            ("LINKFEED_PAGE_SIZE", "5"),
            ("LINKFEED_TOKEN_PREFIX", "Bearer"),
            ("LINKFEED_VOTE_FEED", "TRUE"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|name| vars.get(name).copied());

        assert_eq!(config.page_size, 5);
        assert_eq!(config.token_prefix, "Bearer");
        assert!(config.vote_feed);
        assert_eq!(
            config.subscriptions_endpoint("http://localhost:8080"),
            "wss://api.example.com/graphql/"
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(|name| match name {
            "LINKFEED_PAGE_SIZE" => Some("0"),
            "LINKFEED_TOP_LIMIT" => Some("lots"),
            "LINKFEED_GRAPHQL_URL" => Some("  "),
            _ => None,
        });

        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.top_limit, DEFAULT_TOP_LIMIT);
        assert_eq!(config.graphql_url, None);
    }

    #[test]
    fn endpoints_from_origin() {
        let config = Config::default();

        assert_eq!(
            config.graphql_endpoint("http://localhost:3000/"),
            "http://localhost:3000/graphql/"
        );
        assert_eq!(
            config.subscriptions_endpoint("http://localhost:3000"),
            "ws://localhost:3000/graphql/"
        );
    }
}
