use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::{
    error::{Error, Result},
    types::{Link, Token, User, Vote},
};

pub const FEED_QUERY: &str = r#"
query FeedQuery($take: Int, $skip: Int, $orderBy: LinkOrderByInput) {
  links(take: $take, skip: $skip, orderBy: $orderBy) {
    id
    createdAt
    url
    description
    postedBy {
      id
      username
    }
    votes {
      edges {
        node {
          id
        }
      }
    }
  }
}
"#;

pub const NEW_LINKS_SUBSCRIPTION: &str = r#"
subscription {
  newLink {
    id
    url
    description
    postedBy {
      id
      name
    }
    votes {
      id
      user {
        id
      }
    }
    createdAt
  }
}
"#;

pub const NEW_VOTES_SUBSCRIPTION: &str = r#"
subscription {
  newVote {
    id
    link {
      id
    }
    user {
      id
      username
    }
  }
}
"#;

pub const CREATE_VOTE_MUTATION: &str = r#"
mutation CreateVote($linkId: ID!) {
  createVote(linkId: $linkId) {
    user {
      id
      username
      email
    }
    link {
      id
      url
      description
      postedBy {
        id
        username
        email
      }
    }
  }
}
"#;

pub const SIGNUP_MUTATION: &str = r#"
mutation CreateUser($email: String!, $password: String!, $username: String!) {
  createUser(email: $email, password: $password, username: $username) {
    user {
      email
      username
    }
  }
}
"#;

pub const LOGIN_MUTATION: &str = r#"
mutation TokenAuth($username: String!, $password: String!) {
  tokenAuth(username: $username, password: $password) {
    token
  }
}
"#;

/// GraphQL over HTTP request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<'a, V> {
    pub query: &'a str,
    pub variables: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'a str>,
}

impl<'a, V> Request<'a, V> {
    pub fn new(query: &'a str, variables: V) -> Self {
        Request {
            query,
            variables,
            operation_name: None,
        }
    }

    pub fn named(mut self, operation_name: &'a str) -> Self {
        self.operation_name = Some(operation_name);
        self
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> Response<T> {
    /// any reported error fails the whole operation, partial data is dropped
    pub fn into_result(self, what: &'static str) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            event!(Level::WARN, "{what} failed: {}", messages.join("; "));

            return Err(Error::GraphQl(messages));
        }

        self.data.ok_or(Error::MissingData(what))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub created_at: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedVariables {
    pub take: usize,
    pub skip: usize,
    pub order_by: OrderBy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenAuthVariables {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateUserVariables {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteVariables {
    pub link_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedData {
    pub links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLinkData {
    pub new_link: Link,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVoteData {
    pub new_vote: Vote,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoteData {
    pub create_vote: Vote,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserData {
    pub create_user: CreateUserPayload,
}

#[derive(Debug, Deserialize)]
pub struct TokenAuthPayload {
    pub token: Token,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAuthData {
    pub token_auth: TokenAuthPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feed_request_body() {
        let request = Request::new(
            FEED_QUERY,
            FeedVariables {
                take: 10,
                skip: 20,
                order_by: OrderBy {
                    created_at: Direction::Desc,
                },
            },
        )
        .named("FeedQuery");

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["variables"],
            json!({ "take": 10, "skip": 20, "orderBy": { "createdAt": "desc" } })
        );
        assert_eq!(body["operationName"], "FeedQuery");
    }

    #[test]
    fn unnamed_request_omits_operation() {
        let body = serde_json::to_value(Request::new(
            CREATE_VOTE_MUTATION,
            CreateVoteVariables {
                link_id: "5".into(),
            },
        ))
        .unwrap();

        assert!(body.get("operationName").is_none());
        assert_eq!(body["variables"], json!({ "linkId": "5" }));
    }

    #[test]
    fn errors_fail_the_operation() {
        let response: Response<TokenAuthData> = serde_json::from_str(
            r#"{ "data": null, "errors": [ { "message": "Please enter valid credentials" } ] }"#,
        )
        .unwrap();

        match response.into_result("token") {
            Err(Error::GraphQl(messages)) => {
                assert_eq!(messages, vec!["Please enter valid credentials".to_string()])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_data() {
        let response: Response<FeedData> = serde_json::from_str(r#"{ "errors": [] }"#).unwrap();

        assert!(matches!(
            response.into_result("links"),
            Err(Error::MissingData("links"))
        ));
    }

    #[test]
    fn token_auth_payload() {
        let response: Response<TokenAuthData> =
            serde_json::from_str(r#"{ "data": { "tokenAuth": { "token": "T123" } } }"#).unwrap();

        let data = response.into_result("token").unwrap();
        assert_eq!(data.token_auth.token.as_str(), "T123");
    }
}
