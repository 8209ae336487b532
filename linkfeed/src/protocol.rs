//! Messages of the `graphql-ws` websocket sub-protocol used for live updates.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{event, Level};

use crate::{
    error::{Error, Result},
    graphql::{
        NewLinkData, NewVoteData, Request, Response, NEW_LINKS_SUBSCRIPTION,
        NEW_VOTES_SUBSCRIPTION,
    },
    types::{Link, Token, Vote},
};

/// websocket sub-protocol name
pub const PROTOCOL: &str = "graphql-ws";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscription {
    NewLinks,
    NewVotes,
}

impl Subscription {
    pub fn id(&self) -> &'static str {
        match self {
            Subscription::NewLinks => "new-links",
            Subscription::NewVotes => "new-votes",
        }
    }

    pub fn document(&self) -> &'static str {
        match self {
            Subscription::NewLinks => NEW_LINKS_SUBSCRIPTION,
            Subscription::NewVotes => NEW_VOTES_SUBSCRIPTION,
        }
    }

    fn from_id(id: &str) -> Option<Self> {
        [Subscription::NewLinks, Subscription::NewVotes]
            .into_iter()
            .find(|s| s.id() == id)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct InitPayload {
    #[serde(rename = "authToken", skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    ConnectionInit {
        payload: InitPayload,
    },
    Start {
        id: &'static str,
        payload: Request<'static, Value>,
    },
    Stop {
        id: &'static str,
    },
    ConnectionTerminate,
}

impl ClientMessage {
    pub fn init(token: Option<&Token>) -> Self {
        ClientMessage::ConnectionInit {
            payload: InitPayload {
                auth_token: token.map(|t| t.as_str().to_owned()),
            },
        }
    }

    pub fn start(subscription: Subscription) -> Self {
        ClientMessage::Start {
            id: subscription.id(),
            payload: Request::new(subscription.document(), Value::Object(Default::default())),
        }
    }

    pub fn stop(subscription: Subscription) -> Self {
        ClientMessage::Stop {
            id: subscription.id(),
        }
    }

    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionAck {
        #[serde(default)]
        payload: Option<Value>,
    },
    ConnectionError {
        #[serde(default)]
        payload: Option<Value>,
    },
    Ka {},
    Data {
        id: String,
        payload: Response<Value>,
    },
    Error {
        id: String,
        #[serde(default)]
        payload: Option<Value>,
    },
    Complete {
        id: String,
    },
}

impl ServerMessage {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// something the server pushed that changes the feed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveUpdate {
    NewLink(Link),
    NewVote(Vote),
}

fn decode<T: DeserializeOwned>(payload: Response<Value>, what: &'static str) -> Result<T> {
    Ok(serde_json::from_value(payload.into_result(what)?)?)
}

fn describe(payload: Option<Value>) -> String {
    payload.map(|p| p.to_string()).unwrap_or_default()
}

/// turn a server message into a feed update, protocol chatter yields `None`
pub fn live_update(message: ServerMessage) -> Result<Option<LiveUpdate>> {
    match message {
        ServerMessage::Data { id, payload } => match Subscription::from_id(&id) {
            Some(Subscription::NewLinks) => {
                let data: NewLinkData = decode(payload, "new link")?;
                Ok(Some(LiveUpdate::NewLink(data.new_link)))
            }
            Some(Subscription::NewVotes) => {
                let data: NewVoteData = decode(payload, "new vote")?;
                Ok(Some(LiveUpdate::NewVote(data.new_vote)))
            }
            None => {
                event!(Level::WARN, "data for unknown subscription {id}");
                Ok(None)
            }
        },
        ServerMessage::Error { id, payload } => Err(Error::Protocol(format!(
            "subscription {id} rejected {}",
            describe(payload)
        ))),
        ServerMessage::ConnectionError { payload } => Err(Error::Protocol(format!(
            "connection rejected {}",
            describe(payload)
        ))),
        ServerMessage::Complete { id } => {
            event!(Level::INFO, "subscription {id} completed by server");
            Ok(None)
        }
        ServerMessage::ConnectionAck { .. } | ServerMessage::Ka {} => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_messages() {
        let init: Value =
            serde_json::from_str(&ClientMessage::init(Some(&Token::from("T123"))).to_text().unwrap())
                .unwrap();
        assert_eq!(
            init,
            json!({ "type": "connection_init", "payload": { "authToken": "T123" } })
        );

        let anonymous: Value =
            serde_json::from_str(&ClientMessage::init(None).to_text().unwrap()).unwrap();
        assert_eq!(anonymous, json!({ "type": "connection_init", "payload": {} }));

        let start: Value =
            serde_json::from_str(&ClientMessage::start(Subscription::NewLinks).to_text().unwrap())
                .unwrap();
        assert_eq!(start["type"], "start");
        assert_eq!(start["id"], "new-links");
        assert!(start["payload"]["query"]
            .as_str()
            .unwrap()
            .contains("newLink"));

        let stop: Value =
            serde_json::from_str(&ClientMessage::stop(Subscription::NewVotes).to_text().unwrap())
                .unwrap();
        assert_eq!(stop, json!({ "type": "stop", "id": "new-votes" }));

        let terminate: Value =
            serde_json::from_str(&ClientMessage::ConnectionTerminate.to_text().unwrap()).unwrap();
        assert_eq!(terminate, json!({ "type": "connection_terminate" }));
    }

    #[test]
    fn new_link_update() {
        let message = ServerMessage::parse(
            r#"{
                "type": "data",
                "id": "new-links",
                "payload": { "data": { "newLink": {
                    "id": "12",
                    "url": "https://example.com",
                    "description": "fresh",
                    "postedBy": { "id": "3", "name": "bob" },
                    "votes": [],
                    "createdAt": "2021-05-01T12:00:00Z"
                } } }
            }"#,
        )
        .unwrap();

        match live_update(message).unwrap() {
            Some(LiveUpdate::NewLink(link)) => {
                assert_eq!(link.id, "12");
                assert_eq!(link.author(), "bob");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn new_vote_update() {
        let message = ServerMessage::parse(
            r#"{ "type": "data", "id": "new-votes", "payload": { "data": { "newVote": {
                "id": "v1", "link": { "id": "12" }, "user": { "id": "3", "username": "bob" }
            } } } }"#,
        )
        .unwrap();

        match live_update(message).unwrap() {
            Some(LiveUpdate::NewVote(vote)) => assert_eq!(vote.link.unwrap().id, "12"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn chatter_is_ignored() {
        for text in [
            r#"{ "type": "ka" }"#,
            r#"{ "type": "connection_ack" }"#,
            r#"{ "type": "complete", "id": "new-links" }"#,
            r#"{ "type": "data", "id": "other", "payload": { "data": {} } }"#,
        ] {
            let message = ServerMessage::parse(text).unwrap();
            assert_eq!(live_update(message).unwrap(), None, "{text}");
        }
    }

    #[test]
    fn errors() {
        let rejected = ServerMessage::parse(
            r#"{ "type": "error", "id": "new-links", "payload": { "message": "unknown field" } }"#,
        )
        .unwrap();
        assert!(matches!(live_update(rejected), Err(Error::Protocol(_))));

        let failed = ServerMessage::parse(
            r#"{ "type": "data", "id": "new-links", "payload": { "errors": [ { "message": "boom" } ] } }"#,
        )
        .unwrap();
        assert!(matches!(live_update(failed), Err(Error::GraphQl(_))));

        assert!(ServerMessage::parse(r#"{ "type": "mystery" }"#).is_err());
    }
}
