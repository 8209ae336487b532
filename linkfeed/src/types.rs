use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type LinkId = String;
pub type UserId = String;

/// author or voter as embedded in link payloads, the server exposes either
/// `username` or `name` depending on the operation
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct UserRef {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkRef {
    pub id: LinkId,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Vote {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub link: Option<LinkRef>,
}

impl Vote {
    fn voter(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// two votes are the same when their ids match, or lacking ids, when
    /// they were cast by the same user
    pub fn same_as(&self, other: &Vote) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => matches!((self.voter(), other.voter()), (Some(a), Some(b)) if a == b),
        }
    }
}

/// votes of a link, the feed query returns a relay connection while the
/// subscription returns a plain list
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct Votes(Vec<Vote>);

#[derive(Deserialize)]
struct Edge {
    node: Option<Vote>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VotesRepr {
    Connection { edges: Vec<Option<Edge>> },
    List(Vec<Vote>),
}

impl<'de> Deserialize<'de> for Votes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let votes = match Option::<VotesRepr>::deserialize(deserializer)? {
            Some(VotesRepr::Connection { edges }) => edges
                .into_iter()
                .flatten()
                .filter_map(|edge| edge.node)
                .collect(),
            Some(VotesRepr::List(votes)) => votes,
            None => Vec::new(),
        };

        Ok(Votes(votes))
    }
}

impl Votes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vote> {
        self.0.iter()
    }

    pub fn contains(&self, vote: &Vote) -> bool {
        self.0.iter().any(|v| v.same_as(vote))
    }

    pub fn push(&mut self, vote: Vote) {
        self.0.push(vote);
    }
}

impl From<Vec<Vote>> for Votes {
    fn from(votes: Vec<Vote>) -> Self {
        Votes(votes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub posted_by: Option<UserRef>,
    #[serde(default)]
    pub votes: Votes,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Link {
    pub fn author(&self) -> &str {
        self.posted_by
            .as_ref()
            .map(UserRef::display_name)
            .unwrap_or("Unknown")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// opaque credential issued by the API on a successful login
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_owned())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}
