pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("network error {0}")]
    Transport(String),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{}", .0.join("\n"))]
    GraphQl(Vec<String>),
    #[error("response contained no {0}")]
    MissingData(&'static str),
    #[error("subscription protocol error {0}")]
    Protocol(String),
    #[error("storage error {0}")]
    Storage(String),
}
