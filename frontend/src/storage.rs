use linkfeed::{Error, Result, Token, TokenStore, AUTH_TOKEN};
use web_sys::Storage;

fn local_storage() -> Result<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| Error::Storage("local storage unavailable".to_owned()))
}

/// session token in the browser's local storage
pub struct LocalStorage;

impl TokenStore for LocalStorage {
    fn get(&self) -> Option<Token> {
        local_storage()
            .ok()?
            .get_item(AUTH_TOKEN)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
            .map(Token::from)
    }

    fn set(&self, token: &Token) -> Result<()> {
        local_storage()?
            .set_item(AUTH_TOKEN, token.as_str())
            .map_err(|e| Error::Storage(format!("{e:?}")))
    }

    fn remove(&self) -> Result<()> {
        local_storage()?
            .remove_item(AUTH_TOKEN)
            .map_err(|e| Error::Storage(format!("{e:?}")))
    }
}

pub fn token() -> Option<Token> {
    LocalStorage.get()
}
