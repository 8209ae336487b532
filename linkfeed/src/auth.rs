use std::cell::RefCell;

use tracing::{event, Level};

use crate::{
    client::{ApiClient, Transport},
    error::Result,
    graphql::{CreateUserVariables, TokenAuthVariables},
    types::{Token, User},
};

/// local storage key holding the session token
pub const AUTH_TOKEN: &str = "auth-token";

/// durable home of the session token
pub trait TokenStore {
    fn get(&self) -> Option<Token>;
    fn set(&self, token: &Token) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// keeps the token for the lifetime of the value
#[derive(Default)]
pub struct MemoryStore(RefCell<Option<Token>>);

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<Token> {
        self.0.borrow().clone()
    }

    fn set(&self, token: &Token) -> Result<()> {
        self.0.replace(Some(token.clone()));
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.0.take();
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: AuthMode,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl FormState {
    /// switch between login and sign up, entered values are kept
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        };
    }

    pub fn toggled(&self) -> Self {
        let mut next = self.clone();
        next.toggle();
        next
    }

    pub fn shows_email(&self) -> bool {
        self.mode == AuthMode::SignUp
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login",
            AuthMode::SignUp => "Sign Up",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "login",
            AuthMode::SignUp => "create account",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "need to create an account?",
            AuthMode::SignUp => "already have an account?",
        }
    }

    fn credentials(&self) -> TokenAuthVariables {
        TokenAuthVariables {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn account(&self) -> CreateUserVariables {
        CreateUserVariables {
            email: self.email.clone(),
            password: self.password.clone(),
            username: self.username.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authenticated {
    /// `None` when a new account could not be signed in
    pub token: Option<Token>,
    /// set when the account was created by this submission
    pub user: Option<User>,
}

async fn login<T: Transport, S: TokenStore>(
    client: &ApiClient<T>,
    store: &S,
    credentials: TokenAuthVariables,
) -> Result<Token> {
    let username = credentials.username.clone();
    let token = client.token_auth(credentials).await?;
    store.set(&token)?;
    event!(Level::INFO, "{username} signed in");

    Ok(token)
}

/// submit the form in its current mode, a new account is signed in right away
/// since account creation does not issue a token, a failure to do so still
/// counts as a successful sign up
pub async fn submit<T: Transport, S: TokenStore>(
    client: &ApiClient<T>,
    store: &S,
    form: &FormState,
) -> Result<Authenticated> {
    match form.mode {
        AuthMode::Login => Ok(Authenticated {
            token: Some(login(client, store, form.credentials()).await?),
            user: None,
        }),
        AuthMode::SignUp => {
            let user = client.create_user(form.account()).await?;
            let token = match login(client, store, form.credentials()).await {
                Ok(token) => Some(token),
                Err(e) => {
                    event!(
                        Level::WARN,
                        "account {} created but not signed in: {e}",
                        user.username
                    );
                    None
                }
            };

            Ok(Authenticated {
                token,
                user: Some(user),
            })
        }
    }
}

pub fn logout<S: TokenStore>(store: &S) -> Result<()> {
    store.remove()
}
