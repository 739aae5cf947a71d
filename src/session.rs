use crate::model::User;
use crate::store::{Store, StoreError};

/// Login state for one controller. Holds the username rather than a borrow
/// of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { username: String },
}

impl Session {
    pub fn login(store: &Store, username: &str, password: &str) -> Result<Self, StoreError> {
        let user = store.authenticate(username, password)?;
        Ok(Session::LoggedIn {
            username: user.username.clone(),
        })
    }

    pub fn logout(&mut self) {
        *self = Session::LoggedOut;
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username } => Some(username),
            Session::LoggedOut => None,
        }
    }

    pub fn require_username(&self) -> Result<&str, StoreError> {
        self.username().ok_or(StoreError::NotLoggedIn)
    }

    pub fn user<'a>(&self, store: &'a Store) -> Result<&'a User, StoreError> {
        let username = self.require_username()?;
        store
            .user(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))
    }
}
