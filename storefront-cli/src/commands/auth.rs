//! Account commands
use serde::{Deserialize, Serialize};

use storefront_core::{SessionError, SignUpForm, StoredSession};

use super::CommandResult;
use crate::state::AppState;

/// Signed-in user as shown to the terminal; the token never leaves storage
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub session_state: String,
}

impl UserInfo {
    fn from_session(session: StoredSession, state: &AppState) -> Self {
        Self {
            email: session.email,
            name: session.name,
            role: session.role,
            phone: session.phone,
            session_state: state.storefront().sessions().state().to_string(),
        }
    }
}

pub async fn login(state: &AppState, email: &str, password: &str) -> CommandResult<UserInfo> {
    match state.storefront().sign_in(email, password).await {
        Ok(session) => CommandResult::ok(UserInfo::from_session(session, state)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn signup(
    state: &AppState,
    email: String,
    name: String,
    password: String,
    phone: String,
) -> CommandResult<()> {
    let form = SignUpForm {
        email,
        name,
        password,
        phone,
    };
    state.storefront().sign_up(&form).await.into()
}

pub async fn logout(state: &AppState) -> CommandResult<()> {
    state.storefront().sign_out().await.into()
}

pub fn whoami(state: &AppState) -> CommandResult<UserInfo> {
    match state.storefront().current_user() {
        Some(session) => CommandResult::ok(UserInfo::from_session(session, state)),
        None => CommandResult::err(SessionError::NotSignedIn.to_string()),
    }
}
