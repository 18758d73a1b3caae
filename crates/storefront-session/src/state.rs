//! Session State Machine
//!
//! ```text
//! LoggedOut --login--> LoggedIn
//! LoggedIn  --start-up with stored token--> Validating
//! Validating --200--> LoggedIn
//! Validating --401--> Refreshing
//! Refreshing --200--> LoggedIn
//! Refreshing --401/404/other failure--> LoggedOut
//! LoggedIn  --logout--> LoggedOut
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing stored
    LoggedOut,
    /// A session is stored and considered usable
    LoggedIn,
    /// Stored token is being checked against the backend
    Validating,
    /// Backend rejected the token; one refresh attempt in flight
    Refreshing,
}

impl SessionState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        match (self, target) {
            (SessionState::LoggedOut, SessionState::LoggedIn) => true,
            // A caller may hand in a session it has not persisted yet
            (SessionState::LoggedOut, SessionState::Validating) => true,
            (SessionState::LoggedIn, SessionState::Validating) => true,
            (SessionState::LoggedIn, SessionState::LoggedOut) => true,
            // Inconclusive validation (non-401 failure) also lands back here
            (SessionState::Validating, SessionState::LoggedIn) => true,
            (SessionState::Validating, SessionState::Refreshing) => true,
            (SessionState::Refreshing, SessionState::LoggedIn) => true,
            (SessionState::Refreshing, SessionState::LoggedOut) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn)
    }

    /// Validation or refresh is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Validating | SessionState::Refreshing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::LoggedOut => "logged_out",
            SessionState::LoggedIn => "logged_in",
            SessionState::Validating => "validating",
            SessionState::Refreshing => "refreshing",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logged_out" => Ok(SessionState::LoggedOut),
            "logged_in" => Ok(SessionState::LoggedIn),
            "validating" => Ok(SessionState::Validating),
            "refreshing" => Ok(SessionState::Refreshing),
            _ => Err(format!("Unknown session state: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::LoggedOut.can_transition_to(SessionState::LoggedIn));
        assert!(SessionState::LoggedIn.can_transition_to(SessionState::Validating));
        assert!(SessionState::Validating.can_transition_to(SessionState::LoggedIn));
        assert!(SessionState::Validating.can_transition_to(SessionState::Refreshing));
        assert!(SessionState::Refreshing.can_transition_to(SessionState::LoggedIn));
        assert!(SessionState::Refreshing.can_transition_to(SessionState::LoggedOut));
        assert!(SessionState::LoggedIn.can_transition_to(SessionState::LoggedOut));
    }

    #[test]
    fn test_invalid_transitions() {
        // Refresh only ever follows a failed validation
        assert!(!SessionState::LoggedIn.can_transition_to(SessionState::Refreshing));
        assert!(!SessionState::LoggedOut.can_transition_to(SessionState::Refreshing));
        // A second refresh is never started from Refreshing's outcome states
        assert!(!SessionState::Refreshing.can_transition_to(SessionState::Validating));
    }

    #[test]
    fn test_parse_and_display() {
        for state in [
            SessionState::LoggedOut,
            SessionState::LoggedIn,
            SessionState::Validating,
            SessionState::Refreshing,
        ] {
            assert_eq!(state.to_string().parse::<SessionState>().unwrap(), state);
        }
        assert!("expired".parse::<SessionState>().is_err());
    }
}
