//! Terminal commands
//!
//! Each command maps one storefront operation to a JSON [`CommandResult`].

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod reservations;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for CommandResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

impl<T: Serialize> CommandResult<T> {
    /// Print to stdout and report whether the command succeeded
    pub fn emit(self) -> anyhow::Result<bool> {
        println!("{}", serde_json::to_string_pretty(&self)?);
        Ok(self.success)
    }
}
