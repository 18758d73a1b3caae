//! Session error types

use thiserror::Error;

use crate::backend::AuthFailure;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] storefront_storage::StorageError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}
