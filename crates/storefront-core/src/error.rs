//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] storefront_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] storefront_session::SessionError),

    #[error("API error: {0}")]
    Api(#[from] storefront_api::ApiError),

    #[error("Booking error: {0}")]
    Booking(#[from] storefront_booking::BookingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No cart items selected")]
    EmptyCart,

    #[error("Quantity is too large")]
    QuantityOverflow,

    #[error("Order total is too large")]
    TotalOverflow,

    #[error("Configuration error: {0}")]
    Config(String),
}
