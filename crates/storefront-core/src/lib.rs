//! Storefront Core
//!
//! Wires storage, the session layer, the REST client and the booking rules
//! into one [`Storefront`] handed to whatever host runs the app.

mod cart;
mod config;
mod error;
mod reviews;
mod storefront;
#[cfg(test)]
mod test_server;

pub use cart::{discounted_price, Cart, CartItem};
pub use config::Config;
pub use error::CoreError;
pub use reviews::{has_purchased, own_review, review_access, ReviewAccess};
pub use storefront::Storefront;

// Re-export core components
pub use storefront_api::{
    ApiClient, ApiError, Inquiry, InquiryForm, Lecture, LectureForm, Order, OrderForm,
    OrderProduct, Product, ProductForm, Recomment, RecommentForm, Reservation, Review, ReviewForm,
};
pub use storefront_booking::{BookingError, DayCell, ReservationCalendar, Selection};
pub use storefront_session::{
    AccountService, AppShell, AuthFailure, Notification, NotificationKind, Notifier, Route,
    SessionError, SessionManager, SessionState, SignInForm, SignUpForm, StoredSession,
};
pub use storefront_storage::{
    Database, KeyValueStore, KeyValueStoreExt, MemoryStore, StorageError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
