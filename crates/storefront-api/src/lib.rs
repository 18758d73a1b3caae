//! Storefront REST client
//!
//! Thin typed wrapper over the backend's JSON API. Authentication endpoints
//! implement [`storefront_session::AuthBackend`]; everything else takes the
//! caller's bearer token explicitly.

mod auth;
mod catalog;
mod client;
mod error;
mod inquiries;
mod orders;
mod reservations;
mod reviews;
#[cfg(test)]
mod test_server;

pub use catalog::{Lecture, LectureForm, Product, ProductForm};
pub use client::{ApiClient, COOKIE_KEY};
pub use error::ApiError;
pub use inquiries::{Inquiry, InquiryForm, Recomment, RecommentForm};
pub use orders::{Order, OrderForm, OrderProduct};
pub use reservations::{reserved_times, Reservation};
pub use reviews::{Review, ReviewForm};

pub type Result<T> = std::result::Result<T, ApiError>;
