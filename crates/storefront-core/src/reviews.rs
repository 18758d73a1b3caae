//! Who may see, edit or post a product review

use storefront_api::{Order, Review};
use storefront_session::StoredSession;

/// What the review panel offers the current user for one product
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAccess {
    /// The user already reviewed it and may edit or delete that review
    Own(Review),
    /// The user bought it and has not reviewed it yet
    CanPost,
    /// Signed out, or never ordered it
    ReadOnly,
}

/// The user's review among a product's reviews
pub fn own_review<'a>(reviews: &'a [Review], user: &StoredSession) -> Option<&'a Review> {
    let id = user.id?;
    reviews.iter().find(|r| r.user_id == id)
}

pub fn has_purchased(orders: &[Order], product_id: i64) -> bool {
    orders
        .iter()
        .flat_map(|o| &o.order_product)
        .any(|p| p.product_id == product_id)
}

pub fn review_access(
    user: Option<&StoredSession>,
    reviews: &[Review],
    orders: &[Order],
    product_id: i64,
) -> ReviewAccess {
    let Some(user) = user else {
        return ReviewAccess::ReadOnly;
    };

    if let Some(review) = own_review(reviews, user) {
        return ReviewAccess::Own(review.clone());
    }

    if has_purchased(orders, product_id) {
        ReviewAccess::CanPost
    } else {
        ReviewAccess::ReadOnly
    }
}
