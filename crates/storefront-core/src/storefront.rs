//! Application state container
//!
//! Owns the session layer, the REST client and the reservation calendar.
//! Hosts talk to the shop only through [`Storefront`]; every user-facing
//! outcome is reported through the injected [`Notifier`].

use chrono::{NaiveDate, NaiveTime};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use storefront_api::{
    ApiClient, Inquiry, InquiryForm, Lecture, LectureForm, Order, OrderForm, OrderProduct,
    Product, ProductForm, Recomment, RecommentForm, Review,
};
use storefront_booking::{BookingError, ReservationCalendar, Selection};
use storefront_session::{
    AccountService, AppShell, Notification, Notifier, SessionManager, SignInForm, SignUpForm,
    StoredSession,
};
use storefront_storage::{Database, KeyValueStore};

use crate::cart::Cart;
use crate::config::Config;
use crate::error::CoreError;
use crate::reviews::ReviewAccess;
use crate::Result;

const CALENDAR_TOAST_TIMER: Duration = Duration::from_millis(1000);

/// Toast wording for one API operation
struct Outcome {
    id: &'static str,
    success: Option<&'static str>,
    failure: &'static str,
}

impl Outcome {
    const fn quiet(id: &'static str, failure: &'static str) -> Self {
        Self {
            id,
            success: None,
            failure,
        }
    }

    const fn loud(id: &'static str, success: &'static str, failure: &'static str) -> Self {
        Self {
            id,
            success: Some(success),
            failure,
        }
    }
}

pub struct Storefront {
    config: Config,
    api: ApiClient,
    sessions: SessionManager,
    accounts: AccountService,
    notifier: Arc<dyn Notifier>,
    calendar: Arc<RwLock<ReservationCalendar>>,
}

impl Storefront {
    /// Open the client database under the configured data directory
    pub fn new(
        config: Config,
        notifier: Arc<dyn Notifier>,
        shell: Arc<dyn AppShell>,
    ) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_store(config, Arc::new(db), notifier, shell)
    }

    pub fn with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        shell: Arc<dyn AppShell>,
    ) -> Result<Self> {
        config.validate()?;

        let api = ApiClient::with_timeout(&config.api_base_url, config.request_timeout())?
            .with_cookie_store(store.clone());
        let sessions = SessionManager::new(store, Arc::new(api.clone()), notifier.clone(), shell);
        let accounts = AccountService::new(sessions.clone());

        Ok(Self {
            config,
            api,
            sessions,
            accounts,
            notifier,
            calendar: Arc::new(RwLock::new(ReservationCalendar::starting_today())),
        })
    }

    pub fn with_calendar(self, calendar: ReservationCalendar) -> Self {
        *self.calendar.write() = calendar;
        self
    }

    /// Validate whatever session survived the last run
    pub async fn initialize(&self) -> Option<StoredSession> {
        let session = self.sessions.restore().await;

        tracing::info!(
            signed_in = session.is_some(),
            state = %self.sessions.state(),
            "Storefront initialized"
        );
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // === Account operations ===

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn current_user(&self) -> Option<StoredSession> {
        self.sessions.load()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<StoredSession> {
        let form = SignInForm {
            email: email.to_string(),
            password: password.to_string(),
        };
        Ok(self.accounts.sign_in(&form).await?)
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        Ok(self.accounts.sign_up(form).await?)
    }

    pub async fn sign_out(&self) -> Result<()> {
        Ok(self.accounts.sign_out().await?)
    }

    // === Catalog operations ===

    pub async fn products(&self) -> Result<Vec<Product>> {
        let token = self.sessions.token();
        let result = self.api.list_products(token.as_deref()).await;
        self.report(
            result,
            Outcome::quiet("products", "Could not load products. Please refresh."),
        )
    }

    pub async fn product(&self, id: i64) -> Result<Product> {
        let result = self.api.get_product(id).await;
        self.report(result, Outcome::quiet("product", "Could not load the product."))
    }

    pub async fn add_product(&self, product: &ProductForm) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.add_product(token.as_deref(), product).await;
        self.report(
            result,
            Outcome::loud("add-product", "Product added.", "Could not add the product."),
        )
    }

    pub async fn update_product(&self, id: i64, product: &ProductForm) -> Result<Product> {
        let token = self.sessions.token();
        let result = self.api.update_product(token.as_deref(), id, product).await;
        self.report(
            result,
            Outcome::loud(
                "update-product",
                "Product updated.",
                "Could not update the product.",
            ),
        )
    }

    pub async fn lectures(&self) -> Result<Vec<Lecture>> {
        let token = self.sessions.token();
        let result = self.api.list_lectures(token.as_deref()).await;
        self.report(
            result,
            Outcome::quiet("lectures", "Could not load classes. Please try again."),
        )
    }

    pub async fn lecture(&self, id: i64) -> Result<Lecture> {
        let result = self.api.get_lecture(id).await;
        self.report(
            result,
            Outcome::quiet("lecture", "Could not load the class. Please try again."),
        )
    }

    pub async fn add_lecture(&self, lecture: &LectureForm) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.add_lecture(token.as_deref(), lecture).await;
        self.report(
            result,
            Outcome::loud("add-lecture", "Class added.", "Could not add the class."),
        )
    }

    pub async fn update_lecture(&self, id: i64, lecture: &LectureForm) -> Result<Lecture> {
        let token = self.sessions.token();
        let result = self.api.update_lecture(token.as_deref(), id, lecture).await;
        self.report(
            result,
            Outcome::loud(
                "update-lecture",
                "Class updated.",
                "Could not update the class.",
            ),
        )
    }

    // === Inquiry operations ===

    pub async fn inquiries(&self, lecture_id: i64) -> Result<Vec<Inquiry>> {
        let result = self.api.list_inquiries(lecture_id).await;
        self.report(result, Outcome::quiet("inquiries", "Could not load inquiries."))
    }

    pub async fn post_inquiry(&self, inquiry: &InquiryForm) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.post_inquiry(token.as_deref(), inquiry).await;
        self.report(
            result,
            Outcome::loud("post-inquiry", "Inquiry posted.", "Could not post the inquiry."),
        )
    }

    pub async fn delete_inquiry(&self, id: i64) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.delete_inquiry(token.as_deref(), id).await;
        self.report(
            result,
            Outcome::loud(
                "delete-inquiry",
                "Inquiry deleted.",
                "Could not delete the inquiry.",
            ),
        )
    }

    pub async fn replies(&self, inquiry_id: i64) -> Result<Vec<Recomment>> {
        let result = self.api.list_recomments(inquiry_id).await;
        self.report(result, Outcome::quiet("replies", "Could not load replies."))
    }

    pub async fn post_reply(&self, reply: &RecommentForm) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.post_recomment(token.as_deref(), reply).await;
        self.report(
            result,
            Outcome::loud("post-reply", "Reply posted.", "Could not post the reply."),
        )
    }

    pub async fn delete_reply(&self, id: i64) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.delete_recomment(token.as_deref(), id).await;
        self.report(
            result,
            Outcome::loud("delete-reply", "Reply deleted.", "Could not delete the reply."),
        )
    }

    // === Order operations ===

    pub async fn orders(&self) -> Result<Vec<Order>> {
        let token = self.sessions.token();
        let result = self.api.list_orders(token.as_deref()).await;
        self.report(result, Outcome::quiet("orders", "Could not load your orders."))
    }

    pub async fn place_order(&self, form: &OrderForm, products: &[OrderProduct]) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.place_order(token.as_deref(), form, products).await;
        self.report(
            result,
            Outcome::loud("order", "Thank you for your order.", "Please try ordering again."),
        )
    }

    /// Order the selected cart items; the total is always recomputed
    pub async fn checkout(&self, mut form: OrderForm, cart: &Cart) -> Result<()> {
        let products = cart.order_products();
        if products.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        form.total_price = cart.total()?;
        self.place_order(&form, &products).await
    }

    /// Orders are only fetched when someone is signed in
    pub async fn review_access(
        &self,
        product_id: i64,
        reviews: &[Review],
    ) -> Result<ReviewAccess> {
        let Some(user) = self.current_user() else {
            return Ok(ReviewAccess::ReadOnly);
        };

        let orders = self.orders().await?;
        Ok(crate::reviews::review_access(
            Some(&user),
            reviews,
            &orders,
            product_id,
        ))
    }

    pub async fn cancel_order(&self, order_id: i64, reason: &str) -> Result<()> {
        let token = self.sessions.token();
        let result = self.api.cancel_order(token.as_deref(), order_id, reason).await;
        self.report(
            result,
            Outcome::loud(
                "cancel-order",
                "Your order was cancelled.",
                "Could not cancel the order.",
            ),
        )
    }

    // === Reservation operations ===

    pub async fn reserved_times(&self) -> Result<Vec<String>> {
        let result = self.api.reserved_times().await;
        self.report(
            result,
            Outcome::quiet("reservations", "Could not load reservations."),
        )
    }

    /// Taken start times on `day`
    pub async fn reserved_on(&self, day: NaiveDate) -> Result<Vec<NaiveTime>> {
        let reserved = self.reserved_times().await?;
        Ok(storefront_booking::reserved_on(day, &reserved))
    }

    pub fn calendar(&self) -> ReservationCalendar {
        self.calendar.read().clone()
    }

    pub fn calendar_prev_month(&self) -> Result<NaiveDate> {
        let result = self.calendar.write().prev_month();
        self.report_booking(result, "calendar-prev")
    }

    pub fn calendar_next_month(&self) -> Result<NaiveDate> {
        let result = self.calendar.write().next_month();
        self.report_booking(result, "calendar-next")
    }

    pub fn select_date(&self, day: NaiveDate) -> Result<Selection> {
        let result = self.calendar.write().select_date(day);
        let id = if matches!(result, Err(BookingError::Sunday)) {
            "calendar-sunday"
        } else {
            "calendar-select"
        };
        self.report_booking(result, id)
    }

    pub fn calendar_today(&self) -> ReservationCalendar {
        let mut calendar = self.calendar.write();
        calendar.go_to_today();
        calendar.clone()
    }

    fn report<T>(&self, result: storefront_api::Result<T>, outcome: Outcome) -> Result<T> {
        match result {
            Ok(value) => {
                if let Some(message) = outcome.success {
                    self.notifier
                        .notify(Notification::success(outcome.id, message));
                }
                Ok(value)
            }
            Err(e) => {
                let message = e.message().unwrap_or(outcome.failure).to_string();
                self.notifier
                    .notify(Notification::failed(outcome.id, message));

                tracing::warn!(operation = outcome.id, error = %e, "Request failed");
                Err(e.into())
            }
        }
    }

    fn report_booking<T>(
        &self,
        result: storefront_booking::Result<T>,
        id: &'static str,
    ) -> Result<T> {
        result.map_err(|e| {
            self.notifier.notify(
                Notification::failed(id, booking_message(&e)).with_timer(CALENDAR_TOAST_TIMER),
            );
            e.into()
        })
    }
}

fn booking_message(error: &BookingError) -> String {
    match error {
        BookingError::BeforeCurrentMonth => "You cannot go before the current month.".to_string(),
        BookingError::NotAfterToday => "Reservations open from tomorrow.".to_string(),
        BookingError::Sunday => "Reservations are not available on Sundays.".to_string(),
        other => other.to_string(),
    }
}

impl Clone for Storefront {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            api: self.api.clone(),
            sessions: self.sessions.clone(),
            accounts: self.accounts.clone(),
            notifier: self.notifier.clone(),
            calendar: self.calendar.clone(),
        }
    }
}
