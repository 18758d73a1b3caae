//! Product and class listings
use serde::Serialize;

use storefront_core::{discounted_price, Lecture, Product};

use super::CommandResult;
use crate::state::AppState;

/// Catalog entry with its discounted price worked out
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem<T> {
    #[serde(flatten)]
    pub item: T,
    pub sale_price: u64,
}

impl From<Product> for PricedItem<Product> {
    fn from(product: Product) -> Self {
        let sale_price = discounted_price(product.price, product.discount);
        Self {
            item: product,
            sale_price,
        }
    }
}

impl From<Lecture> for PricedItem<Lecture> {
    fn from(lecture: Lecture) -> Self {
        let sale_price = discounted_price(lecture.price, lecture.discount);
        Self {
            item: lecture,
            sale_price,
        }
    }
}

pub async fn products(state: &AppState) -> CommandResult<Vec<PricedItem<Product>>> {
    state
        .storefront()
        .products()
        .await
        .map(|products| products.into_iter().map(PricedItem::from).collect())
        .into()
}

pub async fn product(state: &AppState, id: i64) -> CommandResult<PricedItem<Product>> {
    state.storefront().product(id).await.map(PricedItem::from).into()
}

pub async fn lectures(state: &AppState) -> CommandResult<Vec<PricedItem<Lecture>>> {
    state
        .storefront()
        .lectures()
        .await
        .map(|lectures| lectures.into_iter().map(PricedItem::from).collect())
        .into()
}

pub async fn lecture(state: &AppState, id: i64) -> CommandResult<PricedItem<Lecture>> {
    state.storefront().lecture(id).await.map(PricedItem::from).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use storefront_core::MemoryStore;

    fn catalog_app() -> Router {
        Router::new()
            .route(
                "/product/all",
                get(|| async {
                    Json(json!([
                        {"id": 1, "name": "Rice cake box", "price": 12000, "discount": 10},
                        {"id": 2, "name": "Yakgwa", "price": 8000}
                    ]))
                }),
            )
            .route(
                "/lecture/{id}",
                get(|Path(id): Path<i64>| async move {
                    if id == 404 {
                        return (StatusCode::NOT_FOUND, Json(json!({"message": "No such class"})));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "id": id,
                            "name": "Songpyeon class",
                            "price": 50000,
                            "discount": 20,
                            "lectureDuration": 120
                        })),
                    )
                }),
            )
    }

    #[tokio::test]
    async fn test_products_carry_sale_price() {
        let base = testing::spawn(catalog_app()).await;
        let (state, _host) = testing::state(&base, MemoryStore::new());

        let result = products(&state).await;
        let items = result.data.unwrap();
        assert_eq!(items[0].sale_price, 10800);
        assert_eq!(items[1].sale_price, 8000);

        let json = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(json["name"], "Rice cake box");
        assert_eq!(json["salePrice"], 10800);
    }

    #[tokio::test]
    async fn test_missing_lecture_reports_error() {
        let base = testing::spawn(catalog_app()).await;
        let (state, host) = testing::state(&base, MemoryStore::new());

        let found = lecture(&state, 3).await.data.unwrap();
        assert_eq!(found.sale_price, 40000);
        assert_eq!(found.item.lecture_duration, 120);

        let missing = lecture(&state, 404).await;
        assert!(!missing.success);
        assert!(host.events().contains(&"[failed] No such class".to_string()));
    }
}
