//! Class reservations

use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::ApiClient;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub lecture_id: Option<i64>,
    /// Booked start times; the backend sends either one string or a list
    #[serde(default, deserialize_with = "one_or_many")]
    pub reserve_date: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(date) => vec![date],
        OneOrMany::Many(dates) => dates,
    })
}

/// Every booked start time across all reservations
pub fn reserved_times(reservations: &[Reservation]) -> Vec<String> {
    reservations
        .iter()
        .flat_map(|r| r.reserve_date.iter().cloned())
        .collect()
}

impl ApiClient {
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let builder = self.request(Method::GET, "/reservation/all", None)?;
        self.execute(builder).await
    }

    pub async fn reserved_times(&self) -> Result<Vec<String>> {
        let reservations = self.list_reservations().await?;
        Ok(reserved_times(&reservations))
    }
}
