//! Lecture inquiries and their replies

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{require_token, ApiClient};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i64,
    pub lecture_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryForm {
    pub lecture_id: i64,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Reply to an inquiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recomment {
    pub id: i64,
    pub lecture_inquiry_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommentForm {
    pub lecture_inquiry_id: i64,
    pub comment: String,
}

impl ApiClient {
    pub async fn list_inquiries(&self, lecture_id: i64) -> Result<Vec<Inquiry>> {
        let path = format!("/lecture/inquiry/{lecture_id}");
        let builder = self.request(Method::GET, &path, None)?;
        self.execute(builder).await
    }

    pub async fn post_inquiry(&self, token: Option<&str>, inquiry: &InquiryForm) -> Result<()> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::POST, "/lecture-inquiry", Some(token))?
            .json(inquiry);
        self.execute_empty(builder).await
    }

    pub async fn delete_inquiry(&self, token: Option<&str>, id: i64) -> Result<()> {
        let token = require_token(token)?;
        let path = format!("/lecture-inquiry/{id}");
        let builder = self.request(Method::DELETE, &path, Some(token))?;
        self.execute_empty(builder).await
    }

    pub async fn list_recomments(&self, inquiry_id: i64) -> Result<Vec<Recomment>> {
        let builder = self.request(
            Method::GET,
            &format!("/lecture-inquiry/recomment/{inquiry_id}"),
            None,
        )?;
        self.execute(builder).await
    }

    pub async fn post_recomment(
        &self,
        token: Option<&str>,
        recomment: &RecommentForm,
    ) -> Result<()> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::POST, "/recomment", Some(token))?
            .json(recomment);
        self.execute_empty(builder).await
    }

    pub async fn delete_recomment(&self, token: Option<&str>, id: i64) -> Result<()> {
        let token = require_token(token)?;
        let builder = self.request(Method::DELETE, &format!("/recomment/{id}"), Some(token))?;
        self.execute_empty(builder).await
    }
}
