//! Products and lecture classes

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{require_token, ApiClient};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
    /// Percent off the list price
    #[serde(default)]
    pub discount: Option<u32>,
    #[serde(default)]
    pub product_img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
    #[serde(default)]
    pub discount: Option<u32>,
    /// Class length in minutes
    pub lecture_duration: u32,
    #[serde(default)]
    pub lecture_img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureForm {
    pub name: String,
    pub description: String,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    pub lecture_duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecture_img: Option<String>,
}

impl ApiClient {
    pub async fn list_products(&self, token: Option<&str>) -> Result<Vec<Product>> {
        let builder = self.request(Method::GET, "/product/all", token)?;
        self.execute(builder).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product> {
        let builder = self.request(Method::GET, &format!("/product/{id}"), None)?;
        self.execute(builder).await
    }

    pub async fn add_product(&self, token: Option<&str>, product: &ProductForm) -> Result<()> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::POST, "/product", Some(token))?
            .json(product);
        self.execute_empty(builder).await?;

        tracing::info!(product_name = %product.name, "Added product");
        Ok(())
    }

    pub async fn update_product(
        &self,
        token: Option<&str>,
        id: i64,
        product: &ProductForm,
    ) -> Result<Product> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::PATCH, &format!("/product/{id}"), Some(token))?
            .json(product);
        self.execute(builder).await
    }

    pub async fn list_lectures(&self, token: Option<&str>) -> Result<Vec<Lecture>> {
        let builder = self.request(Method::GET, "/lecture/all", token)?;
        self.execute(builder).await
    }

    pub async fn get_lecture(&self, id: i64) -> Result<Lecture> {
        let builder = self.request(Method::GET, &format!("/lecture/{id}"), None)?;
        self.execute(builder).await
    }

    pub async fn add_lecture(&self, token: Option<&str>, lecture: &LectureForm) -> Result<()> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::POST, "/lecture", Some(token))?
            .json(lecture);
        self.execute_empty(builder).await?;

        tracing::info!(lecture_name = %lecture.name, "Added lecture");
        Ok(())
    }

    pub async fn update_lecture(
        &self,
        token: Option<&str>,
        id: i64,
        lecture: &LectureForm,
    ) -> Result<Lecture> {
        let token = require_token(token)?;
        let builder = self
            .request(Method::PATCH, &format!("/lecture/{id}"), Some(token))?
            .json(lecture);
        self.execute(builder).await
    }
}
