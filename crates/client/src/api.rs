//! REST client for the listing endpoints of the Röhrenbörse API.
//!
//! [`ListingsTransport`] is the seam [`crate::state::ListingsState`]
//! depends on; [`ListingsApi`] is its [`reqwest`] implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use roehrenboerse_core::listing::{CreateListing, Listing, UpdateListing};
use roehrenboerse_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// The listing mutations and reads the client state relies on.
#[async_trait]
pub trait ListingsTransport: Send + Sync {
    /// All listings, newest first.
    async fn fetch_all(&self) -> Result<Vec<Listing>, ClientError>;

    /// Create a listing and return the stored record.
    async fn create(&self, input: &CreateListing) -> Result<Listing, ClientError>;

    /// Apply a partial update and return the stored record.
    async fn update(&self, id: DbId, patch: &UpdateListing) -> Result<Listing, ClientError>;

    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

/// HTTP client for a single Röhrenbörse API server.
#[derive(Clone)]
pub struct ListingsApi {
    client: reqwest::Client,
    api_url: String,
}

impl ListingsApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:3000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    /// A single listing by id.
    pub async fn get(&self, id: DbId) -> Result<Listing, ClientError> {
        let response = self.client.get(self.listing_url(id)).send().await?;
        Self::parse_response(response).await
    }

    /// Listings whose title contains `query` or whose tags include it.
    pub async fn search(&self, query: &str) -> Result<Vec<Listing>, ClientError> {
        let response = self
            .client
            .get(self.listings_url())
            .query(&[("q", query)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Listings in exactly this category.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Listing>, ClientError> {
        let response = self
            .client
            .get(self.listings_url())
            .query(&[("category", category)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn listings_url(&self) -> String {
        format!("{}/api/listings", self.api_url)
    }

    fn listing_url(&self, id: DbId) -> String {
        format!("{}/api/listings/{id}", self.api_url)
    }

    /// Ensure the response has a success status code, otherwise turn the
    /// error body into a [`ClientError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::from_body(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ListingsTransport for ListingsApi {
    async fn fetch_all(&self) -> Result<Vec<Listing>, ClientError> {
        let response = self.client.get(self.listings_url()).send().await?;
        Self::parse_response(response).await
    }

    async fn create(&self, input: &CreateListing) -> Result<Listing, ClientError> {
        let response = self
            .client
            .post(self.listings_url())
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update(&self, id: DbId, patch: &UpdateListing) -> Result<Listing, ClientError> {
        let response = self
            .client
            .put(self.listing_url(id))
            .json(patch)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self.client.delete(self.listing_url(id)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
