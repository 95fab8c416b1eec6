//! # Hotel API client
//!
//! A thin async client over the hotel REST API. The layout engine only
//! sees the [`ImageSource`] seam; the CLI uses the rest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::error::{Result, StaysheetError};
use crate::model::{HotelRecord, ImagesResponse, NewProposal, ProposalSummary};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Where hotel images come from, as data URIs in display order.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn hotel_images(&self, hotel_id: u64) -> Result<Vec<String>>;
}

pub struct HotelApiClient {
    base_url: String,
    http_client: Client,
    image_limit: Option<u32>,
}

impl HotelApiClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> HotelApiClientBuilder {
        HotelApiClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /hotels`, optionally narrowed to one city.
    pub async fn list_hotels(&self, city: Option<&str>) -> Result<Vec<HotelRecord>> {
        let url = format!("{}/hotels", self.base_url);
        let mut request = self.http_client.get(&url);
        if let Some(city) = city {
            request = request.query(&[("city", city)]);
        }
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<Vec<HotelRecord>>().await?)
    }

    /// Look a hotel up by id in the full listing.
    pub async fn find_hotel(&self, hotel_id: u64) -> Result<HotelRecord> {
        self.list_hotels(None)
            .await?
            .into_iter()
            .find(|h| h.id == Some(hotel_id))
            .ok_or(StaysheetError::HotelNotFound(hotel_id))
    }

    /// `GET /proposals`
    pub async fn list_proposals(&self) -> Result<Vec<ProposalSummary>> {
        let url = format!("{}/proposals", self.base_url);
        let response = check_status(self.http_client.get(&url).send().await?).await?;
        Ok(response.json::<Vec<ProposalSummary>>().await?)
    }

    /// `POST /proposals`, returning the stored proposal.
    pub async fn create_proposal(&self, proposal: &NewProposal) -> Result<ProposalSummary> {
        let url = format!("{}/proposals", self.base_url);
        let request = self.http_client.post(&url).json(proposal);
        let response = check_status(request.send().await?).await?;
        let created = response.json::<ProposalSummary>().await?;
        log::info!(
            "created proposal {} for hotel {}",
            created.reference().unwrap_or_else(|| "-".into()),
            proposal.hotel_id
        );
        Ok(created)
    }

    /// `DELETE /proposals/{id}`
    pub async fn delete_proposal(&self, proposal_id: u64) -> Result<()> {
        let url = format!("{}/proposals/{}", self.base_url, proposal_id);
        check_status(self.http_client.delete(&url).send().await?).await?;
        log::info!("deleted proposal {}", proposal_id);
        Ok(())
    }
}

#[async_trait]
impl ImageSource for HotelApiClient {
    /// `GET /hotels/{id}/images/base64[?limit=N]`
    async fn hotel_images(&self, hotel_id: u64) -> Result<Vec<String>> {
        let url = format!("{}/hotels/{}/images/base64", self.base_url, hotel_id);
        let mut request = self.http_client.get(&url);
        if let Some(limit) = self.image_limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = check_status(request.send().await?).await?;
        let body = response.json::<ImagesResponse>().await?;
        log::debug!("hotel {}: {} image(s) fetched", hotel_id, body.images.len());
        Ok(body.images)
    }
}

/// Turn a non-success response into [`StaysheetError::Api`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StaysheetError::Api {
        status: status.as_u16(),
        body,
    })
}

pub struct HotelApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    image_limit: Option<u32>,
}

impl HotelApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            image_limit: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Whole-request timeout. Requests wait indefinitely when unset.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ask the API for at most `limit` images per hotel.
    pub fn image_limit(mut self, limit: u32) -> Self {
        self.image_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<HotelApiClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(HotelApiClient {
            base_url,
            http_client: http.build()?,
            image_limit: self.image_limit,
        })
    }
}

impl Default for HotelApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let client = HotelApiClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HotelApiClient::builder()
            .base_url("http://api.test/v1/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://api.test/v1");
    }

    #[test]
    fn test_builder_keeps_image_limit() {
        let client = HotelApiClient::builder()
            .image_limit(5)
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(client.image_limit, Some(5));
    }
}
