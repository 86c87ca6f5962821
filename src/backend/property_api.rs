

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::{CommitError, FetchError, MetadataReader, StatusCommitter};
use crate::core::config::PurgeConfig;
use crate::core::error::Result;
use crate::deletion::models::{ListingId, ListingMediaSet, ListingStatus, MediaReference};
use crate::utils::truncate_for_log;

const DETAILS_PATH: &str = "/api/getPropertyDetails";

const STATUS_PATH: &str = "/api/updatePropStatus";

#[derive(Debug, Deserialize)]
struct PropertyDetails {
    #[serde(rename = "primaryImage", default)]
    primary_image: Option<String>,
    #[serde(rename = "otherImages", default)]
    other_images: Option<Vec<Option<String>>>,
}

#[derive(Debug, Serialize)]
struct StatusUpdate<'a> {
    property_id: &'a str,
    status: &'a str,
}


/// Client for the property backend: reads listing media and writes status.
pub struct PropertyApiClient {
    base_url: String,
    client: Client,
}

impl PropertyApiClient {

    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Property API client initialized (url={})", base_url);
        Self { base_url, client }
    }


    pub fn from_config(config: &PurgeConfig) -> Result<Self> {
        Ok(Self::new(config.backend_url.clone(), config.http_client()?))
    }


    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_details(body: &str) -> std::result::Result<ListingMediaSet, FetchError> {
    let details: PropertyDetails = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(e.to_string()))?;

    // An empty primary means "no primary". Other unusable entries are kept
    // so that they surface as failed erases in the report.
    let primary = details
        .primary_image
        .filter(|url| !url.is_empty())
        .map(MediaReference::new);

    let secondary = details
        .other_images
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(MediaReference::new)
        .collect();

    Ok(ListingMediaSet::new(primary, secondary))
}

#[async_trait]
impl MetadataReader for PropertyApiClient {
    async fn fetch(&self, id: &ListingId) -> std::result::Result<ListingMediaSet, FetchError> {
        debug!("Fetching details for listing {}", id);

        let response = self
            .client
            .get(self.endpoint(DETAILS_PATH))
            .query(&[("property_id", id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let media = parse_details(&body).map_err(|e| {
            debug!("Unparsable details body: {}", truncate_for_log(&body, 200));
            e
        })?;

        debug!("Listing {} has {} media references", id, media.len());
        Ok(media)
    }
}

#[async_trait]
impl StatusCommitter for PropertyApiClient {
    async fn set_status(
        &self,
        id: &ListingId,
        status: ListingStatus,
    ) -> std::result::Result<(), CommitError> {
        debug!("Setting listing {} status to {}", id, status);

        let update = StatusUpdate {
            property_id: id.as_str(),
            status: status.wire_value(),
        };

        let response = self
            .client
            .post(self.endpoint(STATUS_PATH))
            .json(&update)
            .send()
            .await?;

        let code = response.status();
        if !code.is_success() {
            return Err(CommitError::Status(code.as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::{local_client, request_body, serve_once};

    #[test]
    fn test_parse_full_details() {
        let body = r#"{
            "property_id": "L1",
            "primaryImage": "imgA",
            "otherImages": ["imgB", "imgC"],
            "price": 1200
        }"#;
        let media = parse_details(body).unwrap();
        assert_eq!(media.primary, Some(MediaReference::new("imgA")));
        assert_eq!(media.secondary.len(), 2);
    }

    #[test]
    fn test_parse_missing_and_null_images() {
        let media = parse_details(r#"{"property_id": "L2"}"#).unwrap();
        assert!(media.is_empty());

        let media = parse_details(r#"{"primaryImage": null, "otherImages": null}"#).unwrap();
        assert!(media.is_empty());
    }

    #[test]
    fn test_parse_empty_primary_is_absent() {
        let media = parse_details(r#"{"primaryImage": "", "otherImages": ["imgB"]}"#).unwrap();
        assert!(media.primary.is_none());
        assert_eq!(media.references(), vec![MediaReference::new("imgB")]);
    }

    #[test]
    fn test_parse_drops_null_entries() {
        let media = parse_details(r#"{"primaryImage": "imgA", "otherImages": [null, "imgB"]}"#).unwrap();
        assert_eq!(
            media.references(),
            vec![MediaReference::new("imgA"), MediaReference::new("imgB")]
        );
        assert_eq!(media.secondary, vec![MediaReference::new("imgB")]);
    }

    #[test]
    fn test_parse_keeps_blank_secondaries() {
        let media = parse_details(r#"{"otherImages": ["imgB", " "]}"#).unwrap();
        assert_eq!(
            media.secondary,
            vec![MediaReference::new("imgB"), MediaReference::new(" ")]
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_details("<html>"), Err(FetchError::Malformed(_))));
        assert!(matches!(
            parse_details(r#"{"otherImages": "imgB"}"#),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_status_update_body() {
        let update = StatusUpdate {
            property_id: "L1",
            status: ListingStatus::Deleted.wire_value(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"property_id": "L1", "status": "0"}));
    }

    #[test]
    fn test_endpoint_join() {
        let client = PropertyApiClient::new("http://api.example.com/", Client::new());
        assert_eq!(client.base_url(), "http://api.example.com");
        assert_eq!(
            client.endpoint(DETAILS_PATH),
            "http://api.example.com/api/getPropertyDetails"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_property_id_and_parses_body() {
        let (url, server) = serve_once("200 OK", r#"{"primaryImage":"imgA","otherImages":["imgB"]}"#).await;
        let client = PropertyApiClient::new(url, local_client());

        let media = client.fetch(&"L1".into()).await.unwrap();
        assert_eq!(media.references().len(), 2);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/getPropertyDetails?property_id=L1 HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let (url, server) = serve_once("500 Internal Server Error", "{}").await;
        let client = PropertyApiClient::new(url, local_client());

        let result = client.fetch(&"L1".into()).await;
        assert!(matches!(result, Err(FetchError::Status(500))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_maps_unparsable_body() {
        let (url, server) = serve_once("200 OK", "<html>oops</html>").await;
        let client = PropertyApiClient::new(url, local_client());

        let result = client.fetch(&"L1".into()).await;
        assert!(matches!(result, Err(FetchError::Malformed(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_set_status_posts_wire_value() {
        let (url, server) = serve_once("200 OK", "{}").await;
        let client = PropertyApiClient::new(url, local_client());

        client.set_status(&"L1".into(), ListingStatus::Deleted).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/updatePropStatus HTTP/1.1\r\n"));
        let body: serde_json::Value = serde_json::from_str(request_body(&request)).unwrap();
        assert_eq!(body, serde_json::json!({"property_id": "L1", "status": "0"}));
    }

    #[tokio::test]
    async fn test_set_status_maps_error_status() {
        let (url, server) = serve_once("503 Service Unavailable", "{}").await;
        let client = PropertyApiClient::new(url, local_client());

        let result = client.set_status(&"L1".into(), ListingStatus::Deleted).await;
        assert!(matches!(result, Err(CommitError::Status(503))));
        server.await.unwrap();
    }
}
