use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};

use crate::config::Config;
use crate::error::ApiError;
use crate::listing::{parse_listing, Listing};

/// HTTP client for the TreeDrive API. The session is carried by a cookie
/// store, so one client instance spans login and the calls that follow.
#[derive(Debug, Clone)]
pub struct TreeDriveClient {
    client: Client,
    base: String,
}

impl TreeDriveClient {
    pub fn new(config: &Config) -> Result<TreeDriveClient, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        let base = config.server.trim_end_matches('/').to_string();
        Ok(TreeDriveClient { client, base })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Filenames travel percent-encoded in the `file` query parameter.
    fn file_url(&self, path: &str, filename: &str) -> String {
        format!("{}{}?file={}", self.base, path, urlencoding::encode(filename))
    }

    async fn expect_text(res: Response) -> Result<String, ApiError> {
        let status = res.status();
        let body = res.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_status(status, body))
        }
    }

    /// `POST /api/login` with the raw username as body. On success the
    /// response body is the server's display text.
    pub async fn login(&self, username: &str) -> Result<String, ApiError> {
        let res = self
            .client
            .post(self.url("/api/login"))
            .header(CONTENT_TYPE, "text/plain")
            .body(username.to_string())
            .send()
            .await?;
        let message = Self::expect_text(res).await?;
        tracing::info!("logged in as {}", username);
        Ok(message)
    }

    /// `DELETE /api/login`. The response body is surfaced verbatim whatever
    /// the status, matching the server's logout contract.
    pub async fn logout(&self) -> Result<String, ApiError> {
        let res = self.client.delete(self.url("/api/login")).send().await?;
        Ok(res.text().await?)
    }

    /// `GET /api/login`: 200 means logged in (body = username), any other
    /// status means logged out. Being logged out is not an error.
    pub async fn whoami(&self) -> Result<Option<String>, ApiError> {
        let res = self.client.get(self.url("/api/login")).send().await?;
        if res.status().is_success() {
            Ok(Some(res.text().await?.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// Fetch and parse the file listing.
    pub async fn list(&self) -> Result<Listing, ApiError> {
        let res = self.client.get(self.url("/api/list")).send().await?;
        let body = Self::expect_text(res).await?;
        let listing = parse_listing(&body);
        if let Listing::Files(entries) = &listing {
            tracing::info!("listing parsed: {} entries", entries.len());
        }
        Ok(listing)
    }

    pub async fn download(&self, filename: &str) -> Result<Bytes, ApiError> {
        let res = self
            .client
            .get(self.file_url("/api/get", filename))
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status, res.text().await?));
        }
        let data = res.bytes().await?;
        tracing::info!("downloaded {} ({} bytes)", filename, data.len());
        Ok(data)
    }

    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> Result<String, ApiError> {
        let size = data.len();
        let res = self
            .client
            .post(self.file_url("/api/push", filename))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;
        let message = Self::expect_text(res).await?;
        tracing::info!("uploaded {} ({} bytes)", filename, size);
        Ok(message)
    }

    pub async fn delete(&self, filename: &str) -> Result<String, ApiError> {
        let res = self
            .client
            .delete(self.file_url("/api/delete", filename))
            .send()
            .await?;
        let message = Self::expect_text(res).await?;
        tracing::info!("deleted {}", filename);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TreeDriveClient {
        TreeDriveClient::new(&Config {
            server: "http://localhost:8271/".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(client().url("/api/list"), "http://localhost:8271/api/list");
    }

    #[test]
    fn filenames_are_percent_encoded_in_queries() {
        assert_eq!(
            client().file_url("/api/get", "my report.pdf"),
            "http://localhost:8271/api/get?file=my%20report.pdf"
        );
    }
}
