//! HTTP implementation of [`ChatBackend`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use url::Url;

use super::{ChatBackend, ChatReply, ChatRequest, ResumeFile, UploadReply};
use crate::error::{Error, Result};

/// HTTP client for the chat backend.
///
/// # Example
///
/// ```rust,no_run
/// use resume_chat::client::{ChatBackend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:5000")?;
/// backend.clear_chat("session_123").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a new backend client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Where the backend is mounted (e.g., `http://localhost:5000`)
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new backend client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Endpoints are joined relative to the base, so it has to look like a directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_chat(&self, request: &ChatRequest<'_>) -> Result<ChatReply> {
        let response = self
            .http
            .post(self.url("chat")?)
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn clear_chat(&self, session_id: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("clear-chat")?)
            .form(&[("session_id", session_id)])
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn upload_resume(&self, session_id: &str, file: &ResumeFile) -> Result<UploadReply> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("file", part)
            .text("session_id", session_id.to_string());

        let response = self
            .http
            .post(self.url("upload-resume")?)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_endpoints_under_base_path() {
        let backend = HttpBackend::new("http://localhost:5000/assistant").unwrap();
        assert_eq!(
            backend.url("chat").unwrap().as_str(),
            "http://localhost:5000/assistant/chat"
        );
        assert_eq!(backend.base_url().path(), "/assistant/");

        let backend = HttpBackend::new("http://localhost:5000").unwrap();
        assert_eq!(
            backend.url("upload-resume").unwrap().as_str(),
            "http://localhost:5000/upload-resume"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpBackend::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
