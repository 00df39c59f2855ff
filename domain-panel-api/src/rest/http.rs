//! Request helpers for [`RestDomainApi`].

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ApiErrorMapper, ErrorContext, RawApiError};
use crate::utils::log_sanitizer::sanitize_body;

use super::RestDomainApi;

impl RestDomainApi {
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| ApiError::Unknown {
            status: None,
            raw_message: format!("invalid endpoint '{path}': {e}"),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self.client.request(method, url).bearer_auth(&self.token))
    }

    fn json_body<B: Serialize>(body: &B) -> Result<String> {
        serde_json::to_string(body).map_err(|e| ApiError::SerializationError {
            detail: e.to_string(),
        })
    }

    /// Turn a non-2xx response into an error, logged at a level matching its kind.
    fn check_status(&self, status: u16, text: &str, path: &str) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }
        let err = self.map_error(
            status,
            RawApiError::from_body(text),
            ErrorContext {
                path: path.to_string(),
                retry_after: None,
            },
        );
        if err.is_expected() {
            log::warn!("{path}: {err}");
        } else {
            log::error!("{path}: {err} (body: {})", sanitize_body(text));
        }
        Err(err)
    }

    fn decode<T: DeserializeOwned>(&self, status: u16, text: &str, path: &str) -> Result<T> {
        self.check_status(status, text, path)?;
        HttpUtils::parse_json(text, path)
    }

    /// `GET`, retried on transient failures.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.request(Method::GET, path)?;
        let (status, text) =
            HttpUtils::execute_request_with_retry(req, "GET", path, self.max_retries).await?;
        self.decode(status, &text, path)
    }

    /// Send a mutation once and return the raw `(status, body)`.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(u16, String)> {
        let method_name = method.as_str().to_string();
        let mut req = self.request(method, path)?;
        if let Some(body) = body {
            let body_json = Self::json_body(body)?;
            log::debug!("Request Body: {}", sanitize_body(&body_json));
            req = req.header(CONTENT_TYPE, "application/json").body(body_json);
        }
        HttpUtils::execute_request(req, &method_name, path).await
    }

    /// `POST` with an optional JSON body, decoding the JSON response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let (status, text) = self.send(Method::POST, path, body).await?;
        self.decode(status, &text, path)
    }

    /// `PATCH` with a JSON body, decoding the JSON response.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let (status, text) = self.send(Method::PATCH, path, Some(body)).await?;
        self.decode(status, &text, path)
    }

    /// `PATCH` with a JSON body; the response body is ignored.
    pub(crate) async fn patch_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let (status, text) = self.send(Method::PATCH, path, Some(body)).await?;
        self.check_status(status, &text, path)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let (status, text) = self.send::<()>(Method::DELETE, path, None).await?;
        self.check_status(status, &text, path)
    }

    /// `POST` a single file as `multipart/form-data` under the `file` field.
    pub(crate) async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<T> {
        log::debug!("Uploading '{file_name}' ({} bytes)", contents.len());
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let req = self
            .request(Method::POST, path)?
            .multipart(Form::new().part("file", part));
        let (status, text) = HttpUtils::execute_request(req, "POST", path).await?;
        self.decode(status, &text, path)
    }
}
