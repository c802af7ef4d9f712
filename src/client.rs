use const_format::concatcp;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{HubError, Result};
use crate::responses::MessageResponse;
use crate::session::Session;

const AGENT: &str = concatcp!("taskhub/", env!("CARGO_PKG_VERSION"));

pub struct ApiClient {
    http: Client,
    base: Url,
    headers: HeaderMap,
}

impl ApiClient {
    pub fn new(base_url: &str, session: &Session) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            base: parse_base(base_url)?,
            headers: session.auth_headers()?,
        })
    }

    /// Client without credentials, for signin/signup.
    pub fn unauthenticated(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            http: Client::new(),
            base: parse_base(base_url)?,
            headers,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// PUT with no body; the lifecycle transition endpoints take none.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::PUT, path, None::<&()>).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|_| HubError::InvalidUrl(path.to_string()))?;

        let mut request = self
            .http
            .request(method, url)
            .headers(self.headers.clone())
            .header(USER_AGENT, AGENT);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        // The backend answers 401/403 on missing or stale credentials.
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(HubError::AuthExpired);
        }

        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            let message = serde_json::from_str::<MessageResponse>(&text)
                .map(|m| m.message)
                .unwrap_or(text);
            return Err(HubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

fn parse_base(base_url: &str) -> Result<Url> {
    // A trailing slash keeps Url::join from eating the /api segment.
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    Url::parse(&normalized).map_err(|_| HubError::InvalidUrl(base_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_join_preserves_api_segment() {
        let base = parse_base("http://localhost:8080/api").unwrap();
        let url = base.join("tasks/my-tasks").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/tasks/my-tasks");

        let url = base.join("tasks/1/review?approved=true").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/tasks/1/review?approved=true"
        );
    }
}
