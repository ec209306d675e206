mod filter;

pub use filter::Filter;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Asks the backend to echo the created row back in the insert response.
const PREFER_REPRESENTATION: &str = "return=representation";
/// Asks the backend for a bare object instead of a one-element list.
const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Network error while calling collection `{0}`")]
    Network(String, #[source] reqwest::Error),
    #[error("Request to collection `{collection}` failed: {status} {body}")]
    Http {
        collection: String,
        status: StatusCode,
        body: String,
    },
    #[error("Malformed response from collection `{0}`")]
    MalformedResponse(String),
}

pub type ApiResponse<T> = Result<T, RequestError>;

/// Thin client over the hosted database's REST interface. Rows live in
/// named collections addressed as `{base}/rest/v1/{collection}`; reads and
/// writes are scoped with a `Filter`. Every call takes an optional bearer
/// token for user-scoped operations and falls back to the anonymous key.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl RestClient {
    pub fn new<T: Into<String>>(base_url: T, anon_key: T) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            client: Client::new(),
        }
    }

    fn url(&self, collection: &str, filter: &Filter) -> String {
        let query = filter.to_query_string();
        if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, collection)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, collection, query)
        }
    }

    fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    async fn ok_or_http_error(collection: &str, res: Response) -> ApiResponse<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(RequestError::Http {
            collection: collection.to_string(),
            status,
            body,
        })
    }

    /// Reads all rows matching `filter`.
    pub async fn fetch_many<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
        token: Option<&str>,
    ) -> ApiResponse<Vec<T>> {
        let res = self
            .request(Method::GET, self.url(collection, filter), token)
            .send()
            .await
            .map_err(|e| RequestError::Network(collection.to_string(), e))?;
        let res = Self::ok_or_http_error(collection, res).await?;
        res.json()
            .await
            .map_err(|_| RequestError::MalformedResponse(collection.to_string()))
    }

    /// Reads at most one row matching `filter`. A missing row is an
    /// expected outcome and maps to `Ok(None)`, which keeps "nothing found"
    /// distinguishable from "request failed".
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
        token: Option<&str>,
    ) -> ApiResponse<Option<T>> {
        let res = self
            .request(Method::GET, self.url(collection, filter), token)
            .header(header::ACCEPT, ACCEPT_SINGLE_OBJECT)
            .send()
            .await
            .map_err(|e| RequestError::Network(collection.to_string(), e))?;
        if res.status() == StatusCode::NOT_FOUND || res.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }
        let res = Self::ok_or_http_error(collection, res).await?;
        res.json()
            .await
            .map(Some)
            .map_err(|_| RequestError::MalformedResponse(collection.to_string()))
    }

    /// Creates one row and returns the created representation. The backend
    /// may answer with a bare object or a one-element list depending on the
    /// Accept negotiation, so both shapes are unwrapped here.
    pub async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        collection: &str,
        row: &B,
        token: Option<&str>,
    ) -> ApiResponse<T> {
        let res = self
            .request(Method::POST, self.url(collection, &Filter::new()), token)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(row)
            .send()
            .await
            .map_err(|e| RequestError::Network(collection.to_string(), e))?;
        let res = Self::ok_or_http_error(collection, res).await?;
        let value: serde_json::Value = res
            .json()
            .await
            .map_err(|_| RequestError::MalformedResponse(collection.to_string()))?;
        let value = match value {
            serde_json::Value::Array(mut rows) => {
                if rows.is_empty() {
                    return Err(RequestError::MalformedResponse(collection.to_string()));
                }
                rows.remove(0)
            }
            value => value,
        };
        serde_json::from_value(value)
            .map_err(|_| RequestError::MalformedResponse(collection.to_string()))
    }

    /// Partially updates all rows matching `filter`.
    pub async fn update<B: Serialize>(
        &self,
        collection: &str,
        filter: &Filter,
        patch: &B,
        token: Option<&str>,
    ) -> ApiResponse<()> {
        let res = self
            .request(Method::PATCH, self.url(collection, filter), token)
            .json(patch)
            .send()
            .await
            .map_err(|e| RequestError::Network(collection.to_string(), e))?;
        Self::ok_or_http_error(collection, res).await?;
        Ok(())
    }

    /// Removes all rows matching `filter`.
    pub async fn delete(
        &self,
        collection: &str,
        filter: &Filter,
        token: Option<&str>,
    ) -> ApiResponse<()> {
        let res = self
            .request(Method::DELETE, self.url(collection, filter), token)
            .send()
            .await
            .map_err(|e| RequestError::Network(collection.to_string(), e))?;
        Self::ok_or_http_error(collection, res).await?;
        Ok(())
    }
}
