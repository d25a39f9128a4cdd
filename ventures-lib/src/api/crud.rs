//! Create, Read, Update, Delete operations
//!
//! Implements [`DataSource`] for [`BackendClient`] over the REST endpoint.
//! Writes ask for `return=representation` so the stored rows come back in the
//! response body.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;

use crate::BackendClient;
use crate::api::query::Filter;
use crate::api::query::Query;
use crate::api::query::url::filters_string;
use crate::api::query::url::query_string;
use crate::error::ApiError;
use crate::error::DecodeError;
use crate::error::Error;
use crate::model::Record;
use crate::source::DataSource;

impl BackendClient {
    fn write_headers(&self) -> HeaderMap {
        let mut headers = self.default_headers();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    async fn read_rows(response: reqwest::Response) -> Result<Vec<Record>, Error> {
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body).map_err(|e| {
            Error::Api(ApiError::parse_with_body(
                format!("expected a JSON array of rows: {}", e),
                body,
            ))
        })
    }

    fn encode_body(value: &impl serde::Serialize) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(value).map_err(|e| Error::Decode(DecodeError::Encode(e)))
    }
}

#[async_trait]
impl DataSource for BackendClient {
    async fn fetch(&self, query: &Query) -> Result<Vec<Record>, Error> {
        let url = self.rest_url(query.collection(), &query_string(query));
        let response = self
            .request(Method::GET, &url, self.default_headers(), None)
            .await?;
        Self::read_rows(response).await
    }

    async fn insert(&self, collection: &str, record: Record) -> Result<Record, Error> {
        let url = self.rest_url(collection, "");
        let body = Self::encode_body(&[&record])?;
        let response = self
            .request(Method::POST, &url, self.write_headers(), Some(body))
            .await?;

        Self::read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api(ApiError::parse("insert returned no rows")))
    }

    async fn update(
        &self,
        collection: &str,
        filters: &[Filter],
        changes: Record,
    ) -> Result<Vec<Record>, Error> {
        // An unfiltered PATCH would rewrite the whole collection.
        if filters.is_empty() {
            return Err(Error::not_found(collection, "an empty filter"));
        }
        let url = self.rest_url(collection, &filters_string(filters));
        let body = Self::encode_body(&changes)?;
        let response = self
            .request(Method::PATCH, &url, self.write_headers(), Some(body))
            .await?;
        Self::read_rows(response).await
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<usize, Error> {
        if filters.is_empty() {
            return Err(Error::not_found(collection, "an empty filter"));
        }
        let url = self.rest_url(collection, &filters_string(filters));
        let response = self
            .request(Method::DELETE, &url, self.write_headers(), None)
            .await?;
        Ok(Self::read_rows(response).await?.len())
    }
}
