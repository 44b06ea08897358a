//! Collection API contract and its REST implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::api::auth::Credential;
use crate::api::transport::TransportClient;
use crate::api::types::*;
use crate::error::{Error, Result};
use crate::media::{Album, Item, Variant};

/// Failure codes the API reports for bad keys, signatures or tokens.
const AUTH_FAILURE_CODES: std::ops::RangeInclusive<u32> = 96..=99;

/// Remote collection capabilities consumed by the backup pipeline.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Check the credential and return the user it belongs to.
    async fn login(&self) -> Result<User>;

    /// List one page of a user's albums.
    async fn list_albums(&self, user_id: &str, page: u32, page_size: u32) -> Result<Vec<Album>>;

    /// List the items of an album (first page only).
    async fn list_items(&self, album_id: &str) -> Result<Vec<Item>>;

    /// List the available renditions of an item.
    async fn list_variants(&self, item_id: &str) -> Result<Vec<Variant>>;
}

/// Collection API client speaking the JSON REST protocol.
pub struct RestCollectionApi {
    transport: TransportClient,
    api_base: String,
    api_key: String,
    credential: Credential,
}

impl RestCollectionApi {
    pub fn new(
        transport: TransportClient,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        credential: Credential,
    ) -> Self {
        Self {
            transport,
            api_base: api_base.into(),
            api_key: api_key.into(),
            credential,
        }
    }

    /// Call an API method and decode its response body.
    async fn call<T: DeserializeOwned>(&self, api_method: &str, args: &[(&str, &str)]) -> Result<T> {
        let mut query: Vec<(&str, &str)> = vec![
            ("method", api_method),
            ("format", "json"),
            ("nojsoncallback", "1"),
            ("api_key", self.api_key.as_str()),
            ("oauth_token", self.credential.token.as_str()),
        ];
        query.extend_from_slice(args);

        let response = self.transport.get(&self.api_base, &query).await?;
        let status = response.status();
        tracing::debug!("{} -> {}", api_method, status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!("{}: HTTP {}", api_method, status)));
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api(format!(
                "{}: HTTP {} - {}",
                api_method,
                status,
                snippet(&text, 200)
            )));
        }

        parse_response(api_method, &text)
    }
}

/// Decode a response body, mapping `stat=fail` envelopes to errors.
pub fn parse_response<T: DeserializeOwned>(api_method: &str, text: &str) -> Result<T> {
    let status: ApiStatus = serde_json::from_str(text).map_err(|e| {
        Error::Api(format!(
            "Failed to parse {} response: {} - Response: {}",
            api_method,
            e,
            snippet(text, 500)
        ))
    })?;

    if !status.is_ok() {
        let message = format!(
            "{}: {} (code {})",
            api_method,
            status.message.unwrap_or_else(|| "unknown error".to_string()),
            status.code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
        );
        return match status.code {
            Some(code) if AUTH_FAILURE_CODES.contains(&code) => Err(Error::Authentication(message)),
            _ => Err(Error::Api(message)),
        };
    }

    serde_json::from_str(text).map_err(|e| {
        Error::Api(format!(
            "Failed to parse {} response: {} - Response: {}",
            api_method,
            e,
            snippet(text, 500)
        ))
    })
}

/// Leading part of a response body for error messages.
fn snippet(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl CollectionApi for RestCollectionApi {
    async fn login(&self) -> Result<User> {
        let response: LoginResponse = self.call("flickr.test.login", &[]).await?;
        Ok(response.user)
    }

    async fn list_albums(&self, user_id: &str, page: u32, page_size: u32) -> Result<Vec<Album>> {
        let page = page.to_string();
        let per_page = page_size.to_string();
        let response: AlbumsResponse = self
            .call(
                "flickr.photosets.getList",
                &[
                    ("user_id", user_id),
                    ("page", page.as_str()),
                    ("per_page", per_page.as_str()),
                ],
            )
            .await?;

        Ok(response
            .photosets
            .photoset
            .into_iter()
            .map(Album::from)
            .collect())
    }

    async fn list_items(&self, album_id: &str) -> Result<Vec<Item>> {
        let response: ItemsResponse = self
            .call("flickr.photosets.getPhotos", &[("photoset_id", album_id)])
            .await?;

        Ok(response.photoset.photo.into_iter().map(Item::from).collect())
    }

    async fn list_variants(&self, item_id: &str) -> Result<Vec<Variant>> {
        let response: VariantsResponse = self
            .call("flickr.photos.getSizes", &[("photo_id", item_id)])
            .await?;

        Ok(response.sizes.size.into_iter().map(Variant::from).collect())
    }
}
