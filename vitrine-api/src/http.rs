//! HTTP implementation of [`CatalogApi`].

use crate::client::{CatalogApi, ImageQuery};
use crate::config::{ApiConfig, Session};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use vitrine_types::{
    CategoryDraft, CategoryForest, CategoryId, CategoryNode, ImageId, ImagePage, RefScope,
    build_forest,
};

/// Response bodies arrive either bare or wrapped in `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

/// Catalog client over the backend's REST endpoints.
pub struct HttpCatalogApi {
    config: ApiConfig,
    session: Session,
    client: Client,
}

impl HttpCatalogApi {
    /// Creates a client. Fails if the configuration is unusable.
    pub fn new(config: ApiConfig, session: Session) -> ApiResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "catalog request");
        let builder = self.client.request(method, self.url(path));
        match self.session.token.as_deref() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Sends a request and maps non-success statuses to errors.
    async fn send(&self, builder: RequestBuilder, path: &str) -> ApiResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("{path}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), path, "catalog request failed");
        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthRequired,
            StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
            _ => ApiError::Status {
                status: status.as_u16(),
                message: extract_message(&body),
            },
        })
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response, path: &str) -> ApiResult<T> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("{path}: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Pulls a human-readable message out of an error body.
fn extract_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .unwrap_or_else(|| body.trim().to_string())
}

fn image_path(id: &ImageId) -> String {
    format!("/images/{}", urlencoding::encode(id.as_str()))
}

fn category_path(id: &CategoryId) -> String {
    format!("/categories/{}", urlencoding::encode(id.as_str()))
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_images(&self, query: &ImageQuery) -> ApiResult<ImagePage> {
        let path = "/images";
        let builder = self.request(Method::GET, path).query(&query.to_pairs());
        let response = self.send(builder, path).await?;
        let mut page: ImagePage = self.read_json(response, path).await?;
        page.pagination = page.pagination.normalized();
        debug!(
            count = page.data.len(),
            page = page.pagination.page,
            total = page.pagination.total,
            "images listed"
        );
        Ok(page)
    }

    async fn delete_image(&self, id: &ImageId) -> ApiResult<()> {
        let path = image_path(id);
        self.send(self.request(Method::DELETE, &path), &path).await?;
        info!(image = %id, "image deleted");
        Ok(())
    }

    async fn set_primary_image(&self, id: &ImageId, scope: &RefScope) -> ApiResult<()> {
        let path = format!("{}/primary", image_path(id));
        let builder = self.request(Method::PATCH, &path).json(scope);
        self.send(builder, &path).await?;
        info!(image = %id, %scope, "primary image set");
        Ok(())
    }

    async fn list_categories(&self) -> ApiResult<CategoryForest> {
        let path = "/categories";
        let response = self.send(self.request(Method::GET, path), path).await?;
        let nodes: Envelope<Vec<CategoryNode>> = self.read_json(response, path).await?;
        Ok(build_forest(nodes.into_inner()))
    }

    async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<CategoryNode> {
        draft.validate()?;
        let path = "/categories";
        let builder = self.request(Method::POST, path).json(draft);
        let response = self.send(builder, path).await?;
        let node: Envelope<CategoryNode> = self.read_json(response, path).await?;
        let node = node.into_inner();
        info!(category = %node.id, "category created");
        Ok(node)
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> ApiResult<CategoryNode> {
        draft.validate()?;
        let path = category_path(id);
        let builder = self.request(Method::PUT, &path).json(draft);
        let response = self.send(builder, &path).await?;
        let node: Envelope<CategoryNode> = self.read_json(response, &path).await?;
        info!(category = %id, "category updated");
        Ok(node.into_inner())
    }

    async fn delete_category(&self, id: &CategoryId) -> ApiResult<()> {
        let path = category_path(id);
        self.send(self.request(Method::DELETE, &path), &path).await?;
        info!(category = %id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_message_prefers_json_message() {
        assert_eq!(extract_message(r#"{"message": "image is locked"}"#), "image is locked");
        assert_eq!(extract_message(r#"{"error": "bad scope"}"#), "bad scope");
        assert_eq!(extract_message("  plain text \n"), "plain text");
    }

    #[test]
    fn paths_encode_ids() {
        assert_eq!(image_path(&ImageId::new("a/b")), "/images/a%2Fb");
        assert_eq!(category_path(&CategoryId::new("42")), "/categories/42");
    }

    #[test]
    fn envelope_accepts_both_shapes() {
        let wrapped: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        let bare: Envelope<Vec<u32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);
        assert_eq!(bare.into_inner(), vec![3]);
    }
}
