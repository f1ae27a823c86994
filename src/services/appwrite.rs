use async_trait::async_trait;
use crate::core::{
    criteria::{Bounds, Criteria},
    repository::{CandidatePage, CandidateRetriever, PostingRepository, ProfileRepository, RepositoryError},
};
use crate::models::{Candidate, Casting};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<AppwriteError> for RepositoryError {
    fn from(err: AppwriteError) -> Self {
        match err {
            AppwriteError::NotFound(what) => RepositoryError::NotFound(what),
            other => RepositoryError::Backend(other.to_string()),
        }
    }
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub models: String,
    pub castings: String,
}

/// Appwrite API client
///
/// Serves the engine's read side:
/// - Searching public model profiles
/// - Fetching a single model profile
/// - Fetching a single casting
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
        timeout: Duration,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    async fn get_json(&self, url: &str) -> Result<Option<Value>, AppwriteError> {
        let response = self
            .client
            .get(url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppwriteError::Unauthorized),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Appwrite request failed: {} - {}", status, body);
                Err(AppwriteError::ApiError(format!("{} returned {}", url, status)))
            }
            _ => Ok(Some(response.json().await?)),
        }
    }

    /// Fetch one document by its id
    async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        id_field: &str,
        kind: &str,
    ) -> Result<T, AppwriteError> {
        let url = format!("{}/{}", self.documents_url(collection), urlencoding::encode(id));

        tracing::debug!("Fetching {} {}", kind, id);

        let doc = self
            .get_json(&url)
            .await?
            .ok_or_else(|| AppwriteError::NotFound(format!("{} {}", kind, id)))?;

        parse_document(&doc, id_field)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse {}: {}", kind, e)))
    }

    /// Query public model profiles matching the criteria
    pub async fn search_models(
        &self,
        criteria: &Criteria,
        page: u32,
        page_size: u32,
        public_only: bool,
    ) -> Result<CandidatePage, AppwriteError> {
        let queries = build_model_queries(criteria, page, page_size, public_only);

        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let full_url = format!(
            "{}?queries={}",
            self.documents_url(&self.collections.models),
            urlencoding::encode(&queries_json)
        );

        let json = self
            .get_json(&full_url)
            .await?
            .ok_or_else(|| AppwriteError::NotFound(format!("collection {}", self.collections.models)))?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let candidates: Vec<Candidate> = documents
            .iter()
            .filter_map(|doc| match parse_document(doc, "modelId") {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::warn!("Skipping unreadable model document: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Queried {} candidates (total: {})", candidates.len(), total);

        Ok(CandidatePage { candidates, total })
    }
}

#[async_trait]
impl CandidateRetriever for AppwriteClient {
    async fn search(
        &self,
        criteria: &Criteria,
        page: u32,
        page_size: u32,
        public_only: bool,
    ) -> Result<CandidatePage, RepositoryError> {
        Ok(self.search_models(criteria, page, page_size, public_only).await?)
    }
}

#[async_trait]
impl ProfileRepository for AppwriteClient {
    async fn find_model(&self, id: &str) -> Result<Candidate, RepositoryError> {
        Ok(self
            .get_document(&self.collections.models, id, "modelId", "model")
            .await?)
    }
}

#[async_trait]
impl PostingRepository for AppwriteClient {
    async fn find_casting(&self, id: &str) -> Result<Casting, RepositoryError> {
        Ok(self
            .get_document(&self.collections.castings, id, "castingId", "casting")
            .await?)
    }
}

/// Deserialize an Appwrite document, filling `id_field` from `$id` if absent
fn parse_document<T: DeserializeOwned>(doc: &Value, id_field: &str) -> Result<T, serde_json::Error> {
    let mut data = doc.get("data").unwrap_or(doc).clone();
    if let Some(obj) = data.as_object_mut() {
        if !obj.contains_key(id_field) {
            if let Some(id) = doc.get("$id").cloned() {
                obj.insert(id_field.to_string(), id);
            }
        }
    }
    serde_json::from_value(data)
}

/// Translate criteria into Appwrite query strings
fn build_model_queries(criteria: &Criteria, page: u32, page_size: u32, public_only: bool) -> Vec<String> {
    let mut queries = Vec::new();

    if public_only {
        queries.push("equal(\"isPublic\", true)".to_string());
    }
    if let Some(city) = &criteria.city {
        queries.push(format!("equal(\"city\", {})", quoted(city)));
    }
    if let Some(gender) = &criteria.gender {
        queries.push(format!("equal(\"gender\", {})", quoted(gender)));
    }
    if !criteria.categories.is_empty() {
        queries.push(format!("equal(\"categories\", {})", quoted_list(&criteria.categories)));
    }
    if !criteria.languages.is_empty() {
        queries.push(format!("equal(\"languages\", {})", quoted_list(&criteria.languages)));
    }

    push_range(&mut queries, "age", criteria.age);
    push_range(&mut queries, "heightCm", criteria.height_cm);
    push_range(&mut queries, "weightKg", criteria.weight_kg);

    let page_size = page_size.max(1);
    queries.push(format!("limit({})", page_size));
    queries.push(format!("offset({})", page.saturating_sub(1).saturating_mul(page_size)));

    queries
}

fn push_range(queries: &mut Vec<String>, attribute: &str, bounds: Option<Bounds>) {
    let Some(bounds) = bounds else {
        return;
    };
    if let Some(min) = bounds.min {
        queries.push(format!("greaterThanEqual(\"{}\", {})", attribute, min));
    }
    if let Some(max) = bounds.max {
        queries.push(format!("lessThanEqual(\"{}\", {})", attribute, max));
    }
}

fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn quoted_list<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let items: Vec<String> = values.into_iter().map(|v| quoted(v)).collect();
    format!("[{}]", items.join(","))
}
