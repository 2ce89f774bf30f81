//! Info hub endpoints. Reads are public; writes need an admin token.

use serde_json::json;

use super::ApiClient;
use crate::error::AppError;
use crate::types::{InfoHubPost, PagedResponse};

/// Payload for creating or updating a post. `date` is free text on the
/// backend; when absent the key is omitted entirely.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub date: Option<String>,
}

impl PostDraft {
    fn body(&self) -> serde_json::Value {
        let mut body = json!({
            "title": self.title,
            "content": self.content,
            "category": self.category,
        });
        if let Some(date) = &self.date {
            body["date"] = json!(date);
        }
        body
    }
}

impl ApiClient {
    /// `GET /infohub` with optional category filter, newest first.
    pub async fn list_info_hub(
        &self,
        category: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<PagedResponse<InfoHubPost>, AppError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            query.push(("category", category.to_string()));
        }
        query.push(("page", page.to_string()));
        query.push(("size", size.to_string()));
        self.get("/infohub", &query, false).await
    }

    /// `GET /infohub/{id}`
    pub async fn info_hub_by_id(&self, id: i64) -> Result<InfoHubPost, AppError> {
        self.get(&format!("/infohub/{}", id), &[], false).await
    }

    /// `POST /infohub`: returns the created post with its id.
    pub async fn create_info_hub(&self, draft: &PostDraft) -> Result<InfoHubPost, AppError> {
        self.post("/infohub", draft.body(), true).await
    }

    /// `PUT /infohub/{id}`
    pub async fn update_info_hub(
        &self,
        id: i64,
        draft: &PostDraft,
    ) -> Result<InfoHubPost, AppError> {
        self.put(&format!("/infohub/{}", id), draft.body()).await
    }

    /// `DELETE /infohub/{id}`: a 204 with no body on success.
    pub async fn delete_info_hub(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/infohub/{}", id)).await
    }
}
