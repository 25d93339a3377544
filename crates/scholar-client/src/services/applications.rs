use serde::de::IgnoredAny;
use serde_json::json;

use super::{acknowledge, DEFAULT_DEADLINE_DAYS};
use crate::endpoint::{fill_path, item_path, join_path, QueryParams};
use crate::envelope::Envelope;
use crate::http::ApiClient;
use crate::types::{
    Application, ApplicationDocument, ApplicationDraft, ApplicationStatus, DocumentUpload,
};

#[derive(Debug, Clone)]
pub struct ApplicationService {
    api: ApiClient,
}

impl ApplicationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn collection(&self) -> &str {
        &self.api.config().endpoints.applications
    }

    fn item(&self, id: &str) -> String {
        item_path(self.collection(), id)
    }

    pub async fn for_user(&self, user_id: &str) -> Envelope<Vec<Application>> {
        let query = QueryParams::new().with("userId", user_id);
        self.api.get(self.collection(), query).await
    }

    pub async fn by_id(&self, id: &str) -> Envelope<Application> {
        let endpoint = fill_path(&self.api.config().endpoints.application_status, id);
        self.api.get(&endpoint, QueryParams::new()).await
    }

    pub async fn create(&self, draft: &ApplicationDraft) -> Envelope<Application> {
        self.api.post(self.collection(), draft).await
    }

    pub async fn update(&self, id: &str, draft: &ApplicationDraft) -> Envelope<Application> {
        self.api.put(&self.item(id), draft).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Envelope<Application> {
        let endpoint = fill_path(&self.api.config().endpoints.application_status, id);
        self.api.patch(&endpoint, &json!({ "status": status })).await
    }

    pub async fn delete(&self, id: &str) -> Envelope<()> {
        acknowledge(
            self.api
                .delete::<IgnoredAny>(&self.item(id), QueryParams::new())
                .await,
        )
    }

    pub async fn add_document(
        &self,
        application_id: &str,
        document: &DocumentUpload,
    ) -> Envelope<ApplicationDocument> {
        let endpoint = join_path(&self.item(application_id), "documents");
        self.api.post(&endpoint, document).await
    }

    pub async fn remove_document(&self, application_id: &str, document_id: &str) -> Envelope<()> {
        let endpoint = item_path(
            &join_path(&self.item(application_id), "documents"),
            document_id,
        );
        acknowledge(
            self.api
                .delete::<IgnoredAny>(&endpoint, QueryParams::new())
                .await,
        )
    }

    pub async fn by_status(
        &self,
        user_id: &str,
        status: ApplicationStatus,
    ) -> Envelope<Vec<Application>> {
        let query = QueryParams::new()
            .with("userId", user_id)
            .with("status", status);
        self.api.get(self.collection(), query).await
    }

    pub async fn upcoming_deadlines(
        &self,
        user_id: &str,
        days: Option<u32>,
    ) -> Envelope<Vec<Application>> {
        let endpoint = join_path(self.collection(), "deadlines");
        let query = QueryParams::new()
            .with("userId", user_id)
            .with("days", days.unwrap_or(DEFAULT_DEADLINE_DAYS));
        self.api.get(&endpoint, query).await
    }
}
