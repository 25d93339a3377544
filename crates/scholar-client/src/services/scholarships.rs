use serde::de::IgnoredAny;
use serde::Serialize;

use super::{acknowledge, DEFAULT_DEADLINE_DAYS, DEFAULT_PAGE_SIZE};
use crate::endpoint::{fill_path, join_path, QueryParams};
use crate::envelope::Envelope;
use crate::http::ApiClient;
use crate::types::{Scholarship, ScholarshipSearchParams, ScholarshipSearchResponse};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkBody<'a> {
    scholarship_id: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct ScholarshipService {
    api: ApiClient,
}

impl ScholarshipService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One page of the catalogue. Pages are 1-based.
    pub async fn all(&self, page: u32, page_size: u32) -> Envelope<ScholarshipSearchResponse> {
        let query = paged(QueryParams::new(), page, page_size);
        self.api
            .get(&self.api.config().endpoints.scholarships, query)
            .await
    }

    pub async fn search(
        &self,
        params: &ScholarshipSearchParams,
        page: u32,
        page_size: u32,
    ) -> Envelope<ScholarshipSearchResponse> {
        let query = paged(params.to_query(), page, page_size);
        self.api
            .get(&self.api.config().endpoints.scholarship_search, query)
            .await
    }

    pub async fn by_id(&self, id: &str) -> Envelope<Scholarship> {
        let endpoint = fill_path(&self.api.config().endpoints.scholarship_details, id);
        self.api.get(&endpoint, QueryParams::new()).await
    }

    pub async fn by_category(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Envelope<ScholarshipSearchResponse> {
        self.search(&ScholarshipSearchParams::category(category), page, page_size)
            .await
    }

    pub async fn bookmark(&self, scholarship_id: &str, user_id: &str) -> Envelope<()> {
        let body = BookmarkBody {
            scholarship_id,
            user_id,
        };
        acknowledge(
            self.api
                .post::<IgnoredAny, _>(&self.api.config().endpoints.bookmark_scholarship, &body)
                .await,
        )
    }

    pub async fn remove_bookmark(&self, scholarship_id: &str, user_id: &str) -> Envelope<()> {
        let query = QueryParams::new()
            .with("scholarshipId", scholarship_id)
            .with("userId", user_id);
        acknowledge(
            self.api
                .delete::<IgnoredAny>(&self.api.config().endpoints.bookmark_scholarship, query)
                .await,
        )
    }

    pub async fn bookmarked(&self, user_id: &str) -> Envelope<Vec<Scholarship>> {
        let query = QueryParams::new().with("userId", user_id);
        self.api
            .get(&self.api.config().endpoints.bookmark_scholarship, query)
            .await
    }

    /// Scholarships closing within `days` (default 30) for a user.
    pub async fn upcoming_deadlines(
        &self,
        user_id: &str,
        days: Option<u32>,
    ) -> Envelope<Vec<Scholarship>> {
        let endpoint = join_path(&self.api.config().endpoints.scholarships, "deadlines");
        let query = QueryParams::new()
            .with("userId", user_id)
            .with("days", days.unwrap_or(DEFAULT_DEADLINE_DAYS));
        self.api.get(&endpoint, query).await
    }
}

fn paged(query: QueryParams, page: u32, page_size: u32) -> QueryParams {
    let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
    query.with("page", page.max(1)).with("pageSize", page_size)
}
