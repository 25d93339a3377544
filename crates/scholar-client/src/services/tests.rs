use std::sync::Arc;

use serde_json::{json, Value};

use super::*;
use crate::credentials::CredentialStore;
use crate::envelope::ErrorCode;
use crate::http::ApiClient;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::test_support::{CannedResponse, TestServer};
use crate::types::{
    ApplicationDraft, ApplicationStatus, DocumentType, DocumentUpload, ScholarshipSearchParams,
    SignInRequest, SignUpRequest,
};
use scholar_common::SessionId;

fn user_json() -> Value {
    json!({
        "id": "u1",
        "email": "student@example.edu",
        "name": "Asha",
        "createdAt": "2025-01-10T12:00:00Z"
    })
}

fn auth_json() -> Value {
    json!({ "user": user_json(), "token": "jwt-abc" })
}

fn scholarship_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "STEM Futures",
        "category": "stem",
        "award": "$5,000",
        "deadline": "2026-03-01"
    })
}

fn application_json(status: &str) -> Value {
    json!({
        "id": "a1",
        "userId": "u1",
        "scholarshipId": "s1",
        "scholarshipName": "STEM Futures",
        "status": status,
        "deadline": "2026-03-01T00:00:00Z"
    })
}

// ---- chat ----

#[tokio::test]
async fn chat_send_posts_camel_case_request() {
    let server = TestServer::start(|_| {
        CannedResponse::json(
            200,
            json!({
                "message": "Here are some scholarships",
                "sessionId": "session_1_abc",
                "timestamp": "2025-05-01T10:00:00",
                "suggestions": ["Show more"]
            }),
        )
    })
    .await;
    let chat = ChatService::new(server.client());
    let session = SessionId::from_existing("session_1_abc");

    let env = chat
        .send_message("find stem awards", Some(&session), Some("u1"))
        .await;
    let reply = env.into_data().unwrap();
    assert_eq!(reply.message, "Here are some scholarships");
    assert_eq!(reply.suggestions, vec!["Show more".to_string()]);

    let request = &server.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path(), "/query");
    assert_eq!(
        request.json(),
        json!({ "message": "find stem awards", "sessionId": "session_1_abc", "userId": "u1" })
    );
}

#[tokio::test]
async fn chat_history_paths_and_queries() {
    let server = TestServer::start(|req| match req.method.as_str() {
        "DELETE" => CannedResponse::json(200, json!({ "deleted": 3 })),
        _ => CannedResponse::json(
            200,
            json!([{
                "id": "m1",
                "role": "assistant",
                "content": "hi",
                "timestamp": "2025-05-01T10:00:00Z"
            }]),
        ),
    })
    .await;
    let chat = ChatService::new(server.client());

    let history = chat.chat_history("u1", 50, 0).await;
    assert_eq!(history.data().map(Vec::len), Some(1));

    let session = chat.generate_session_id();
    assert!(chat
        .session_history(&session)
        .await
        .is_success());

    let deleted = chat.delete_chat_history("u1").await;
    assert!(deleted.is_success());

    let requests = server.requests();
    assert_eq!(requests[0].target, "/api/chat/history?userId=u1&limit=50&offset=0");
    assert_eq!(
        requests[1].path(),
        format!("/api/chat/history/{}", session.as_str())
    );
    assert_eq!(requests[2].method, "DELETE");
    assert_eq!(requests[2].target, "/api/chat/history?userId=u1");
}

#[test]
fn generated_session_ids_differ() {
    let chat = ChatService::new(ApiClient::new(Default::default(), CredentialStore::in_memory()).unwrap());
    assert_ne!(chat.generate_session_id(), chat.generate_session_id());
}

// ---- auth ----

#[tokio::test]
async fn sign_in_stores_token_and_user() {
    let server = TestServer::start(|req| match req.path() {
        "/api/auth/signin" => CannedResponse::json(200, auth_json()),
        _ => CannedResponse::json(200, user_json()),
    })
    .await;
    let backing = Arc::new(MemoryStore::new());
    let client = ApiClient::new(server.config(), CredentialStore::load(backing.clone())).unwrap();
    let auth = AuthService::new(client);

    let env = auth
        .sign_in(&SignInRequest {
            email: "student@example.edu".into(),
            password: "hunter22".into(),
        })
        .await;
    assert!(env.is_success());
    assert!(auth.is_authenticated());
    assert_eq!(auth.current_user().map(|u| u.id), Some("u1".to_string()));
    assert_eq!(backing.get("auth_token").unwrap().as_deref(), Some("jwt-abc"));
    assert!(backing.get("user").unwrap().is_some());

    // Later calls carry the new token.
    let _ = auth.user_profile("u1").await;
    let requests = server.requests();
    assert_eq!(requests[1].path(), "/api/user/profile/u1");
    assert_eq!(requests[1].header("authorization"), Some("Bearer jwt-abc"));
}

#[tokio::test]
async fn sign_up_also_stores_credentials() {
    let server = TestServer::start(|_| CannedResponse::json(201, auth_json())).await;
    let auth = AuthService::new(server.client());

    let env = auth
        .sign_up(&SignUpRequest {
            email: "student@example.edu".into(),
            password: "hunter22".into(),
            name: Some("Asha".into()),
        })
        .await;
    assert!(env.is_success());
    assert!(auth.is_authenticated());
    assert_eq!(server.requests()[0].json()["name"], "Asha");
}

#[tokio::test]
async fn failed_sign_in_leaves_credentials_alone() {
    let server = TestServer::start(|_| {
        CannedResponse::json(401, json!({ "message": "Invalid credentials" }))
    })
    .await;
    let auth = AuthService::new(server.client());

    let env = auth
        .sign_in(&SignInRequest {
            email: "student@example.edu".into(),
            password: "wrong".into(),
        })
        .await;
    assert!(env.is_auth_error());
    assert_eq!(env.error_message(), "Invalid credentials");
    assert!(!auth.is_authenticated());
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn sign_out_clears_even_when_backend_fails() {
    let server = TestServer::start(|_| CannedResponse::text(500, "boom")).await;
    let client = server.client();
    client.set_token("stale").unwrap();
    let auth = AuthService::new(client.clone());

    let env = auth.sign_out().await;
    assert!(!env.is_success());
    assert!(!auth.is_authenticated());
    assert!(client.credentials().token().is_none());

    let request = &server.requests()[0];
    assert_eq!(request.path(), "/api/auth/signout");
    assert_eq!(request.header("authorization"), Some("Bearer stale"));
}

#[tokio::test]
async fn update_profile_puts_partial_user() {
    let server = TestServer::start(|_| CannedResponse::json(200, user_json())).await;
    let auth = AuthService::new(server.client());

    let update = crate::types::UserUpdate {
        name: Some("Asha K".into()),
        profile: None,
    };
    let env = auth.update_user_profile("u1", &update).await;
    assert!(env.is_success());

    let request = &server.requests()[0];
    assert_eq!(request.method, "PUT");
    assert_eq!(request.json(), json!({ "name": "Asha K" }));
}

// ---- scholarships ----

#[tokio::test]
async fn scholarship_listing_and_search_queries() {
    let page = json!({
        "scholarships": [scholarship_json("s1")],
        "total": 1,
        "page": 1,
        "pageSize": 20
    });
    let server = TestServer::start(move |_| CannedResponse::json(200, page.clone())).await;
    let scholarships = ScholarshipService::new(server.client());

    let all = scholarships.all(1, DEFAULT_PAGE_SIZE).await;
    assert_eq!(all.data().map(|p| p.total), Some(1));

    let params = ScholarshipSearchParams {
        min_amount: Some(1000),
        keywords: Some("first gen".into()),
        ..Default::default()
    };
    assert!(scholarships.search(&params, 2, 10).await.is_success());
    assert!(scholarships.by_category("stem", 0, 0).await.is_success());

    let requests = server.requests();
    assert_eq!(requests[0].target, "/api/scholarships?page=1&pageSize=20");
    assert_eq!(
        requests[1].target,
        "/api/scholarships/search?minAmount=1000&keywords=first+gen&page=2&pageSize=10"
    );
    assert_eq!(
        requests[2].target,
        "/api/scholarships/search?category=stem&page=1&pageSize=20"
    );
}

#[tokio::test]
async fn scholarship_by_id_fills_template() {
    let server = TestServer::start(|_| CannedResponse::json(200, scholarship_json("s42"))).await;
    let scholarships = ScholarshipService::new(server.client());

    let env = scholarships.by_id("s42").await;
    assert_eq!(env.data().map(|s| s.id.as_str()), Some("s42"));
    assert_eq!(server.requests()[0].path(), "/api/scholarships/s42");
}

#[tokio::test]
async fn ids_with_reserved_characters_reach_the_right_resource() {
    let server = TestServer::start(|req| match req.path() {
        "/api/scholarships/abc%231" => CannedResponse::json(200, scholarship_json("abc#1")),
        "/api/user/profile/u%3Fx%3D1" => CannedResponse::json(200, user_json()),
        _ => CannedResponse::json(200, json!([])),
    })
    .await;
    let client = server.client();

    let env = ScholarshipService::new(client.clone()).by_id("abc#1").await;
    assert_eq!(env.data().map(|s| s.id.as_str()), Some("abc#1"));
    assert!(AuthService::new(client.clone()).user_profile("u?x=1").await.is_success());
    assert!(ApplicationService::new(client)
        .remove_document("a/1", "d 2")
        .await
        .is_success());

    let requests = server.requests();
    assert_eq!(requests[0].target, "/api/scholarships/abc%231");
    assert_eq!(requests[1].target, "/api/user/profile/u%3Fx%3D1");
    assert_eq!(requests[2].target, "/api/applications/a%2F1/documents/d%202");
}

#[tokio::test]
async fn bookmarks_round_trip_through_endpoints() {
    let server = TestServer::start(|req| match req.method.as_str() {
        "GET" => CannedResponse::json(200, json!([scholarship_json("s1")])),
        "POST" => CannedResponse::json(201, json!({ "success": true })),
        _ => CannedResponse::text(204, ""),
    })
    .await;
    let scholarships = ScholarshipService::new(server.client());

    assert!(scholarships.bookmark("s1", "u1").await.is_success());
    assert_eq!(scholarships.bookmarked("u1").await.data().map(Vec::len), Some(1));
    assert!(scholarships.remove_bookmark("s1", "u1").await.is_success());

    let requests = server.requests();
    assert_eq!(requests[0].json(), json!({ "scholarshipId": "s1", "userId": "u1" }));
    assert_eq!(requests[1].target, "/api/scholarships/bookmark?userId=u1");
    assert_eq!(
        requests[2].target,
        "/api/scholarships/bookmark?scholarshipId=s1&userId=u1"
    );
}

#[tokio::test]
async fn scholarship_deadlines_default_window() {
    let server = TestServer::start(|_| CannedResponse::json(200, json!([]))).await;
    let scholarships = ScholarshipService::new(server.client());

    let env = scholarships.upcoming_deadlines("u1", None).await;
    assert!(env.is_success());
    assert_eq!(
        server.requests()[0].target,
        "/api/scholarships/deadlines?userId=u1&days=30"
    );
}

// ---- applications ----

#[tokio::test]
async fn application_crud_paths() {
    let server = TestServer::start(|req| match req.method.as_str() {
        "DELETE" => CannedResponse::text(204, ""),
        "GET" if req.path() == "/api/applications" => {
            CannedResponse::json(200, json!([application_json("draft")]))
        }
        _ => CannedResponse::json(200, application_json("submitted")),
    })
    .await;
    let applications = ApplicationService::new(server.client());

    assert_eq!(
        applications.for_user("u1").await.data().map(Vec::len),
        Some(1)
    );
    assert!(applications.by_id("a1").await.is_success());

    let draft = ApplicationDraft {
        scholarship_id: Some("s1".into()),
        notes: Some("essay pending".into()),
        ..Default::default()
    };
    assert!(applications.create(&draft).await.is_success());
    assert!(applications.update("a1", &draft).await.is_success());

    let updated = applications
        .update_status("a1", ApplicationStatus::Submitted)
        .await;
    assert_eq!(
        updated.data().map(|a| a.status),
        Some(ApplicationStatus::Submitted)
    );
    assert!(applications.delete("a1").await.is_success());

    let requests = server.requests();
    let summary: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.target.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("GET", "/api/applications?userId=u1"),
            ("GET", "/api/applications/a1"),
            ("POST", "/api/applications"),
            ("PUT", "/api/applications/a1"),
            ("PATCH", "/api/applications/a1"),
            ("DELETE", "/api/applications/a1"),
        ]
    );
    assert_eq!(
        requests[2].json(),
        json!({ "scholarshipId": "s1", "notes": "essay pending" })
    );
    assert_eq!(requests[4].json(), json!({ "status": "submitted" }));
}

#[tokio::test]
async fn application_documents_and_filters() {
    let server = TestServer::start(|req| match req.method.as_str() {
        "POST" => CannedResponse::json(
            201,
            json!({
                "id": "d1",
                "name": "essay.pdf",
                "type": "essay",
                "uploadedAt": "2025-02-01T09:30:00Z"
            }),
        ),
        "DELETE" => CannedResponse::text(204, ""),
        _ => CannedResponse::json(200, json!([])),
    })
    .await;
    let applications = ApplicationService::new(server.client());

    let upload = DocumentUpload {
        name: "essay.pdf".into(),
        doc_type: DocumentType::Essay,
        url: None,
    };
    let doc = applications.add_document("a1", &upload).await;
    assert_eq!(doc.data().map(|d| d.doc_type), Some(DocumentType::Essay));
    assert!(applications.remove_document("a1", "d1").await.is_success());
    assert!(applications
        .by_status("u1", ApplicationStatus::UnderReview)
        .await
        .is_success());
    assert!(applications
        .upcoming_deadlines("u1", Some(7))
        .await
        .is_success());

    let requests = server.requests();
    assert_eq!(requests[0].path(), "/api/applications/a1/documents");
    assert_eq!(requests[0].json(), json!({ "name": "essay.pdf", "type": "essay" }));
    assert_eq!(requests[1].path(), "/api/applications/a1/documents/d1");
    assert_eq!(
        requests[2].target,
        "/api/applications?userId=u1&status=under-review"
    );
    assert_eq!(
        requests[3].target,
        "/api/applications/deadlines?userId=u1&days=7"
    );
}

#[tokio::test]
async fn wrong_shape_from_service_is_malformed() {
    let server = TestServer::start(|_| CannedResponse::json(200, json!({ "oops": true }))).await;
    let applications = ApplicationService::new(server.client());

    let env = applications.by_id("a1").await;
    assert_eq!(env.error_code(), Some(&ErrorCode::MalformedResponse));
}
