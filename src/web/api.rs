//! JSON handlers for the club dashboard.
//!
//! Every response body is a `{ data, error }` envelope, including requests
//! rejected before reaching the store. Store calls do blocking file I/O, so
//! they run on the blocking pool. Queries hold the read lock; mutations hold
//! the write lock for the whole read-modify-write so concurrent requests
//! cannot interleave.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::extract::{ApiJson, ApiQuery};
use crate::error::{Result, StoreError};
use crate::models::{
    ApplicationEdit, ApplicationStatus, Contest, ContestApplication, ContestEdit, ContestStatus,
    NewApplication, NewContest,
};
use crate::state::{QueryResult, RecordStore, SharedRecordStore, Snapshot};

#[derive(Clone)]
pub struct ApiState {
    pub store: SharedRecordStore,
}

impl ApiState {
    async fn read<T, F>(&self, query: F) -> Result<T>
    where
        F: FnOnce(&RecordStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || query(&store.blocking_read()))
            .await
            .map_err(join_failed)?
    }

    async fn write<T, F>(&self, mutation: F) -> Result<T>
    where
        F: FnOnce(&mut RecordStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || mutation(&mut store.blocking_write()))
            .await
            .map_err(join_failed)?
    }
}

fn join_failed(e: tokio::task::JoinError) -> StoreError {
    StoreError::Internal {
        message: format!("store task failed: {}", e),
    }
}

pub type ApiResponse<T> = (StatusCode, Json<QueryResult<T>>);

pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/contests", get(list_contests).post(create_contest))
        .route(
            "/api/contests/:id",
            get(get_contest).patch(edit_contest).delete(delete_contest),
        )
        .route("/api/contests/:id/status", put(update_contest_status))
        .route(
            "/api/applications",
            get(list_applications).post(create_application),
        )
        .route("/api/applications/existing", get(find_existing_application))
        .route("/api/applications/:id", patch(edit_application))
        .route("/api/applications/:id/status", put(review_application))
        .route("/api/export", get(export))
        .with_state(state)
}

pub fn status_for(error: &StoreError) -> StatusCode {
    match error {
        StoreError::ContestNotFound { .. } | StoreError::ApplicationNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        StoreError::DuplicateApplication { .. } => StatusCode::CONFLICT,
        StoreError::NotApplicationOwner { .. } => StatusCode::FORBIDDEN,
        StoreError::InvalidStatusTransition { .. } | StoreError::InvalidStatus { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StoreError::QuotaExceeded { .. } => StatusCode::INSUFFICIENT_STORAGE,
        StoreError::StorageRead { .. }
        | StoreError::StorageWrite { .. }
        | StoreError::InvalidKey { .. }
        | StoreError::CorruptCollection { .. }
        | StoreError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: Serialize>(result: Result<T>, success: StatusCode) -> ApiResponse<T> {
    match result {
        Ok(data) => (success, Json(QueryResult::ok(data))),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!("Store operation failed: {}", e);
            } else {
                debug!("Store operation rejected: {}", e);
            }
            (status, Json(QueryResult::err(&e)))
        }
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "Club record store running"
}

// ========== Contests ==========

#[derive(Debug, Default, Deserialize)]
pub struct ContestQuery {
    /// Parsed after extraction so a bad value gets the `invalid_status` code
    pub status: Option<String>,

    /// Only open contests whose deadline has not passed
    #[serde(default)]
    pub accepting: bool,
}

async fn list_contests(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<ContestQuery>,
) -> ApiResponse<Vec<Contest>> {
    let result = state
        .read(move |store| {
            let status = query
                .status
                .as_deref()
                .map(|s| s.parse::<ContestStatus>())
                .transpose()?;

            let contests = match status {
                Some(ContestStatus::Open) => store.list_open_contests()?,
                Some(status) => store
                    .list_contests()?
                    .into_iter()
                    .filter(|c| c.status == status)
                    .collect(),
                None => store.list_contests()?,
            };

            if !query.accepting {
                return Ok(contests);
            }
            let now = Utc::now();
            Ok(contests
                .into_iter()
                .filter(|c| c.accepts_applications(now))
                .collect())
        })
        .await;
    respond(result, StatusCode::OK)
}

async fn create_contest(
    State(state): State<ApiState>,
    ApiJson(new): ApiJson<NewContest>,
) -> ApiResponse<Contest> {
    let result = state.write(move |store| store.create_contest(new)).await;
    respond(result, StatusCode::CREATED)
}

async fn get_contest(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Contest> {
    let result = state.read(move |store| store.get_contest(&id)).await;
    respond(result, StatusCode::OK)
}

async fn edit_contest(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(edit): ApiJson<ContestEdit>,
) -> ApiResponse<Contest> {
    let result = state
        .write(move |store| store.update_contest(&id, edit))
        .await;
    respond(result, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

async fn update_contest_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> ApiResponse<Contest> {
    let result = state
        .write(move |store| {
            let status: ContestStatus = request.status.parse()?;
            store.update_contest_status(&id, status)
        })
        .await;
    respond(result, StatusCode::OK)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedContest {
    pub id: String,
}

async fn delete_contest(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<DeletedContest> {
    let result = state
        .write(move |store| store.delete_contest(&id))
        .await
        .map(|id| DeletedContest { id });
    respond(result, StatusCode::OK)
}

// ========== Applications ==========

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationQuery {
    pub user_id: Option<String>,
    pub contest_id: Option<String>,
}

async fn list_applications(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<ApplicationQuery>,
) -> ApiResponse<Vec<ContestApplication>> {
    let result = state
        .read(move |store| {
            store.filter_applications(query.user_id.as_deref(), query.contest_id.as_deref())
        })
        .await;
    respond(result, StatusCode::OK)
}

async fn create_application(
    State(state): State<ApiState>,
    ApiJson(new): ApiJson<NewApplication>,
) -> ApiResponse<ContestApplication> {
    let result = state.write(move |store| store.create_application(new)).await;
    respond(result, StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
pub struct ExistingQuery {
    pub user_id: String,
    pub contest_id: String,
}

/// `data` is null when the user has not applied yet
async fn find_existing_application(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<ExistingQuery>,
) -> ApiResponse<Option<ContestApplication>> {
    let result = state
        .read(move |store| store.find_existing_application(&query.user_id, &query.contest_id))
        .await;
    respond(result, StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub struct EditApplicationRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub edit: ApplicationEdit,
}

async fn edit_application(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<EditApplicationRequest>,
) -> ApiResponse<ContestApplication> {
    let result = state
        .write(move |store| store.edit_application(&id, &request.user_id, request.edit))
        .await;
    respond(result, StatusCode::OK)
}

async fn review_application(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> ApiResponse<ContestApplication> {
    let result = state
        .write(move |store| {
            let status: ApplicationStatus = request.status.parse()?;
            store.review_application(&id, status)
        })
        .await;
    respond(result, StatusCode::OK)
}

async fn export(State(state): State<ApiState>) -> ApiResponse<Snapshot> {
    let result = state.read(|store| store.snapshot()).await;
    respond(result, StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_shared_record_store;
    use crate::storage::{MemoryStorage, StorageBackend};
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(storage: impl StorageBackend + 'static) -> Router {
        let store = RecordStore::new(Box::new(storage));
        api_router(ApiState {
            store: create_shared_record_store(store),
        })
    }

    fn app() -> Router {
        app_with(MemoryStorage::new())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        send_request(app, request.body(body).unwrap()).await
    }

    async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    fn contest_body(title: &str, status: &str, deadline: &str) -> Value {
        json!({
            "title": title,
            "category": "Algorithms",
            "max_team_size": 3,
            "deadline": deadline,
            "status": status,
        })
    }

    fn application_body(user_id: &str, contest_id: &str) -> Value {
        json!({
            "contest_id": contest_id,
            "user_id": user_id,
            "applicant_name": "Asha",
            "applicant_email": "asha@example.com",
            "project_name": "Sorter",
            "tech_stack": "Rust",
        })
    }

    async fn create_contest_via(app: &Router, title: &str, status: &str) -> String {
        let (code, body) = send(
            app,
            Method::POST,
            "/api/contests",
            Some(contest_body(title, status, "2099-01-01")),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn create_application_via(app: &Router, user_id: &str, contest_id: &str) -> String {
        let (code, body) = send(
            app,
            Method::POST,
            "/api/applications",
            Some(application_body(user_id, contest_id)),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    fn assert_error(body: &Value, code: &str) {
        assert!(body["data"].is_null(), "unexpected data in {}", body);
        assert_eq!(body["error"]["code"], code, "body {}", body);
        assert!(body["error"]["message"].as_str().is_some());
    }

    fn ids(body: &Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_status_codes() {
        let not_found = StoreError::ApplicationNotFound { id: "a".into() };
        assert_eq!(status_for(&not_found), StatusCode::NOT_FOUND);
        let quota = StoreError::QuotaExceeded {
            key: "contests".into(),
            needed: 10,
            quota: 5,
        };
        assert_eq!(status_for(&quota), StatusCode::INSUFFICIENT_STORAGE);
        let internal = StoreError::Internal {
            message: "boom".into(),
        };
        assert_eq!(status_for(&internal), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let (code, body) = send(&app(), Method::GET, "/", None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, "Club record store running");
    }

    #[tokio::test]
    async fn test_contest_lifecycle() {
        let app = app();
        let id = create_contest_via(&app, "Algo Sprint", "Draft").await;

        let (code, body) = send(&app, Method::GET, &format!("/api/contests/{}", id), None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Algo Sprint");
        assert!(body["error"].is_null());

        let (code, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/contests/{}", id),
            Some(json!({ "prize_pool": "2000" })),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["prize_pool"], "2000");
        assert_eq!(body["data"]["category"], "Algorithms");

        let (code, body) = send(
            &app,
            Method::PUT,
            &format!("/api/contests/{}/status", id),
            Some(json!({ "status": "open" })),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Open");

        let (code, body) = send(&app, Method::DELETE, &format!("/api/contests/{}", id), None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["id"], id.as_str());

        let (code, body) = send(&app, Method::GET, &format!("/api/contests/{}", id), None).await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_error(&body, "contest_not_found");

        // Deleting again still succeeds
        let (code, _) = send(&app, Method::DELETE, &format!("/api/contests/{}", id), None).await;
        assert_eq!(code, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_contests_by_status() {
        let app = app();
        let open = create_contest_via(&app, "Open one", "Open").await;
        let draft = create_contest_via(&app, "Draft one", "Draft").await;
        let newest_open = create_contest_via(&app, "Open two", "Open").await;

        let (code, body) = send(&app, Method::GET, "/api/contests", None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(ids(&body), vec![newest_open.clone(), draft.clone(), open.clone()]);

        let (_, body) = send(&app, Method::GET, "/api/contests?status=Open", None).await;
        assert_eq!(ids(&body), vec![newest_open, open]);

        let (_, body) = send(&app, Method::GET, "/api/contests?status=draft", None).await;
        assert_eq!(ids(&body), vec![draft]);

        let (code, body) = send(&app, Method::GET, "/api/contests?status=Archived", None).await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "invalid_status");
    }

    #[tokio::test]
    async fn test_accepting_filter_skips_past_deadlines() {
        let app = app();
        for (title, status, deadline) in [
            ("Future", "Open", "2099-01-01"),
            ("Past", "Open", "2000-01-01"),
            ("Closed", "Closed", "2099-01-01"),
        ] {
            let (code, _) = send(
                &app,
                Method::POST,
                "/api/contests",
                Some(contest_body(title, status, deadline)),
            )
            .await;
            assert_eq!(code, StatusCode::CREATED);
        }

        let (code, body) = send(&app, Method::GET, "/api/contests?accepting=true", None).await;
        assert_eq!(code, StatusCode::OK);
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Future"]);

        let (code, body) = send(&app, Method::GET, "/api/contests?accepting=maybe", None).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_error(&body, "invalid_request");
    }

    #[tokio::test]
    async fn test_bad_status_body_is_enveloped() {
        let app = app();
        let id = create_contest_via(&app, "Algo Sprint", "Open").await;
        let uri = format!("/api/contests/{}/status", id);

        let (code, body) = send(&app, Method::PUT, &uri, Some(json!({ "status": "Archived" }))).await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "invalid_status");

        let (code, body) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "invalid_request");

        let (code, body) = send(
            &app,
            Method::PUT,
            "/api/contests/missing/status",
            Some(json!({ "status": "Closed" })),
        )
        .await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_error(&body, "contest_not_found");

        // Untouched by the failed updates
        let (_, body) = send(&app, Method::GET, &format!("/api/contests/{}", id), None).await;
        assert_eq!(body["data"]["status"], "Open");
    }

    #[tokio::test]
    async fn test_malformed_json_is_enveloped() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contests")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();
        let (code, body) = send_request(&app, request).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_error(&body, "invalid_request");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contests")
            .body(Body::from(contest_body("No header", "Open", "").to_string()))
            .unwrap();
        let (code, body) = send_request(&app, request).await;
        assert_eq!(code, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_error(&body, "invalid_request");

        // Missing required field
        let (code, body) = send(
            &app,
            Method::POST,
            "/api/applications",
            Some(json!({ "user_id": "u1" })),
        )
        .await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "invalid_request");

        let (_, body) = send(&app, Method::GET, "/api/export", None).await;
        assert!(body["data"]["contests"].as_array().unwrap().is_empty());
        assert!(body["data"]["applications"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_application_is_conflict() {
        let app = app();
        create_application_via(&app, "u1", "c1").await;

        let (code, body) = send(
            &app,
            Method::POST,
            "/api/applications",
            Some(application_body("u1", "c1")),
        )
        .await;
        assert_eq!(code, StatusCode::CONFLICT);
        assert_error(&body, "duplicate_application");

        let (_, body) = send(&app, Method::GET, "/api/applications", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_applications_filters() {
        let app = app();
        create_application_via(&app, "u1", "c1").await;
        create_application_via(&app, "u2", "c1").await;
        let newest = create_application_via(&app, "u1", "c2").await;

        let (code, body) = send(&app, Method::GET, "/api/applications?user_id=u1", None).await;
        assert_eq!(code, StatusCode::OK);
        let mine = ids(&body);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0], newest);

        let (_, body) = send(&app, Method::GET, "/api/applications?contest_id=c1", None).await;
        assert_eq!(ids(&body).len(), 2);

        let (_, body) = send(
            &app,
            Method::GET,
            "/api/applications?user_id=u2&contest_id=c2",
            None,
        )
        .await;
        assert!(ids(&body).is_empty());

        let (_, body) = send(&app, Method::GET, "/api/applications", None).await;
        assert_eq!(ids(&body).len(), 3);
    }

    #[tokio::test]
    async fn test_find_existing_and_cascade() {
        let app = app();
        let contest_id = create_contest_via(&app, "Algo Sprint", "Open").await;
        let app_id = create_application_via(&app, "u1", &contest_id).await;

        let uri = format!("/api/applications/existing?user_id=u1&contest_id={}", contest_id);
        let (code, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["id"], app_id.as_str());

        let (code, body) = send(
            &app,
            Method::GET,
            "/api/applications/existing?user_id=u2&contest_id=c9",
            None,
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert!(body["data"].is_null());
        assert!(body["error"].is_null());

        let (code, body) = send(&app, Method::GET, "/api/applications/existing", None).await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_error(&body, "invalid_request");

        let (code, _) = send(&app, Method::DELETE, &format!("/api/contests/{}", contest_id), None).await;
        assert_eq!(code, StatusCode::OK);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_edit_and_review_application() {
        let app = app();
        let id = create_application_via(&app, "u1", "c1").await;
        let edit_uri = format!("/api/applications/{}", id);
        let review_uri = format!("/api/applications/{}/status", id);

        let (code, body) = send(
            &app,
            Method::PATCH,
            &edit_uri,
            Some(json!({ "user_id": "u2", "demo_link": "https://x.dev" })),
        )
        .await;
        assert_eq!(code, StatusCode::FORBIDDEN);
        assert_error(&body, "not_application_owner");

        let (code, body) = send(
            &app,
            Method::PATCH,
            &edit_uri,
            Some(json!({ "user_id": "u1", "demo_link": "https://x.dev" })),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["demo_link"], "https://x.dev");

        let (code, body) = send(&app, Method::PUT, &review_uri, Some(json!({ "status": "maybe" }))).await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "invalid_status");

        let (code, body) = send(
            &app,
            Method::PUT,
            &review_uri,
            Some(json!({ "status": "approved" })),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["status"], "Approved");

        let (code, body) = send(
            &app,
            Method::PUT,
            &review_uri,
            Some(json!({ "status": "Rejected" })),
        )
        .await;
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error(&body, "invalid_status_transition");

        let (code, body) = send(
            &app,
            Method::PATCH,
            "/api/applications/missing",
            Some(json!({ "user_id": "u1" })),
        )
        .await;
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_error(&body, "application_not_found");
    }

    #[tokio::test]
    async fn test_export() {
        let app = app();
        let contest_id = create_contest_via(&app, "Exported", "Open").await;
        create_application_via(&app, "u1", &contest_id).await;

        let (code, body) = send(&app, Method::GET, "/api/export", None).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["data"]["contests"][0]["id"], contest_id.as_str());
        assert_eq!(body["data"]["applications"][0]["contest_id"], contest_id.as_str());
    }

    #[tokio::test]
    async fn test_storage_failures_are_server_errors() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("contests", "{not json").unwrap();
        let app = app_with(storage);

        let (code, body) = send(&app, Method::GET, "/api/contests", None).await;
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_error(&body, "corrupt_collection");

        let app = app_with(MemoryStorage::with_quota(64));
        let (code, body) = send(
            &app,
            Method::POST,
            "/api/contests",
            Some(contest_body("Much too large to fit", "Open", "2099-01-01")),
        )
        .await;
        assert_eq!(code, StatusCode::INSUFFICIENT_STORAGE);
        assert_error(&body, "quota_exceeded");
    }
}
