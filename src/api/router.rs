use axum::{Router, middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use super::{ask, health, students};
use crate::infrastructure::observability::{PrometheusMetrics, create_metrics_router};

/// Routes without middleware
fn routes() -> Router<AppState> {
    Router::new()
        .route("/ask", get(ask::ask))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/students/stats", get(students::student_stats))
        .route("/students/search", get(students::search_students))
        .route(
            "/students/{user_id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
}

/// Full router with middleware. The metrics endpoint is mounted at
/// `metrics_path` when a recorder is installed.
pub fn create_router(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    metrics_path: &str,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = routes()
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m, metrics_path));
    }

    router
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::adapter::mock::{MockAdapter, adapter_set};
    use crate::domain::cache::MockCache;
    use crate::domain::{
        Cache, ClassifierConfig, KeywordClassifier, NewStudent, StudentRepository, VectorIndex,
    };
    use crate::infrastructure::adapters::StructuredAdapter;
    use crate::infrastructure::services::AnswerService;
    use crate::infrastructure::student::InMemoryStudentRepository;
    use crate::infrastructure::vector_index::{FlatIndex, UnloadedIndex};

    struct Harness {
        router: Router,
        cache: Arc<MockCache>,
        mocks: [Arc<MockAdapter>; 4],
    }

    fn students() -> Arc<dyn StudentRepository> {
        Arc::new(InMemoryStudentRepository::with_students(vec![
            NewStudent::new("Alice Smith", 20, "Computer Science"),
            NewStudent::new("Bob Jones", 23, "Mathematics"),
            NewStudent::new("Carol White", 22, "Computer Science"),
        ]))
    }

    fn index() -> Arc<dyn VectorIndex> {
        Arc::new(
            FlatIndex::new(2, vec![vec![0.0, 1.0]], vec!["Robbery on Main St".to_string()])
                .unwrap(),
        )
    }

    fn harness_with(cache: MockCache, index: Arc<dyn VectorIndex>) -> Harness {
        let cache = Arc::new(cache);
        let students = students();
        let (mut adapters, mocks) = adapter_set();
        adapters.structured = Arc::new(StructuredAdapter::new(students.clone()));

        let classifier = KeywordClassifier::new(&ClassifierConfig::default()).unwrap();
        let service = AnswerService::new(
            Arc::new(classifier),
            adapters,
            cache.clone() as Arc<dyn Cache>,
        );
        let state = AppState::new(service, students, index);

        Harness {
            router: create_router(state, None, "/metrics"),
            cache,
            mocks,
        }
    }

    fn harness() -> Harness {
        harness_with(MockCache::new(), index())
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_ask_counts_students() {
        let h = harness();

        let (status, body) = send(
            &h.router,
            get("/ask?question=How%20many%20students%20are%20enrolled%3F"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"source": "student", "answer": "There are 3 students enrolled.", "cached": false})
        );
    }

    #[tokio::test]
    async fn test_ask_second_call_is_cached() {
        let h = harness();
        let uri = "/ask?question=What%20is%20the%20weather%20today%3F";

        let (_, first) = send(&h.router, get(uri)).await;
        let (_, second) = send(&h.router, get(uri)).await;

        assert_eq!(first["source"], "web");
        assert_eq!(first["cached"], false);
        assert_eq!(second["cached"], true);
        assert_eq!(first["answer"], second["answer"]);
        assert_eq!(h.mocks[1].calls(), 1);
    }

    #[tokio::test]
    async fn test_ask_routes_crime_questions_to_rag() {
        let h = harness();

        let (status, body) = send(
            &h.router,
            get("/ask?question=What%20are%20common%20crimes%20in%20LA%3F"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "rag");
        assert_eq!(body["answer"], "retrieval answer");
    }

    #[tokio::test]
    async fn test_ask_rejects_missing_and_blank_question() {
        let h = harness();

        let (missing, body) = send(&h.router, get("/ask")).await;
        let (blank, _) = send(&h.router, get("/ask?question=%20%20")).await;
        let (empty, _) = send(&h.router, get("/ask?question=")).await;

        assert_eq!(missing, StatusCode::BAD_REQUEST);
        assert_eq!(blank, StatusCode::BAD_REQUEST);
        assert_eq!(empty, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert!(h.mocks.iter().all(|m| m.calls() == 0));
        assert_eq!(h.cache.reads(), 0);
        assert_eq!(h.cache.writes(), 0);
    }

    #[tokio::test]
    async fn test_ask_adapter_failure_is_bad_gateway() {
        let cache = Arc::new(MockCache::new());
        let (mut adapters, _) = adapter_set();
        adapters.general = Arc::new(MockAdapter::unavailable("ollama", "connection refused"));
        let service = AnswerService::new(
            Arc::new(KeywordClassifier::new(&ClassifierConfig::default()).unwrap()),
            adapters,
            cache.clone() as Arc<dyn Cache>,
        );
        let router = create_router(AppState::new(service, students(), index()), None, "/metrics");

        let (status, body) = send(&router, get("/ask?question=Tell%20me%20a%20joke")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["source"], "general");
        assert_eq!(body["error"]["code"], "adapter_unavailable");
        assert_eq!(cache.writes(), 0);
    }

    #[tokio::test]
    async fn test_ask_internal_adapter_error_names_source() {
        let (mut adapters, _) = adapter_set();
        adapters.structured = Arc::new(MockAdapter::failing(
            "postgres",
            "Failed to count students: relation \"students\" does not exist",
        ));
        let service = AnswerService::new(
            Arc::new(KeywordClassifier::new(&ClassifierConfig::default()).unwrap()),
            adapters,
            Arc::new(MockCache::new()) as Arc<dyn Cache>,
        );
        let router = create_router(AppState::new(service, students(), index()), None, "/metrics");

        let (status, body) = send(
            &router,
            get("/ask?question=How%20many%20students%20are%20enrolled%3F"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["source"], "student");
        assert_eq!(body["error"]["code"], "adapter_unavailable");
    }

    #[tokio::test]
    async fn test_ask_survives_cache_outage() {
        let h = harness_with(MockCache::new().with_error("connection reset"), index());

        let (status, body) = send(&h.router, get("/ask?question=Tell%20me%20a%20joke")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "general");
        assert_eq!(body["cached"], false);
    }

    #[tokio::test]
    async fn test_student_crud() {
        let h = harness();

        let (status, created) = send(
            &h.router,
            with_json(
                "POST",
                "/students",
                json!({"name": "Dan Brown", "age": 30, "course": "History"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["user_id"], 4);

        let (status, updated) = send(
            &h.router,
            with_json("PUT", "/students/4", json!({"age": 31})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["age"], 31);
        assert_eq!(updated["course"], "History");

        let (status, fetched) = send(&h.router, get("/students/4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Dan Brown");

        let delete = Request::builder()
            .method("DELETE")
            .uri("/students/4")
            .body(Body::empty())
            .unwrap();
        let (status, deleted) = send(&h.router, delete).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({"deleted": true, "user_id": 4}));

        let (status, _) = send(&h.router, get("/students/4")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_student_validates_input() {
        let h = harness();

        let (status, body) = send(
            &h.router,
            with_json("POST", "/students", json!({"name": "", "age": 20, "course": "Art"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");

        let (status, _) = send(
            &h.router,
            with_json("POST", "/students", json!({"name": "Eve"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_list_students_paginates() {
        let h = harness();

        let (status, body) = send(&h.router, get("/students?limit=2&offset=1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["limit"], 2);
        assert_eq!(body["students"].as_array().unwrap().len(), 2);
        assert_eq!(body["students"][0]["name"], "Bob Jones");
    }

    #[tokio::test]
    async fn test_list_students_by_course() {
        let h = harness();

        let (_, body) = send(&h.router, get("/students?course=computer%20science")).await;

        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_student_search_and_stats() {
        let h = harness();

        let (_, found) = send(&h.router, get("/students/search?name=bob")).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, _) = send(&h.router, get("/students/search")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, stats) = send(&h.router, get("/students/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total_students"], 3);
        assert_eq!(stats["courses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health_and_request_id() {
        let h = harness();

        let response = h
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "req-42");

        let (status, _) = send(&h.router, get("/live")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reports_components() {
        let h = harness();

        let (status, body) = send(&h.router, get("/ready")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_ready_degraded_on_cache_outage() {
        let h = harness_with(MockCache::new().with_error("down"), index());

        let (status, body) = send(&h.router, get("/ready")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_ready_unhealthy_without_index() {
        let h = harness_with(MockCache::new(), Arc::new(UnloadedIndex::new("not found")));

        let (status, body) = send(&h.router, get("/ready")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }
}
