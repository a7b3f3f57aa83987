//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /health
//!   GET    /enrollments              (caller's enrollment with address)
//!   POST   /enrollments              (create or update caller's enrollment)
//!   GET    /enrollments/cep?cep=…    (address for a postal code)
//!
//! The caller is identified by the `x-user-id` header; authentication happens
//! upstream.

pub mod error;
pub mod extract;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use enrollments::EnrollmentService;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub use error::ApiError;
pub use extract::{AuthUser, USER_ID_HEADER};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EnrollmentService>,
}

impl AppState {
    pub fn new(service: EnrollmentService) -> Self {
        Self { service: Arc::new(service) }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route(
            "/enrollments",
            get(handlers::enrollments::get_by_user).post(handlers::enrollments::create_or_update),
        )
        .route("/enrollments/cep", get(handlers::enrollments::address_from_cep))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
}

/// Resolve once `signal` fires.  If the signal handler cannot be installed
/// the server keeps running instead of shutting down immediately.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("failed to install shutdown signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use enrollments::mock::InMemoryStore;
    use lookup::mock::MockLookup;
    use lookup::ViaCepAddress;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(lookup: MockLookup) -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = EnrollmentService::new(store.clone(), store.clone(), Arc::new(lookup));
        (router(AppState::new(service)), store)
    }

    fn se() -> MockLookup {
        MockLookup::found(ViaCepAddress {
            cep: "01001-000".into(),
            logradouro: "Praça da Sé".into(),
            complemento: "lado ímpar".into(),
            bairro: "Sé".into(),
            localidade: "São Paulo".into(),
            uf: "SP".into(),
        })
    }

    fn enrollment_body() -> Value {
        json!({
            "name": "Maria",
            "cpf": "12345678909",
            "birthday": "1990-05-17T00:00:00Z",
            "phone": "(11) 91234-5678",
            "address": {
                "cep": "01001000",
                "street": "Praça da Sé",
                "city": "São Paulo",
                "state": "SP",
                "number": "100",
                "neighborhood": "Sé",
                "addressDetail": ""
            }
        })
    }

    fn get_enrollment(user_id: Uuid) -> Request<Body> {
        Request::builder()
            .uri("/enrollments")
            .header(USER_ID_HEADER, user_id.to_string())
            .body(Body::empty())
            .unwrap()
    }

    fn post_enrollment(user_id: Uuid, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/enrollments")
            .header(USER_ID_HEADER, user_id.to_string())
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn shutdown_waits_for_the_signal() {
        let fired = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            wait_for_shutdown(async { Ok(()) }),
        )
        .await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn shutdown_never_fires_when_the_handler_fails() {
        let fired = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            wait_for_shutdown(async {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "no signal support"))
            }),
        )
        .await;
        assert!(fired.is_err(), "server must not stop on handler failure");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (app, _) = app(se());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_user_header_is_unauthorized() {
        let (app, _) = app(se());
        let response = app
            .oneshot(Request::builder().uri("/enrollments").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_user_header_is_unauthorized() {
        let (app, _) = app(se());
        let request = Request::builder()
            .uri("/enrollments")
            .header(USER_ID_HEADER, "42")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (app, _) = app(se());
        let response = app.oneshot(get_enrollment(Uuid::new_v4())).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "not_found");
    }

    #[tokio::test]
    async fn post_then_get_returns_projected_enrollment() {
        let (app, store) = app(se());
        let user_id = Uuid::new_v4();

        let response = app
            .clone()
            .oneshot(post_enrollment(user_id, &enrollment_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.enrollment_count(), 1);

        let response = app.oneshot(get_enrollment(user_id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "Maria");
        assert!(body.get("userId").is_none());
        assert_eq!(body["address"]["number"], "100");
        assert_eq!(body["address"]["addressDetail"], Value::Null);
        assert!(body["address"].get("enrollmentId").is_none());
    }

    #[tokio::test]
    async fn rejected_postal_code_is_bad_request() {
        let (app, store) = app(MockLookup::empty());

        let response = app
            .oneshot(post_enrollment(Uuid::new_v4(), &enrollment_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "bad_request");
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn database_failure_is_internal_and_hides_details() {
        let (app, store) = app(se());
        store.fail_address_writes();

        let response = app
            .oneshot(post_enrollment(Uuid::new_v4(), &enrollment_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], "internal server error");
    }

    #[tokio::test]
    async fn cep_lookup_returns_mapped_address() {
        let (app, _) = app(se());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/enrollments/cep?cep=01001000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["street"], "Praça da Sé");
        assert_eq!(body["state"], "SP");
    }

    #[tokio::test]
    async fn unknown_cep_is_no_content() {
        let (app, _) = app(MockLookup::empty());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/enrollments/cep?cep=00000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
