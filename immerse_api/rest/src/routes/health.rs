use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use immerse_core_health_contracts::{HealthService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse { http: true, email };

    (status, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use immerse_core_health_contracts::MockHealthService;
    use tower::ServiceExt;

    use super::*;

    async fn get(service: MockHealthService) -> (StatusCode, serde_json::Value) {
        let response = router(Arc::new(service))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn healthy() {
        let service = MockHealthService::new().with_get_status(HealthStatus { email: true });

        let (status, body) = get(service).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn relay_down() {
        let service = MockHealthService::new().with_get_status(HealthStatus { email: false });

        let (status, body) = get(service).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"http": true, "email": false}));
    }
}
