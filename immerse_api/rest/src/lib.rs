use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use immerse_core_contact_contracts::ContactService;
use immerse_core_health_contracts::HealthService;
use immerse_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthService,
    Contact: ContactService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        info!("Starting http server on {}", self.config.addr);
        axum::serve(listener, self.router()).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(Arc::new(self.contact)))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use immerse_core_contact_contracts::MockContactService;
    use immerse_core_health_contracts::{HealthStatus, MockHealthService};
    use tower::ServiceExt;

    use super::*;

    fn sut(health: MockHealthService) -> Router<()> {
        RestServer::new(
            health,
            MockContactService::new(),
            RestServerConfig {
                addr: ([127, 0, 0, 1], 0).into(),
            },
        )
        .router()
    }

    #[tokio::test]
    async fn request_id_header() {
        // Arrange
        let health = MockHealthService::new().with_get_status(HealthStatus { email: true });

        // Act
        let response = sut(health)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("X-Request-Id").unwrap();
        assert!(!request_id.is_empty());
    }

    #[tokio::test]
    async fn not_found() {
        let response = sut(MockHealthService::new())
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("X-Request-Id"));
    }
}
