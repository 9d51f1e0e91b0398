//! Common test utilities and fixtures for integration tests.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use exercise_backend::services::catalog::Catalog;
use exercise_backend::{router, AppState};

/// Test context holding the router under test.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Context serving the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            app: router(AppState::new(catalog)),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}
