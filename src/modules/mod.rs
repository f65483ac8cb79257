pub mod admin;
pub mod catalog;
pub mod session;

use std::sync::Arc;

use libraryhub_kernel::ModuleRegistry;

use crate::library::SharedLibrary;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, library: &SharedLibrary) -> anyhow::Result<()> {
    registry.register(Arc::new(session::SessionModule::new(library.clone())))?;
    registry.register(Arc::new(catalog::CatalogModule::new(library.clone())))?;
    registry.register(Arc::new(admin::AdminModule::new(library.clone())))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use libraryhub_kernel::{settings::Settings, InitCtx, ModuleRegistry};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::library::{Library, SharedLibrary};

    /// Full router over a freshly seeded library.
    pub struct TestApp {
        pub router: Router,
        pub library: SharedLibrary,
    }

    impl TestApp {
        pub async fn new() -> Self {
            let settings = Settings::default();
            let library = Library::from_settings(&settings.catalog).into_shared();

            let mut registry = ModuleRegistry::new();
            super::register_all(&mut registry, &library).unwrap();
            registry
                .init_modules(&InitCtx {
                    settings: &settings,
                })
                .await
                .unwrap();

            let router = libraryhub_http::build_router(&registry, &settings).unwrap();
            Self { router, library }
        }

        pub async fn login(&self, email: &str, is_admin: bool) {
            let (status, _) = send(
                &self.router,
                Method::POST,
                "/api/session/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": "secret",
                    "isAdmin": is_admin
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    /// Send one request and decode the body as JSON (`Null` when empty).
    pub async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    #[tokio::test]
    async fn server_health_and_openapi_are_mounted() {
        let app = TestApp::new().await;

        let (status, body) = send(&app.router, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".to_string()));

        let (status, spec) = send(&app.router, Method::GET, "/docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(spec["paths"]["/api/catalog/books"].is_object());
        assert!(spec["paths"]["/api/session"].is_object());
        assert!(spec["paths"]["/api/admin/books/{id}"].is_object());
    }

    #[tokio::test]
    async fn catalog_module_health() {
        let app = TestApp::new().await;
        let (status, body) = send(&app.router, Method::GET, "/api/catalog/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("catalog module is healthy".to_string()));
    }

    #[tokio::test]
    async fn merged_document_is_valid_openapi() {
        let app = TestApp::new().await;
        let mut registry = ModuleRegistry::new();
        super::register_all(&mut registry, &app.library).unwrap();

        let merged = libraryhub_http::router::merged_openapi(&registry);
        let document: utoipa::openapi::OpenApi = serde_json::from_value(merged).unwrap();
        assert!(document.paths.paths.contains_key("/api/catalog/books"));
        assert!(document.paths.paths.contains_key("/api/admin/stats"));

        let (status, _) = send(&app.router, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
