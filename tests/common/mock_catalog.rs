//! Mock palette catalog server.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Catalog path served by the mock
pub const CATALOG_PATH: &str = "/sanzo-wada/data.json";

/// Wrapper around wiremock MockServer serving a palette catalog
pub struct MockCatalogServer {
    pub server: MockServer,
}

impl MockCatalogServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// URL of the catalog endpoint
    pub fn catalog_url(&self) -> String {
        format!("{}{}", self.server.uri(), CATALOG_PATH)
    }

    /// Serve `body` as the catalog
    pub async fn serve_json(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve a raw body with the given status
    pub async fn serve_raw(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Respond only after `delay`
    pub async fn serve_slow(&self, delay: std::time::Duration) {
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}
