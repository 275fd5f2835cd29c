use form_relay::{
    application::Application,
    settings::Settings,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::net::TcpListener;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const API_TOKEN: &str = "test-api-token";
pub const COLLECTION_ID: &str = "test-collection";

pub struct TestApp {
    pub address: String,
    pub webflow_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spin up an instance of our application against a mock Webflow API
    pub async fn spawn() -> Self {
        Self::spawn_with_credentials(Some(API_TOKEN), Some(COLLECTION_ID)).await
    }

    pub async fn spawn_with_credentials(
        api_token: Option<&str>,
        collection_id: Option<&str>,
    ) -> Self {
        Lazy::force(&TRACING);

        let webflow_server = MockServer::start().await;

        let mut settings = Settings::load().expect("Failed to read configuration");
        settings.webflow.base_url = webflow_server.uri();
        settings.webflow.api_token = api_token.map(|token| Secret::new(token.to_string()));
        settings.webflow.collection_id = collection_id.map(str::to_string);

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

        let application = Application::builder_from_settings(settings)
            .set_tcp_listener(listener)
            .build()
            .expect("Failed to build application");

        let address = format!("http://127.0.0.1:{}", application.port());

        let _ = tokio::spawn(application.run_until_stopped());

        Self {
            address,
            webflow_server,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn submit_form_url(&self) -> String {
        format!("{}/api/submit-form", &self.address)
    }

    pub async fn post_submit_form(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(self.submit_form_url())
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_submit_form_urlencoded(&self, body: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .post(self.submit_form_url())
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/health_check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
