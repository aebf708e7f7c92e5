use agency_contact::{
    configuration::{get_configuration, Settings},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::MockServer;

pub const SERVER_ACCESS_KEY: &str = "test-server-access-key";

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            "test".into(),
            "agency_contact=debug,info".into(),
            std::io::stdout,
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            "test".into(),
            "agency_contact=debug,info".into(),
            std::io::sink,
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub form_api_server: MockServer,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Start the application with the server access key removed from its configuration.
pub async fn spawn_app_without_access_key() -> TestApp {
    spawn_app_with(|c| c.form_api.server_access_key = None).await
}

async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    // Set up subscriber for logging, only first time per run. Other times use existing subscriber.
    Lazy::force(&TRACING);

    let form_api_server = MockServer::start().await;
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        // Use a random OS port
        c.application.host = "127.0.0.1".into();
        c.application.port = 0;
        c.application.base_url = "https://agency.example".into();
        c.form_api.base_url = form_api_server.uri();
        c.form_api.server_access_key = Some(Secret::new(SERVER_ACCESS_KEY.into()));
        customize(&mut c);
        c
    };

    let app = Application::build(configuration)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", app.port());
    tokio::spawn(app.run_until_stopped());

    TestApp {
        address,
        form_api_server,
    }
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
