use std::{net::TcpListener, sync::Arc};

use axum::{
    extract::FromRef,
    routing::{get, post, IntoMakeService},
    Router, Server,
};
use hyper::server::conn::AddrIncoming;
use secrecy::Secret;

use crate::{
    configuration::Settings,
    form_api_client::FormApiClient,
    routes::{contact, health_check, robots_txt, sitemap_xml},
    telemetry::RouterExt,
};

pub struct Application {
    port: u16,
    server: Server<AddrIncoming, IntoMakeService<Router>>,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let form_api_client = configuration.form_api.client()?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address).map_err(|e| {
            tracing::error!("failed to bind port {}", address);
            e
        })?;
        let port = listener.local_addr()?.port();

        let app_state = AppState {
            form_api_client: Arc::new(form_api_client),
            server_access_key: ServerAccessKey(
                configuration.form_api.server_access_key().cloned(),
            ),
            base_url: SiteBaseUrl(configuration.application.base_url),
        };

        let server = run(listener, app_state)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), hyper::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    app_state: AppState,
) -> Result<Server<AddrIncoming, IntoMakeService<Router>>, hyper::Error> {
    // Create a router that will contain and match all routes for the application
    let app = Router::new()
        .route("/health_check", get(health_check))
        .route("/api/contact", post(contact))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .with_state(app_state)
        .add_axum_tracing_layer();

    // Start the axum server and set up to use supplied listener
    Ok(Server::from_tcp(listener)?.serve(app.into_make_service()))
}

#[derive(Clone)]
pub struct AppState {
    form_api_client: Arc<FormApiClient>,
    server_access_key: ServerAccessKey,
    base_url: SiteBaseUrl,
}

/// Access key for the server path. `None` disables delivery from the server.
#[derive(Clone, Debug)]
pub struct ServerAccessKey(pub Option<Secret<String>>);

/// Public URL of the website.
#[derive(Clone, Debug)]
pub struct SiteBaseUrl(pub String);

impl FromRef<AppState> for Arc<FormApiClient> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.form_api_client.clone()
    }
}

impl FromRef<AppState> for ServerAccessKey {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.server_access_key.clone()
    }
}

impl FromRef<AppState> for SiteBaseUrl {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.base_url.clone()
    }
}
