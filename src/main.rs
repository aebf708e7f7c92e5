use agency_contact::{configuration::get_configuration, startup::Application, telemetry};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Set up tracing
    let subscriber = telemetry::get_subscriber(
        "agency_contact".into(),
        "info".into(),
        std::io::stdout,
    );
    telemetry::init_subscriber(subscriber);

    // Set up configuration
    let configuration = get_configuration().expect("failed to read configuration");
    if configuration.form_api.server_access_key().is_none() {
        tracing::warn!("No server access key configured, contact submissions will not be delivered");
    }

    let application = Application::build(configuration).await?;
    tracing::info!("Starting server and listening on port {}", application.port());
    application.run_until_stopped().await?;
    Ok(())
}
