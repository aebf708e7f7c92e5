use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::form_api_client::FormApiClient;

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Grab the execution directory
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    // Set the configuration directory
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    // Generate the name of the environment-specific config file.
    let environment_filename = format!("{}.yml", environment.as_str());

    // Initialize the configuration reader
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // e.g. `APP_FORM_API__SERVER_ACCESS_KEY=...` sets `form_api.server_access_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>();
    tracing::debug!("Settings values: {:?}", &settings);

    settings
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub form_api: FormApiSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Public URL of the website, used for absolute links in the sitemap.
    pub base_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FormApiSettings {
    pub base_url: String,
    /// Access key used by the trusted server path.
    pub server_access_key: Option<Secret<String>>,
    /// Access key embedded in the visitor-facing form.
    pub client_access_key: Option<Secret<String>>,
    pub timeout_milliseconds: Option<u64>,
    pub reset_after_milliseconds: Option<u64>,
}

impl FormApiSettings {
    pub fn client(&self) -> Result<FormApiClient, reqwest::Error> {
        FormApiClient::new(self.base_url.clone(), self.timeout())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }

    pub fn reset_after(&self) -> Option<Duration> {
        self.reset_after_milliseconds.map(Duration::from_millis)
    }

    pub fn server_access_key(&self) -> Option<&Secret<String>> {
        non_blank(self.server_access_key.as_ref())
    }

    pub fn client_access_key(&self) -> Option<&Secret<String>> {
        non_blank(self.client_access_key.as_ref())
    }
}

fn non_blank(key: Option<&Secret<String>>) -> Option<&Secret<String>> {
    key.filter(|key| !key.expose_secret().trim().is_empty())
}

/// The possible runtime environments for this application.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'",
                other
            )),
        }
    }
}
