use std::env;

use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::cms_client::CollectionTarget;

#[derive(serde::Deserialize, Debug, PartialEq, Eq)]
pub enum Env {
    Local,
    Production,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl From<&str> for Env {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" => Self::Production,
            _ => Self::Local,
        }
    }
}

impl From<String> for Env {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<Result<String, env::VarError>> for Env {
    fn from(s: Result<String, env::VarError>) -> Self {
        s.unwrap_or_else(|_| "".into()).into()
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub webflow: WebflowSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    env: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

impl ApplicationSettings {
    pub fn env(&self) -> Env {
        self.env.as_str().into()
    }
}

/// Where submissions are stored. The token and collection are optional at
/// startup; a request made without them is rejected by the handler.
#[derive(serde::Deserialize, Debug)]
pub struct WebflowSettings {
    pub base_url: String,
    pub api_token: Option<Secret<String>>,
    pub collection_id: Option<String>,
}

impl WebflowSettings {
    /// Resolves the collection to write to. `None` when either value is
    /// missing or blank.
    pub fn target(&self) -> Option<CollectionTarget> {
        let api_token = self
            .api_token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())?;
        let collection_id = self.collection_id.as_ref().filter(|id| !id.is_empty())?;

        Some(CollectionTarget {
            api_token: Secret::new(api_token.expose_secret().clone()),
            collection_id: collection_id.clone(),
        })
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let base_path = env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        let config_dir = base_path.join("config");
        let app_env: Env = env::var("APPLICATION_ENV").into();

        Config::builder()
            .add_source(File::from(config_dir.join("base")).required(true))
            .add_source(File::from(config_dir.join(app_env.as_str())).required(true))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override("application.env", app_env.as_str())?
            .set_override_option("webflow.api_token", non_empty_var("WEBFLOW_API_TOKEN"))?
            .set_override_option(
                "webflow.collection_id",
                non_empty_var("WEBFLOW_COLLECTION_ID"),
            )?
            .build()?
            .try_deserialize()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
