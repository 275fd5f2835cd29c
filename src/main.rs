use form_relay::{
    application::Application,
    settings::Settings,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("form_relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = Settings::load()?;
    tracing::info!(env = settings.application.env().as_str(), "Loaded settings");

    if settings.webflow.target().is_none() {
        tracing::warn!(
            "WEBFLOW_API_TOKEN or WEBFLOW_COLLECTION_ID is not set; submissions will be rejected"
        );
    }

    let application = Application::builder_from_settings(settings).build()?;
    tracing::info!(port = application.port(), "Listening for form submissions");

    application.run_until_stopped().await?;

    Ok(())
}
