use std::{io, net::TcpListener, sync::Arc};

use crate::{
    cms_client::{CmsClient, WebflowClient},
    routes::{health_check, submit_form_routes},
    settings::{ApplicationSettings, Settings, WebflowSettings},
};
use actix_web::{dev::Server, web, App, HttpServer};

use tracing_actix_web::TracingLogger;

pub struct ApplicationBuilder {
    settings: Settings,
    cms_client: Option<Arc<dyn CmsClient>>,
    tcp_listener: Option<TcpListener>,
}

impl ApplicationBuilder {
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            cms_client: None,
            tcp_listener: None,
        }
    }

    pub fn set_cms_client(mut self, cms_client: Arc<dyn CmsClient>) -> Self {
        self.cms_client = Some(cms_client);
        self
    }

    pub fn set_tcp_listener(mut self, tcp_listener: TcpListener) -> Self {
        self.tcp_listener = Some(tcp_listener);
        self
    }

    pub fn build(self) -> Result<Application, io::Error> {
        let Self {
            settings,
            cms_client,
            tcp_listener,
        } = self;

        let cms_client = cms_client.unwrap_or_else(|| {
            Arc::new(WebflowClient::new(settings.webflow.base_url.clone()))
        });

        let tcp_listener = match tcp_listener {
            Some(tcp_listener) => tcp_listener,
            None => {
                let ApplicationSettings { ref host, port, .. } = settings.application;
                let address = format!("{host}:{port}");

                TcpListener::bind(&address).map_err(|e| {
                    io::Error::new(
                        e.kind(),
                        format!("Couldn't bind TCP listener to {address}, because \"{e}\""),
                    )
                })?
            }
        };

        Ok(Application {
            port: tcp_listener.local_addr()?.port(),
            webflow: settings.webflow,
            cms_client,
            tcp_listener,
        })
    }
}

pub struct Application {
    port: u16,
    webflow: WebflowSettings,
    cms_client: Arc<dyn CmsClient>,
    tcp_listener: TcpListener,
}

impl Application {
    pub fn builder_from_settings(settings: Settings) -> ApplicationBuilder {
        ApplicationBuilder::from_settings(settings)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.run()?.await
    }

    pub fn run(self) -> Result<Server, io::Error> {
        let Self {
            webflow,
            cms_client,
            tcp_listener,
            ..
        } = self;

        let webflow = web::Data::new(webflow);
        let cms_client: web::Data<dyn CmsClient> = web::Data::from(cms_client);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .route("/health_check", web::get().to(health_check))
                .configure(submit_form_routes)
                .app_data(webflow.clone())
                .app_data(cms_client.clone())
        })
        .listen(tcp_listener)?
        .run();

        Ok(server)
    }
}
