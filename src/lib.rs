pub mod application;
pub mod cms_client;
pub mod domain;
pub mod routes;
pub mod settings;
pub mod telemetry;
