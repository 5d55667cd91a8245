pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod mailing_list_client;
pub mod recaptcha_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
