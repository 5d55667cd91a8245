use std::{net::TcpListener, sync::Arc};

use axum::{
    body::Body,
    handler::HandlerWithoutStateExt,
    http::Request,
    routing::get,
    serve::Serve,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    configuration::Settings,
    domain::Mailbox,
    email_client::EmailClient,
    mailing_list_client::MailingListClient,
    recaptcha_client::RecaptchaClient,
    routes::{contact_form, health_check, home, not_found, submit_contact_form},
};

/// Per-process dependencies handed to every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub email_client: Arc<EmailClient>,
    pub recaptcha_client: Arc<RecaptchaClient>,
    pub mailing_list_client: Arc<MailingListClient>,
    pub operator: Mailbox,
    pub recaptcha_site_key: Arc<str>,
}

pub struct Application {
    port: u16,
    server: Serve<Router, Router>,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let operator = configuration
            .email_client
            .operator()
            .map_err(anyhow::Error::msg)?;
        let state = AppState {
            recaptcha_site_key: configuration.recaptcha.site_key.clone().into(),
            email_client: Arc::new(configuration.email_client.client()?),
            recaptcha_client: Arc::new(configuration.recaptcha.client()?),
            mailing_list_client: Arc::new(configuration.mailing_list.client()?),
            operator,
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        tracing::info!(port, "Listening for HTTP requests");
        let server = run(listener, state, &configuration.application.static_dir)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn router(state: AppState, static_dir: &str) -> Router {
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(home).fallback(not_found))
        .route(
            "/contact-us",
            get(contact_form)
                .post(submit_contact_form)
                .fallback(not_found),
        )
        .route("/health_check", get(health_check))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http().make_span_with(
                |request: &Request<Body>| {
                    let request_id = uuid::Uuid::new_v4();
                    tracing::info_span!(
                        "http_request",
                        %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            )),
        )
        .with_state(state)
}

pub fn run(
    listener: TcpListener,
    state: AppState,
    static_dir: &str,
) -> Result<Serve<Router, Router>, std::io::Error> {
    let app = router(state, static_dir);

    listener.set_nonblocking(true)?;
    let listener = tokio::net::TcpListener::from_std(listener)?;

    let server = axum::serve(listener, app);
    Ok(server)
}
