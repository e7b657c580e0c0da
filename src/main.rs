use actix_web::{App, HttpServer, middleware::Logger, web::Data};
use email_validation_api::config::AppConfig;
use email_validation_api::openapi::ApiDoc;
use email_validation_api::validation::EmailValidator;
use email_validation_api::validation::disposable::DisposableBlocklist;
use email_validation_api::validation::dnsmx::DnsDeliverabilityChecker;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email Validation Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - API-key protected validation endpoints under `{API_PREFIX}/v1`
/// - Swagger UI for API documentation (outside production)
/// - Environment configuration via `.env` file
///
/// # Endpoints
/// - Validation: `POST /api/v1/validate-emails[/{email}]`
/// - Health: `GET /api/v1/health`
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// See [`AppConfig`]. Startup fails if `API_SECRET_KEY` is missing or a
/// numeric setting cannot be parsed.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("development");
            tracing::error!(error = %e, "invalid configuration");
            return Err(std::io::Error::other(e));
        }
    };
    init_tracing(&config.environment);

    let mut blocklist = DisposableBlocklist::builtin();
    if let Some(path) = &config.disposable_domains_file {
        let added = blocklist.extend_from_file(path)?;
        tracing::info!(path = %path.display(), added, "loaded extra disposable domains");
    }
    tracing::info!(domains = blocklist.len(), "disposable blocklist ready");
    let blocklist = Arc::new(blocklist);

    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        prefix = %config.api_prefix,
        check_deliverability = config.check_deliverability,
        "starting email validation service"
    );

    let bind_address = (config.host.clone(), config.port);
    let serve_docs = !config.is_production();
    let dns_timeout = Duration::from_secs(config.dns_timeout_secs);
    let check_deliverability = config.check_deliverability;
    let config = Data::new(config);

    HttpServer::new(move || {
        // One resolver per worker runtime, reused by every request it serves.
        let validator = Data::new(EmailValidator::new(
            blocklist.clone(),
            Arc::new(DnsDeliverabilityChecker::new(dns_timeout)),
            check_deliverability,
        ));

        App::new()
            .wrap(Logger::default())
            .app_data(config.clone())
            .app_data(validator)
            .configure(|cfg| email_validation_api::routes::configure(cfg, &config))
            .configure(|cfg| {
                if serve_docs {
                    cfg.service(
                        SwaggerUi::new("/swagger-ui/{_:.*}")
                            .url("/api-docs/openapi.json", ApiDoc::openapi()),
                    );
                }
            })
    })
    .bind(bind_address)?
    .run()
    .await
}

fn init_tracing(environment: &str) {
    let default_filter = if environment.eq_ignore_ascii_case("development") {
        "email_validation_api=debug,actix_web=info"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
