use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::domain::verification::service::VerificationService;
use account_service::inbound::http::router::create_router;
use account_service::domain::verification::ports::MailSender;
use account_service::outbound::mail::HttpApiMailSender;
use account_service::outbound::mail::LogMailSender;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::repositories::PostgresVerificationRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        verification_required = config.verification.required,
        token_ttl_hours = config.verification.token_ttl_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let verification_repository = Arc::new(PostgresVerificationRepository::new(pg_pool));
    // Without an API key, mails are logged instead of dispatched.
    let mail_sender: Arc<dyn MailSender> = if config.mail.api_key.is_empty() {
        tracing::warn!("No mail API key configured, logging mails instead of sending them");
        Arc::new(LogMailSender)
    } else {
        Arc::new(HttpApiMailSender::new(&config.mail))
    };

    let verification_service = Arc::new(VerificationService::new(
        verification_repository,
        Arc::clone(&account_repository),
        mail_sender,
        config.verification.token_ttl_hours,
        config.verification.base_url.clone(),
    ));
    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&verification_service),
        config.verification.required,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, verification_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
