mod domain;
mod application;
mod infrastructure;
mod config;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::application::ports::Mailer;
use crate::config::Settings;
use crate::infrastructure::driven::*;
use crate::infrastructure::driving::http::create_router;
use crate::infrastructure::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load().context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)),
        )
        .init();

    tracing::info!("Cohort backend starting...");

    let mailer = build_mailer(&settings)?;
    let state = match settings.database.url.as_deref() {
        Some(url) => postgres_state(&settings, url, mailer).await?,
        None => {
            tracing::warn!("No database URL configured, using the in-memory store");
            in_memory_state(&settings, mailer)
        }
    };

    let app = create_router(state);
    let address = settings.server_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("Server listening on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_mailer(settings: &Settings) -> anyhow::Result<Arc<dyn Mailer>> {
    if settings.mail.is_configured() {
        Ok(Arc::new(SmtpMailer::new(&settings.mail)?))
    } else {
        tracing::warn!("No SMTP relay configured, outgoing mail is only logged");
        Ok(Arc::new(LogMailer))
    }
}

async fn postgres_state(
    settings: &Settings,
    url: &str,
    mailer: Arc<dyn Mailer>,
) -> anyhow::Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(url)
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    tracing::info!("Connected to Postgres, migrations applied");

    Ok(AppState {
        jwt_secret: settings.auth.jwt_secret.clone(),
        invoice_due_in: settings.invoice_due_in(),
        user_repo: Arc::new(PostgresUserRepository::new(pool.clone())),
        workspace_repo: Arc::new(PostgresWorkspaceRepository::new(pool.clone())),
        booking_repo: Arc::new(PostgresBookingRepository::new(pool.clone())),
        invoice_repo: Arc::new(PostgresInvoiceRepository::new(pool.clone())),
        inquiry_repo: Arc::new(PostgresInquiryRepository::new(pool.clone())),
        day_pass_repo: Arc::new(PostgresDayPassRepository::new(pool)),
        mailer,
        invoice_numbers: Arc::new(OsRandomInvoiceNumbers),
    })
}

fn in_memory_state(settings: &Settings, mailer: Arc<dyn Mailer>) -> AppState {
    AppState {
        jwt_secret: settings.auth.jwt_secret.clone(),
        invoice_due_in: settings.invoice_due_in(),
        user_repo: Arc::new(InMemoryUserRepository::new()),
        workspace_repo: Arc::new(InMemoryWorkspaceRepository::new()),
        booking_repo: Arc::new(InMemoryBookingRepository::new()),
        invoice_repo: Arc::new(InMemoryInvoiceRepository::new()),
        inquiry_repo: Arc::new(InMemoryInquiryRepository::new()),
        day_pass_repo: Arc::new(InMemoryDayPassRepository::new()),
        mailer,
        invoice_numbers: Arc::new(OsRandomInvoiceNumbers),
    }
}
