use error_stack::ResultExt;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use application::service::AuthService;
use application::transfer::RegisterAccountDto;
use driver::database::{InMemoryDatabase, PostgresDatabase, POSTGRES_URL};
use kernel::KernelError;

use crate::config::ServerConfig;
use crate::error::StackTrace;
use crate::handler::{AppModule, Backend};

mod config;
mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;
mod session;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "application=debug,driver=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = ServerConfig::from_env()?;

    match dotenvy::var(POSTGRES_URL) {
        Ok(url) => serve(PostgresDatabase::connect(&url).await?, config).await?,
        Err(_) => {
            tracing::warn!("{POSTGRES_URL} is not set, records are kept in memory only");
            serve(InMemoryDatabase::new(), config).await?
        }
    }

    Ok(())
}

async fn serve<D: Backend>(database: D, config: ServerConfig) -> error_stack::Result<(), KernelError> {
    if let Some(admin) = config.admin() {
        let created = database
            .register_account(&RegisterAccountDto {
                email: admin.email().clone(),
                password: admin.password().clone(),
            })
            .await?;
        if created {
            tracing::info!(email = %admin.email(), "Administrator account created");
        }
    }

    let bind = *config.bind_address();
    let router = route::router(AppModule::new(database, config));

    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!(address = %bind, "Listening");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
