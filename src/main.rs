use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cineghar::{
    catalog::Catalog,
    config::Config,
    routes::{create_router, AppState},
    services::SupabaseGateway,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cineghar=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let gateway = SupabaseGateway::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    );
    if config.supabase_anon_key.is_empty() {
        tracing::warn!("SUPABASE_ANON_KEY is not set; backend calls will be rejected");
    }

    let state = AppState::new(catalog, Arc::new(gateway));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
