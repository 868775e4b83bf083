// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use collab_api::{
    config::{AppState, Settings},
    db::Repository,
    routes::build_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;
    tracing::info!("🗄️ Modo de dados: {:?}", app_state.repo.mode());

    let app = build_router(app_state);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
