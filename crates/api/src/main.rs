use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lendtrack_observability::init();

    let config = lendtrack_api::config::AppConfig::from_env();

    let pool = lendtrack_store::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    lendtrack_store::init_schema(&pool)
        .await
        .context("failed to initialize schema")?;

    let app = lendtrack_api::app::build_app(pool);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
