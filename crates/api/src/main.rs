use estoque_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    estoque_observability::init();

    let config = estoque_api::config::Config::from_env();
    let store = Store::connect(&config.database)?;

    // The pool is lazy; a database that is still coming up only delays
    // schema creation, not process start.
    if let Err(e) = store.init_schema().await {
        tracing::warn!(error = %e, "schema initialization failed; waiting for database credentials");
    }

    let app = estoque_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
