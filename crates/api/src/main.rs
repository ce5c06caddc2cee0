#[tokio::main]
async fn main() {
    tradeloom_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let invoice_prefix = std::env::var("INVOICE_PREFIX").unwrap_or_else(|_| "TLM".to_string());

    let services = tradeloom_api::app::AppServices::in_memory(invoice_prefix);
    let app = tradeloom_api::app::build_app(services, jwt_secret);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
