use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("mock_server=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let customer_id = std::env::var("BLUEBOX_CUSTOMER_ID").unwrap_or_else(|_| "customer".to_string());
    let api_key = std::env::var("BLUEBOX_API_KEY").unwrap_or_else(|_| "secret".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, %customer_id, "Mock Box Panel listening");
    mock_server::run(listener, &customer_id, &api_key).await?;
    Ok(())
}
