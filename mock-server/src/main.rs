use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::fmt().with_env_filter(env_filter).with_target(true).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("API_TOKEN").unwrap_or_else(|_| mock_server::DEFAULT_TOKEN.to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let app = mock_server::app_with(&token, mock_server::default_departments());
    mock_server::run_with(listener, app).await
}
