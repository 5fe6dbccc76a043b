use mock_server::{Provider, DEFAULT_DOMAIN, DEFAULT_KEY, DEFAULT_TOKEN};
use tokio::net::TcpListener;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = env_or("PORT", "3000");
    let domain = env_or("EASYDNS_DOMAIN", DEFAULT_DOMAIN);
    let provider = Provider::new(
        &domain,
        &env_or("EASYDNS_TOKEN", DEFAULT_TOKEN),
        &env_or("EASYDNS_KEY", DEFAULT_KEY),
    );

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("serving {domain} on {addr}");
    mock_server::run_with(listener, provider.shared()).await
}
