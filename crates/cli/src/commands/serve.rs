//! `hygienebot serve`: Start the HTTP API server.

use hygienebot_config::AppConfig;

pub async fn run(
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(host) = host_override {
        config.gateway.host = host;
    }
    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    config.validate()?;

    println!("🧼 {}", config.bot.name);
    println!("   Listening: {}", config.bind_addr());
    println!("   Press Ctrl+C to stop");

    hygienebot_gateway::start(config).await?;

    Ok(())
}
