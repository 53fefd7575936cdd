use crate::config::Config;
use crate::error::Result;
use redis::aio::ConnectionManager;

/// Opens a multiplexed Redis connection that reconnects on its own.
pub async fn create_cache(config: &Config) -> Result<ConnectionManager> {
    let client = redis::Client::open(config.redis_url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}
