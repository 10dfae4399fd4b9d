use std::env;

pub const DEFAULT_DELIVERY_FEE_PERCENT: f64 = 0.10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub delivery_fee_percent: f64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let delivery_fee_percent = env::var("DELIVERY_FEE_PERCENT")
            .ok()
            .and_then(|p| p.parse::<f64>().ok())
            .unwrap_or(DEFAULT_DELIVERY_FEE_PERCENT);
        if !(0.0..=1.0).contains(&delivery_fee_percent) {
            anyhow::bail!("DELIVERY_FEE_PERCENT must be between 0.0 and 1.0");
        }
        Ok(Self {
            host,
            port,
            delivery_fee_percent,
        })
    }
}
