use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use clap::Parser;

/// Runtime configuration, read from flags or the environment (`.env` is
/// loaded first). The places API key has no default and is never logged.
#[derive(Parser, Clone)]
#[clap(name = "medilocator", about = "Find and analyze nearby hospitals")]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    #[clap(env, long, hide_env_values = true)]
    pub places_api_key: String,

    #[clap(env, long, default_value = "https://maps.googleapis.com/maps/api/place")]
    pub places_base_url: String,

    #[clap(env, long, default_value = "https://ipinfo.io/json")]
    pub ip_geolocation_url: String,

    /// Applies to every outbound request.
    #[clap(env, long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[clap(env, long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    /// Comma separated list of origins allowed by CORS.
    #[clap(env, long, default_value = "http://localhost:8501")]
    pub origin_urls: String,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_key_is_given() {
        let config = Config::parse_from(["medilocator", "--places-api-key", "secret"]);

        assert_eq!(config.places_api_key, "secret");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
