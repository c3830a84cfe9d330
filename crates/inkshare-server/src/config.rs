//! Relay configuration from the environment.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tracing::warn;

/// Environment variable holding the listen address.
pub const ADDR_ENV: &str = "INKSHARE_RELAY_ADDR";

/// Port the relay listens on by default.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub addr: SocketAddr,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
        }
    }
}

impl RelayConfig {
    /// Read `INKSHARE_RELAY_ADDR`, falling back to `0.0.0.0:8080`.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ADDR_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::default();
        };
        match raw.parse() {
            Ok(addr) => Self { addr },
            Err(e) => {
                let fallback = Self::default();
                warn!("Ignoring {}={:?} ({}), using {}", ADDR_ENV, raw, e, fallback.addr);
                fallback
            }
        }
    }
}
