// ⚙️ Server configuration
// The listen address is fixed; nothing is read from the environment or CLI.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port the API listens on
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Address to show users (binding to 0.0.0.0 is reachable via localhost)
    pub fn public_url(&self) -> String {
        let host = if self.host.is_unspecified() {
            "localhost".to_string()
        } else {
            self.host.to_string()
        };
        format!("http://{}:{}", host, self.port)
    }
}
