use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Length every reference token must have.
pub const TOKEN_LENGTH: usize = 32;

pub const DEFAULT_PORT: u16 = 8080;

/// The two secrets provisioned for a deployment.
///
/// `Debug` never prints the secret values.
#[derive(Clone, PartialEq, Eq)]
pub struct ProvisionedCredentials {
    pub api_key: String,
    pub token: String,
}

impl ProvisionedCredentials {
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for ProvisionedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedCredentials")
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_address: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}
