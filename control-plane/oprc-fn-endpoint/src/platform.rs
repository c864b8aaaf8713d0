use crate::config::ExternalIpConfig;
use crate::error::PlatformError;

/// Hosting platform hook that knows how functions are exposed on external
/// node addresses. An empty host means nothing is exposed.
pub trait ExternalIpResolver: Send + Sync {
    fn external_ip_invocation_url(&self) -> Result<(String, u16), PlatformError>;
}

/// Resolver over a static list of node addresses and the function's exposed
/// port. The first address wins.
#[derive(Clone, Debug, Default)]
pub struct ConfiguredExternalIp {
    addresses: Vec<String>,
    port: u16,
}

impl ConfiguredExternalIp {
    pub fn new(addresses: Vec<String>, port: u16) -> Self {
        Self { addresses, port }
    }
}

impl From<&ExternalIpConfig> for ConfiguredExternalIp {
    fn from(cfg: &ExternalIpConfig) -> Self {
        Self::new(cfg.addresses.0.clone(), cfg.port)
    }
}

impl ExternalIpResolver for ConfiguredExternalIp {
    fn external_ip_invocation_url(&self) -> Result<(String, u16), PlatformError> {
        match self.addresses.first() {
            Some(addr) => Ok((addr.clone(), self.port)),
            None => Ok((String::new(), 0)),
        }
    }
}
