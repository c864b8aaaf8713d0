use std::fmt;
use std::str::FromStr;

use envconfig::Envconfig;

use crate::error::ConfigError;
use crate::types::InvokeVia;

pub const DEFAULT_INGRESS_PORT: u16 = 80;
pub const DEFAULT_DOMAIN_PORT: u16 = 8080;
pub const DEFAULT_CLUSTER_DOMAIN: &str = "svc.cluster.local";

#[derive(Envconfig, Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Port served by the ingress load balancer (kubectl assumes 80 as well).
    /// Env: OPRC_FN_INGRESS_PORT
    #[envconfig(from = "OPRC_FN_INGRESS_PORT", default = "80")]
    pub ingress_port: u16,

    /// Port of the function's in-cluster Service.
    /// Env: OPRC_FN_DOMAIN_PORT
    #[envconfig(from = "OPRC_FN_DOMAIN_PORT", default = "8080")]
    pub domain_port: u16,

    /// Env: OPRC_FN_CLUSTER_DOMAIN
    #[envconfig(from = "OPRC_FN_CLUSTER_DOMAIN", default = "svc.cluster.local")]
    pub cluster_domain: String,

    /// Ordered mechanisms tried when the caller accepts any.
    /// Env: OPRC_FN_ANY_CHAIN (e.g. "external-ip,domain-name")
    #[envconfig(from = "OPRC_FN_ANY_CHAIN", default = "external-ip,domain-name")]
    pub any_chain: FallbackChain,

    /// Env: OPRC_FN_INGRESS_GUARD (on-error | on-success)
    #[envconfig(from = "OPRC_FN_INGRESS_GUARD", default = "on-error")]
    pub ingress_guard: IngressGuard,

    #[envconfig(nested)]
    pub external_ip: ExternalIpConfig,
}

#[derive(Envconfig, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExternalIpConfig {
    /// Comma-separated externally reachable node addresses.
    /// Env: OPRC_FN_EXTERNAL_IPS
    #[envconfig(from = "OPRC_FN_EXTERNAL_IPS", default = "")]
    pub addresses: AddressList,

    /// Env: OPRC_FN_EXTERNAL_PORT
    #[envconfig(from = "OPRC_FN_EXTERNAL_PORT", default = "0")]
    pub port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ingress_port: DEFAULT_INGRESS_PORT,
            domain_port: DEFAULT_DOMAIN_PORT,
            cluster_domain: DEFAULT_CLUSTER_DOMAIN.to_string(),
            any_chain: FallbackChain::default(),
            ingress_guard: IngressGuard::default(),
            external_ip: ExternalIpConfig::default(),
        }
    }
}

/// Which ingress fetch outcome allows the load balancer IP to be read.
///
/// `OnFetchError` reproduces the inherited behaviour where the address is
/// only taken when the ingress fetch failed. Since a failed fetch carries no
/// object, this never yields an address. `OnFetchSuccess` is the corrected
/// polarity and must be opted into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IngressGuard {
    #[default]
    OnFetchError,
    OnFetchSuccess,
}

impl FromStr for IngressGuard {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on-error" => Ok(IngressGuard::OnFetchError),
            "on-success" => Ok(IngressGuard::OnFetchSuccess),
            other => Err(ConfigError::InvalidGuard(other.to_string())),
        }
    }
}

impl IngressGuard {
    pub fn allows(&self, fetch_failed: bool) -> bool {
        match self {
            IngressGuard::OnFetchError => fetch_failed,
            IngressGuard::OnFetchSuccess => !fetch_failed,
        }
    }
}

/// Ordered list of concrete mechanisms for `InvokeVia::Any`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackChain(Vec<InvokeVia>);

impl FallbackChain {
    pub fn new(vias: Vec<InvokeVia>) -> Result<Self, ConfigError> {
        if vias.is_empty() {
            return Err(ConfigError::EmptyChain);
        }
        if vias.contains(&InvokeVia::Any) {
            return Err(ConfigError::AnyInChain);
        }
        Ok(Self(vias))
    }

    pub fn as_slice(&self) -> &[InvokeVia] {
        &self.0
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self(vec![InvokeVia::ExternalIp, InvokeVia::DomainName])
    }
}

impl FromStr for FallbackChain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vias = s
            .split(',')
            .filter(|p| !p.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<InvokeVia>, _>>()?;
        Self::new(vias)
    }
}

impl fmt::Display for FallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressList(pub Vec<String>);

impl FromStr for AddressList {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        ))
    }
}
