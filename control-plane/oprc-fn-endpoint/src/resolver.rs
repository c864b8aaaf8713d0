use tracing::debug;

use crate::error::FunctionError;
use crate::function::FunctionEntity;
use crate::types::{InvokeVia, ResolvedEndpoint};

impl FunctionEntity {
    /// Returns `"<host>:<port><path>"` for the requested mechanism.
    pub fn invoke_url(&self, via: InvokeVia) -> Result<String, FunctionError> {
        Ok(self.resolve_fields(via)?.to_string())
    }

    /// Resolve host, port and path for the requested mechanism.
    ///
    /// A specific mechanism is authoritative and never falls back. With
    /// [`InvokeVia::Any`] the configured chain is walked in order and the
    /// first mechanism producing a host wins.
    pub fn resolve_fields(
        &self,
        via: InvokeVia,
    ) -> Result<ResolvedEndpoint, FunctionError> {
        if via != InvokeVia::Any {
            let endpoint = self.resolve_single(via)?;
            if endpoint.is_empty() {
                return Err(FunctionError::NoAddressForVia(via));
            }
            return Ok(endpoint);
        }

        for (index, candidate) in
            self.config.any_chain.as_slice().iter().enumerate()
        {
            match self.resolve_single(*candidate) {
                Ok(ep) if !ep.is_empty() => {
                    debug!(
                        index,
                        via = %candidate,
                        host = %ep.host,
                        port = ep.port,
                        path = %ep.path,
                        "Resolved invoke URL with method"
                    );
                    return Ok(ep);
                }
                Ok(_) => {
                    debug!(index, via = %candidate, "No address with method");
                }
                Err(e) => {
                    debug!(index, via = %candidate, error = %e, "Could not get invoke URL with method");
                }
            }
        }

        Err(FunctionError::Unresolvable)
    }

    fn resolve_single(
        &self,
        via: InvokeVia,
    ) -> Result<ResolvedEndpoint, FunctionError> {
        match via {
            InvokeVia::LoadBalancer => Ok(self.ingress_endpoint()),
            InvokeVia::ExternalIp => self.external_ip_endpoint(),
            InvokeVia::DomainName => Ok(self.domain_name_endpoint()),
            // the fallback chain never contains Any
            InvokeVia::Any => Err(FunctionError::Unresolvable),
        }
    }

    fn ingress_endpoint(&self) -> ResolvedEndpoint {
        if self.snapshot.ingress_address.is_empty() {
            return ResolvedEndpoint::default();
        }
        ResolvedEndpoint::new(
            self.snapshot.ingress_address.clone(),
            self.config.ingress_port,
            format!("/{}/{}", self.meta.name, self.meta.version),
        )
    }

    fn external_ip_endpoint(&self) -> Result<ResolvedEndpoint, FunctionError> {
        let (host, port) = self.platform.external_ip_invocation_url()?;
        Ok(ResolvedEndpoint::new(host, port, ""))
    }

    fn domain_name_endpoint(&self) -> ResolvedEndpoint {
        let host = if self.meta.namespace.is_empty() {
            self.meta.name.clone()
        } else {
            format!(
                "{}.{}.{}",
                self.meta.name, self.meta.namespace, self.config.cluster_domain
            )
        };
        ResolvedEndpoint::new(host, self.config.domain_port, "")
    }
}
