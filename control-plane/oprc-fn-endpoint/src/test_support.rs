use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::config::EndpointConfig;
use crate::error::{FetchError, PlatformError};
use crate::function::FunctionEntity;
use crate::platform::ExternalIpResolver;
use crate::source::{FetchResult, ResourceSource};
use crate::types::{DeploymentStatus, FunctionMeta, IngressStatus};

pub(crate) struct FakeSource {
    pub deployment: Mutex<Result<DeploymentStatus, String>>,
    pub ingress: Mutex<Result<Option<IngressStatus>, String>>,
}

impl FakeSource {
    pub fn new(deployment: DeploymentStatus) -> Self {
        Self {
            deployment: Mutex::new(Ok(deployment)),
            ingress: Mutex::new(Ok(None)),
        }
    }

    pub fn with_ingress_ips(self, ips: &[&str]) -> Self {
        *self.ingress.lock().unwrap() = Ok(Some(IngressStatus {
            load_balancer_ips: ips.iter().map(|s| s.to_string()).collect(),
        }));
        self
    }

    pub fn set_deployment(&self, d: Result<DeploymentStatus, String>) {
        *self.deployment.lock().unwrap() = d;
    }

    pub fn set_ingress(&self, i: Result<Option<IngressStatus>, String>) {
        *self.ingress.lock().unwrap() = i;
    }
}

#[async_trait]
impl ResourceSource for FakeSource {
    async fn get_deployment(
        &self,
        _namespace: &str,
        _name: &str,
    ) -> FetchResult<DeploymentStatus> {
        self.deployment
            .lock()
            .unwrap()
            .clone()
            .map_err(FetchError::Unavailable)
    }

    async fn get_ingress(
        &self,
        _namespace: &str,
        _name: &str,
    ) -> FetchResult<Option<IngressStatus>> {
        self.ingress
            .lock()
            .unwrap()
            .clone()
            .map_err(FetchError::Unavailable)
    }
}

pub(crate) struct FakeExternalIp {
    pub result: Result<(String, u16), String>,
    pub calls: AtomicUsize,
}

impl FakeExternalIp {
    pub fn returning(host: &str, port: u16) -> Self {
        Self {
            result: Ok((host.to_string(), port)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            result: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExternalIpResolver for FakeExternalIp {
    fn external_ip_invocation_url(&self) -> Result<(String, u16), PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(PlatformError::Unavailable)
    }
}

pub(crate) fn entity(
    name: &str,
    namespace: &str,
    source: Arc<FakeSource>,
    platform: Arc<FakeExternalIp>,
    config: EndpointConfig,
) -> FunctionEntity {
    FunctionEntity::new(FunctionMeta::new(name, namespace), source, platform, config)
}
