#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use oprc_fn_endpoint::source::FetchResult;
use oprc_fn_endpoint::{
    DeploymentStatus, EndpointConfig, ExternalIpResolver, FetchError,
    FunctionEntity, FunctionMeta, IngressStatus, PlatformError, ResourceSource,
};

/// In-memory resource store; results can be swapped between loads.
#[derive(Default)]
pub struct MemorySource {
    deployment: Mutex<Option<DeploymentStatus>>,
    ingress_ips: Mutex<Option<Vec<String>>>,
    ingress_error: Mutex<bool>,
    pub deployment_reads: AtomicUsize,
}

impl MemorySource {
    pub fn with_deployment(replicas: Option<i32>, available: i32) -> Self {
        let s = Self::default();
        s.set_deployment(replicas, available);
        s
    }

    pub fn set_deployment(&self, replicas: Option<i32>, available: i32) {
        *self.deployment.lock().unwrap() = Some(DeploymentStatus {
            replicas,
            available_replicas: available,
        });
    }

    pub fn remove_deployment(&self) {
        *self.deployment.lock().unwrap() = None;
    }

    pub fn set_ingress_ips(&self, ips: &[&str]) {
        *self.ingress_ips.lock().unwrap() =
            Some(ips.iter().map(|s| s.to_string()).collect());
    }

    pub fn fail_ingress(&self) {
        *self.ingress_error.lock().unwrap() = true;
    }
}

#[async_trait]
impl ResourceSource for MemorySource {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> FetchResult<DeploymentStatus> {
        self.deployment_reads.fetch_add(1, Ordering::SeqCst);
        self.deployment.lock().unwrap().clone().ok_or_else(|| {
            FetchError::NotFound(format!("deployment {}/{}", namespace, name))
        })
    }

    async fn get_ingress(
        &self,
        _namespace: &str,
        _name: &str,
    ) -> FetchResult<Option<IngressStatus>> {
        if *self.ingress_error.lock().unwrap() {
            return Err(FetchError::Unavailable("ingress api down".into()));
        }
        Ok(self
            .ingress_ips
            .lock()
            .unwrap()
            .clone()
            .map(|load_balancer_ips| IngressStatus { load_balancer_ips }))
    }
}

pub struct StubExternalIp {
    host: String,
    port: u16,
    pub calls: AtomicUsize,
}

impl StubExternalIp {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new("", 0)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExternalIpResolver for StubExternalIp {
    fn external_ip_invocation_url(&self) -> Result<(String, u16), PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.host.clone(), self.port))
    }
}

pub fn function(
    meta: FunctionMeta,
    source: Arc<MemorySource>,
    platform: Arc<StubExternalIp>,
    config: EndpointConfig,
) -> FunctionEntity {
    FunctionEntity::new(meta, source, platform, config)
}
