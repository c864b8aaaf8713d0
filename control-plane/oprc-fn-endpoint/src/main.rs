use std::sync::Arc;

use clap::Parser;
use envconfig::Envconfig;
use kube::Client;
use serde::Serialize;
use tracing::info;

use oprc_fn_endpoint::{
    ConfiguredExternalIp, EndpointConfig, FunctionEntity, FunctionMeta,
    InvokeVia, KubeResourceSource, init_tracing,
};

/// Resolve where a deployed function can be invoked.
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Function name (also the name of its Deployment and Ingress)
    #[arg(short, long)]
    name: String,
    /// Namespace; empty resolves against the client's default namespace
    #[arg(short = 'N', long, default_value = "")]
    namespace: String,
    #[arg(long, default_value = oprc_fn_endpoint::types::DEFAULT_FUNCTION_VERSION)]
    version: String,
    /// any | load-balancer | external-ip | domain-name
    #[arg(long, default_value = "any")]
    via: InvokeVia,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    namespace: &'a str,
    via: InvokeVia,
    invoke_url: String,
    available_replicas: i32,
    configured_replicas: i32,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let cfg = EndpointConfig::init_from_env()?;
    info!(?cfg, "Loaded endpoint config");

    let client = Client::try_default().await?;
    let platform = Arc::new(ConfiguredExternalIp::from(&cfg.external_ip));
    let meta =
        FunctionMeta::new(&args.name, &args.namespace).with_version(&args.version);
    let mut function = FunctionEntity::new(
        meta,
        Arc::new(KubeResourceSource::new(client)),
        platform,
        cfg,
    );

    function.initialize().await?;
    let invoke_url = function.invoke_url(args.via)?;
    let (available, configured) = function.replicas();

    if args.json {
        let report = Report {
            name: &args.name,
            namespace: &args.namespace,
            via: args.via,
            invoke_url,
            available_replicas: available,
            configured_replicas: configured,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{invoke_url}");
        println!("replicas: {available}/{configured}");
    }
    Ok(())
}
