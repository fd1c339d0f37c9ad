//! Podcycle CLI - list, inspect, and delete pods in a cluster namespace

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use podcycle::k8s::client;
use podcycle::k8s::pods::ClusterPods;
use podcycle::{Pacing, Workflow};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "podcycle")]
#[command(author, version, about = "List, inspect, and delete pods in a cluster namespace", long_about = None)]
struct Cli {
    /// Path to the kubeconfig file
    #[arg(long, env = "KUBECONFIG")]
    kubeconfig: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Log verbosity comes from RUST_LOG; default to warnings and errors
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let kubeconfig = client::resolve_kubeconfig(cli.kubeconfig)?;
    let kube_client = client::build_client(&kubeconfig).await?;

    let workflow = Workflow::new(ClusterPods::new(kube_client), Pacing::standard());
    workflow.run(&mut io::stdout()).await
}
