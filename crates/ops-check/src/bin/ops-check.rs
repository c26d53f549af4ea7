//! ops-check - verify cluster health from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ops_check::{
    run_check, ClusterSource, HealthReport, KubeSource, PodStatus, SnapshotFileSource,
};

/// Point-in-time cluster health check for nodes and pods.
#[derive(Parser)]
#[command(name = "ops-check")]
#[command(about = "Verify node readiness, node pressure and pod phases")]
#[command(version)]
struct Cli {
    /// Namespace to check pods in.
    #[arg(long, env = "OPS_CHECK_NAMESPACE", default_value = "default")]
    namespace: String,

    /// Path to a kubeconfig file (defaults to KUBECONFIG or ~/.kube/config).
    #[arg(long, env = "OPS_CHECK_KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// Evaluate a JSON snapshot file instead of the live cluster.
    /// Takes precedence over --kubeconfig.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit with status 1 when anything is not healthy.
    #[arg(long, default_value = "false")]
    strict: bool,

    /// Emit logs as JSON lines.
    #[arg(long, default_value = "false")]
    log_json: bool,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let source: Box<dyn ClusterSource> = if let Some(path) = &cli.snapshot {
        Box::new(
            SnapshotFileSource::load(path)
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        )
    } else {
        Box::new(
            KubeSource::connect(cli.kubeconfig.as_deref())
                .await
                .context("Failed to create Kubernetes client")?,
        )
    };

    if matches!(cli.format, OutputFormat::Text) {
        println!("🚀 Ops Check: Verifying Cluster Health...");
    }

    let report = run_check(source.as_ref(), &cli.namespace).await;

    match cli.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    if cli.strict && !report.is_healthy() {
        info!("Cluster is not healthy, exiting with status 1");
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(report: &HealthReport) {
    println!("\n🔎 Checking Nodes...");
    if let Some(error) = &report.node_fetch_error {
        println!("❌ {}", error.red());
    }
    for node in &report.nodes {
        for warning in node.warning_messages() {
            println!("⚠️  {}", warning.yellow());
        }
        if node.ready {
            println!("✅ {}", node.status_message().green());
        } else {
            println!("❌ {}", node.status_message().red());
        }
    }

    println!("\n🔎 Checking Pods ({} namespace)...", report.namespace);
    if let Some(error) = &report.pod_fetch_error {
        println!("❌ {}", error.red());
    }
    for pod in &report.pods {
        let message = pod.status_message();
        match pod.status {
            PodStatus::Healthy => println!("✅ {}", message.green()),
            PodStatus::NeedsAttention => println!("⚠️ {}", message.yellow()),
            PodStatus::Unhealthy { .. } => println!("❌ {}", message.red()),
        }
    }

    let summary = report.summary();
    println!(
        "\n{}",
        format!(
            "Nodes: {} ready, {} not ready, {} under pressure | Pods: {} running, {} pending, {} unhealthy",
            summary.nodes_ready,
            summary.nodes_not_ready,
            summary.nodes_under_pressure,
            summary.pods_healthy,
            summary.pods_pending,
            summary.pods_unhealthy
        )
        .bold()
    );
}
