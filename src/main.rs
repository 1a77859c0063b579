//! merge-sweep binary - CI entrypoint for batch squash merges

use anstream::println;
use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use merge_sweep::batch::{ProgressReporter, run_batch};
use merge_sweep::config::{BatchConfig, MergeStrategyKind, parse_flag, parse_repository_list};
use merge_sweep::merge::{HostedMergeStrategy, LocalCloneStrategy, MergeStrategy};
use merge_sweep::platform::{GitHubService, HostingService};
use merge_sweep::types::BatchResult;
use owo_colors::OwoColorize;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Batch squash-merge propagation across repositories
#[derive(Debug, Parser)]
#[command(name = "merge-sweep", version, about)]
struct Cli {
    /// Credential for the hosting API and the authenticated clone transport
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Comma-separated list of target repositories (`owner/name`)
    #[arg(long, env = "TARGET_REPOSITORIES")]
    repositories: String,

    /// Branch to merge from
    #[arg(long, env = "SOURCE_BRANCH")]
    source_branch: String,

    /// Branch to merge into
    #[arg(long, env = "TARGET_BRANCH")]
    target_branch: String,

    /// Commit-message template with `{source}`/`{target}` placeholders
    #[arg(long, env = "COMMIT_MESSAGE_TEMPLATE")]
    commit_message_template: Option<String>,

    /// Delete the source branch after merging ("true"/anything else)
    #[arg(long, env = "DELETE_SOURCE_BRANCH", default_value = "false")]
    delete_source_branch: String,

    /// Recreate the source branch at the new target tip after deletion
    #[arg(long, env = "RECREATE_SOURCE_BRANCH", default_value = "false")]
    recreate_source_branch: String,

    /// Create a release after merging ("true"/anything else)
    #[arg(long, env = "CREATE_RELEASE", default_value = "false")]
    create_release: String,

    /// Squash-merge strategy
    #[arg(long, env = "MERGE_STRATEGY", value_enum, default_value = "api")]
    strategy: MergeStrategyKind,

    /// GitHub Enterprise host (github.com when omitted)
    #[arg(long, env = "GITHUB_HOST")]
    github_host: Option<String>,
}

/// Reporter printing status lines as the batch proceeds
struct ConsoleReporter;

#[async_trait]
impl ProgressReporter for ConsoleReporter {
    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Stringly-typed CI flags become real booleans here and nowhere else
    let config = BatchConfig {
        repositories: parse_repository_list(&cli.repositories),
        source_branch: cli.source_branch,
        target_branch: cli.target_branch,
        commit_message_template: cli.commit_message_template,
        delete_source_branch: parse_flag(&cli.delete_source_branch),
        recreate_source_branch: parse_flag(&cli.recreate_source_branch),
        create_release: parse_flag(&cli.create_release),
        strategy: cli.strategy,
    };
    config.validate(&cli.token)?;

    let platform: Arc<dyn HostingService> =
        Arc::new(GitHubService::new(&cli.token, cli.github_host.as_deref())?);
    let strategy: Box<dyn MergeStrategy> = match config.strategy {
        MergeStrategyKind::Api => Box::new(HostedMergeStrategy::new(Arc::clone(&platform))),
        MergeStrategyKind::Local => Box::new(LocalCloneStrategy::new(
            &cli.token,
            cli.github_host.as_deref(),
        )),
    };

    println!(
        "{} {} {} {} {}",
        "Merging".bold(),
        config.source_branch.cyan(),
        "into".bold(),
        config.target_branch.cyan(),
        format!("across {} repositories...", config.repositories.len()).dimmed()
    );

    let result = run_batch(&config, platform.as_ref(), strategy.as_ref(), &ConsoleReporter).await?;

    print_summary(&result);
    write_outputs(&result).context("failed to write CI outputs")?;

    // Exit status reflects only the presence of failures, never skips
    if result.has_failures() {
        anyhow::bail!(
            "{} of {} repositories failed",
            result.failed.len(),
            result.summary().total
        );
    }
    Ok(())
}

fn print_summary(result: &BatchResult) {
    let summary = result.summary();
    println!();
    if result.has_failures() {
        println!("{}", "Batch finished with failures".yellow().bold());
    } else if summary.successful == 0 {
        println!(
            "{}",
            "Batch finished: nothing merged (all repositories skipped)".dimmed()
        );
    } else {
        println!("{}", "Batch complete!".green().bold());
    }
    println!(
        "   {} total, {} merged, {} failed, {} skipped",
        summary.total,
        summary.successful.green(),
        summary.failed.red(),
        summary.skipped.yellow()
    );
    let hint = result.bump_hint();
    if hint != merge_sweep::version::BumpHint::None {
        println!("   Suggested version bump: {}", hint.to_string().cyan());
    }
}

/// Emit CI outputs: appended to `$GITHUB_OUTPUT` when set, otherwise
/// printed as `key=value` lines.
fn write_outputs(result: &BatchResult) -> std::io::Result<()> {
    let summary = result.summary();
    let lines = [
        format!("merged_repositories={}", result.merged_repositories().join(",")),
        format!("merged_count={}", summary.successful),
        format!("failed_repositories={}", result.failed_repositories().join(",")),
        format!(
            "summary={}",
            serde_json::json!({
                "total": summary.total,
                "successful": summary.successful,
                "failed": summary.failed,
                "skipped": summary.skipped,
            })
        ),
        format!("version_bump={}", result.bump_hint().as_output()),
    ];

    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        let mut file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
        for line in &lines {
            writeln!(file, "{line}")?;
        }
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}
