use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use release_tools::config::Config;
use release_tools::error::{ReleaseError, Result};
use release_tools::github::GitHubClient;
use release_tools::pipeline::seed;

#[derive(Parser)]
#[command(
  name = "seed-issues",
  about = "Create the tag-suggestions backlog items as GitHub issues"
)]
struct Cli {
  /// Path to config file (defaults to release-tools.yaml if present)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Parse documents and show what would be created, without calling GitHub
  #[arg(long)]
  dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
  release_tools::init_tracing();

  let cli = Cli::parse();

  if let Err(e) = run(cli).await {
    error!("{e}");
    if let ReleaseError::MissingToken(var) = &e {
      eprintln!();
      eprintln!("To create a token:");
      eprintln!("1. Go to https://github.com/settings/tokens");
      eprintln!("2. Click 'Generate new token (classic)'");
      eprintln!("3. Select 'repo' scope");
      eprintln!("4. Copy the token and run:");
      eprintln!("   export {var}='your_token_here'");
    }
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let config = Config::resolve(cli.config.as_deref())?;
  let seeder = &config.seeder;

  println!("{}", "=".repeat(60));
  println!("GitHub Issues Creator for Tag Suggestions Feature");
  println!("{}", "=".repeat(60));
  println!();

  if cli.dry_run {
    return cmd_dry_run(seeder);
  }

  let (owner, repo) = seeder.owner_repo();
  let client = GitHubClient::from_env(&seeder.token_env, owner, repo)?;

  let outcome = seed::run(&client, seeder).await?;

  println!("Repository: {}", outcome.repository.full_name);
  println!("Issues enabled: {}", outcome.repository.has_issues);
  println!(
    "Labels: {} ready, {} failed",
    outcome.labels.ready.len(),
    outcome.labels.failed.len()
  );
  for (name, reason) in &outcome.labels.failed {
    println!("  Could not create label '{name}': {reason}");
  }
  println!();

  println!("{}", "=".repeat(60));
  println!("Summary");
  println!("{}", "=".repeat(60));
  println!("{}", outcome.report);
  println!("View all issues: {}", seeder.issues_url());

  Ok(())
}

fn cmd_dry_run(seeder: &release_tools::config::SeederConfig) -> Result<()> {
  for (file_name, doc) in seed::preview(seeder) {
    match doc {
      Ok(doc) => {
        println!("--- {file_name} ---");
        println!("Title:  {}", doc.title);
        println!("Labels: {}", doc.labels.join(", "));
        println!();
      }
      Err(e) => {
        println!("--- {file_name} ---");
        println!("Error:  {e}");
        println!();
      }
    }
  }
  Ok(())
}
