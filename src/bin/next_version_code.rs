use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use release_tools::config::Config;
use release_tools::error::{ReleaseError, Result};
use release_tools::pipeline::resolve;
use release_tools::play::PlayPublisher;

#[derive(Parser)]
#[command(
  name = "next-version-code",
  about = "Print the next Google Play version code not used by any track"
)]
struct Cli {
  /// Path to config file (defaults to release-tools.yaml if present)
  #[arg(short, long)]
  config: Option<PathBuf>,
}

fn main() {
  release_tools::init_tracing();

  let cli = Cli::parse();

  match run(cli) {
    Ok(next) => println!("{next}"),
    Err(e) => {
      error!("{e}");
      if !e.is_precondition() && !matches!(e, ReleaseError::Config(_) | ReleaseError::ConfigNotFound(_)) {
        eprintln!();
        eprintln!("Troubleshooting:");
        eprintln!("  1. Verify service account has 'Release Manager' role in Play Console");
        eprintln!("  2. Check that Google Play Developer API is enabled");
        eprintln!("  3. Ensure package name is correct");
      }
      std::process::exit(1);
    }
  }
}

fn run(cli: Cli) -> Result<u64> {
  let config = Config::resolve(cli.config.as_deref())?;
  let resolver = &config.resolver;

  let resolution = resolve::run(resolver, |key| {
    PlayPublisher::connect(key, &resolver.api_base)
  })?;

  eprintln!("{resolution}");
  Ok(resolution.next_version_code)
}
