use tracing::{info, warn};

use crate::config::SeederConfig;
use crate::error::Result;
use crate::github::client::IssueTracker;
use crate::github::issue::{NewIssue, RepositoryInfo};
use crate::pipeline::labels::{ensure_labels, LabelReport};
use crate::task::WorkItemDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
  pub title: String,
  pub url: String,
  pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
  /// Document title, or the file name when the file could not be read.
  pub title: String,
  pub reason: String,
}

/// Outcome of one pass over the document list, in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
  pub created: Vec<CreatedItem>,
  pub failed: Vec<FailedItem>,
}

#[derive(Debug, Clone)]
pub struct SeedOutcome {
  pub repository: RepositoryInfo,
  pub labels: LabelReport,
  pub report: SeedReport,
}

/// Checks access, provisions labels, then creates one issue per document.
///
/// Only an unreachable repository is fatal.
pub async fn run<T: IssueTracker + ?Sized>(tracker: &T, config: &SeederConfig) -> Result<SeedOutcome> {
  let repository = tracker.repository().await?;
  info!("authenticated, repository: {}", repository.full_name);
  info!("issues enabled: {}", repository.has_issues);

  info!("setting up {} label(s)", config.labels.len());
  let labels = ensure_labels(tracker, &config.labels).await;

  info!("creating issues from {} document(s)", config.documents.len());
  let report = create_issues(tracker, config).await;

  Ok(SeedOutcome {
    repository,
    labels,
    report,
  })
}

pub async fn create_issues<T: IssueTracker + ?Sized>(tracker: &T, config: &SeederConfig) -> SeedReport {
  let mut report = SeedReport::default();

  for file_name in &config.documents {
    let path = config.document_path(file_name);

    if !path.exists() {
      warn!("file not found: {}", path.display());
      report.failed.push(FailedItem {
        title: file_name.clone(),
        reason: "File not found".into(),
      });
      continue;
    }

    let doc = match WorkItemDocument::load(&path) {
      Ok(doc) => doc,
      Err(e) => {
        warn!("could not read {}: {e}", path.display());
        report.failed.push(FailedItem {
          title: file_name.clone(),
          reason: format!("Unreadable: {e}"),
        });
        continue;
      }
    };

    info!("creating: {doc}");
    info!("  labels: {}", doc.labels.join(", "));

    let issue = NewIssue {
      title: doc.title.clone(),
      body: doc.body,
      labels: doc.labels,
    };

    match tracker.create_issue(&issue).await {
      Ok(remote) => {
        info!("  created: {remote}");
        report.created.push(CreatedItem {
          title: doc.title,
          url: remote.html_url,
          number: remote.number,
        });
      }
      Err(e) => {
        warn!("  failed: {e}");
        report.failed.push(FailedItem {
          title: doc.title,
          reason: format!("API error: {e}"),
        });
      }
    }
  }

  report
}

/// Parses every document without touching the network.
pub fn preview(config: &SeederConfig) -> Vec<(String, Result<WorkItemDocument>)> {
  config
    .documents
    .iter()
    .map(|file_name| {
      let doc = WorkItemDocument::load(&config.document_path(file_name));
      (file_name.clone(), doc)
    })
    .collect()
}

impl std::fmt::Display for SeedReport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "Created: {} issues", self.created.len())?;
    writeln!(f, "Failed:  {} issues", self.failed.len())?;

    if !self.created.is_empty() {
      writeln!(f)?;
      writeln!(f, "Created issues:")?;
      for item in &self.created {
        writeln!(f, "  #{}: {}", item.number, item.title)?;
        writeln!(f, "         {}", item.url)?;
      }
    }

    if !self.failed.is_empty() {
      writeln!(f)?;
      writeln!(f, "Failed issues:")?;
      for item in &self.failed {
        writeln!(f, "  - {}: {}", item.title, item.reason)?;
      }
    }

    Ok(())
  }
}
