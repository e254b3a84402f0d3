use serde::{Deserialize, Serialize};

/// Payload for a new issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
  pub title: String,
  pub body: String,
  pub labels: Vec<String>,
}

/// An issue as returned by the tracker after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
  pub number: u64,
  pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
  pub full_name: String,
  pub has_issues: bool,
}

impl std::fmt::Display for RemoteIssue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{} {}", self.number, self.html_url)
  }
}
