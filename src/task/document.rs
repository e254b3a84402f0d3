use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const TITLE_MARKER: &str = "# ";
const LABELS_MARKER: &str = "**Labels:**";
const LABELS_SCAN_LINES: usize = 10;

/// A work item parsed from a local markdown template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemDocument {
  pub title: String,
  pub labels: Vec<String>,
  pub body: String,
}

impl WorkItemDocument {
  pub fn parse(content: &str) -> Self {
    let mut lines = content.split('\n');

    let title = lines
      .next()
      .unwrap_or_default()
      .replace(TITLE_MARKER, "")
      .trim()
      .to_string();

    let labels = content
      .split('\n')
      .take(LABELS_SCAN_LINES)
      .find_map(|line| line.strip_prefix(LABELS_MARKER))
      .map(backtick_tokens)
      .unwrap_or_default();

    Self {
      title,
      labels,
      body: content.to_string(),
    }
  }

  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Ok(Self::parse(&content))
  }
}

impl std::fmt::Display for WorkItemDocument {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.title)
  }
}

/// Extracts every non-empty `` `token` `` in order of appearance.
fn backtick_tokens(text: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut rest = text;

  while let Some(start) = rest.find('`') {
    let after = &rest[start + 1..];
    let Some(end) = after.find('`') else {
      break;
    };
    let token = &after[..end];
    if token.is_empty() {
      // "``" is not a token; the second backtick may open the next one
      rest = after;
      continue;
    }
    tokens.push(token.to_string());
    rest = &after[end + 1..];
  }

  tokens
}
