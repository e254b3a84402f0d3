use tracing::{debug, info, warn};

use crate::github::client::IssueTracker;
use crate::github::label::LabelDefinition;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelReport {
  pub ready: Vec<String>,
  pub failed: Vec<(String, String)>,
}

/// Creates every catalog label that does not exist yet.
///
/// Existing labels are left untouched even if color or description differ.
/// A failure is recorded and the next label is attempted.
pub async fn ensure_labels<T: IssueTracker + ?Sized>(
  tracker: &T,
  catalog: &[LabelDefinition],
) -> LabelReport {
  let mut report = LabelReport::default();

  for label in catalog {
    let exists = match tracker.label_exists(&label.name).await {
      Ok(exists) => exists,
      Err(e) => {
        debug!("could not look up label '{}': {e}", label.name);
        false
      }
    };

    if exists {
      info!("label '{}' ready", label.name);
      report.ready.push(label.name.clone());
      continue;
    }

    match tracker.create_label(label).await {
      Ok(()) => {
        info!("label '{}' ready", label.name);
        report.ready.push(label.name.clone());
      }
      Err(e) => {
        warn!("could not create label '{}': {e}", label.name);
        report.failed.push((label.name.clone(), e.to_string()));
      }
    }
  }

  report
}
