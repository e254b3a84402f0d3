use serde::{Deserialize, Deserializer};

/// Response of `edits.tracks.get`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
  #[serde(default)]
  pub track: String,
  #[serde(default)]
  pub releases: Vec<Release>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default, deserialize_with = "version_codes")]
  pub version_codes: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppEdit {
  pub id: String,
}

impl Track {
  /// Highest version code across all releases, `None` if there are none.
  pub fn max_version_code(&self) -> Option<u64> {
    self
      .releases
      .iter()
      .flat_map(|r| r.version_codes.iter().copied())
      .max()
  }
}

// int64 fields arrive as JSON strings
fn version_codes<'de, D>(deserializer: D) -> std::result::Result<Vec<u64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Code {
    Num(u64),
    Str(String),
  }

  let raw: Option<Vec<Code>> = Option::deserialize(deserializer)?;
  raw
    .unwrap_or_default()
    .into_iter()
    .map(|c| match c {
      Code::Num(n) => Ok(n),
      Code::Str(s) => s
        .trim()
        .parse::<u64>()
        .map_err(|e| serde::de::Error::custom(format!("invalid version code {s:?}: {e}"))),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_track_with_string_codes() {
    let json = r#"{
      "track": "beta",
      "releases": [
        {"name": "1.4", "versionCodes": ["14", "15"], "status": "completed"},
        {"name": "1.3", "versionCodes": ["13"], "status": "inProgress"}
      ]
    }"#;
    let track: Track = serde_json::from_str(json).unwrap();
    assert_eq!(track.releases.len(), 2);
    assert_eq!(track.max_version_code(), Some(15));
  }

  #[test]
  fn test_track_with_numeric_codes() {
    let json = r#"{"track": "internal", "releases": [{"versionCodes": [7, 12]}]}"#;
    let track: Track = serde_json::from_str(json).unwrap();
    assert_eq!(track.max_version_code(), Some(12));
  }

  #[test]
  fn test_track_without_releases() {
    let track: Track = serde_json::from_str(r#"{"track": "alpha"}"#).unwrap();
    assert_eq!(track.max_version_code(), None);

    let json = r#"{"track": "alpha", "releases": [{"name": "draft"}]}"#;
    let track: Track = serde_json::from_str(json).unwrap();
    assert_eq!(track.max_version_code(), None);
  }

  #[test]
  fn test_invalid_version_code() {
    let json = r#"{"releases": [{"versionCodes": ["abc"]}]}"#;
    assert!(serde_json::from_str::<Track>(json).is_err());
  }
}
