use tracing::info;

use crate::config::ResolverConfig;
use crate::error::{ReleaseError, Result};
use crate::play::client::PublishingApi;
use crate::play::credentials::ServiceAccountKey;
use crate::play::session::EditSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
  Releases,
  NoReleases,
  /// The fetch failed; typically a track that has never been used.
  Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackVersionSample {
  pub track: String,
  pub max_version_code: Option<u64>,
  pub outcome: TrackOutcome,
}

impl TrackVersionSample {
  pub fn found(track: &str, max_version_code: u64) -> Self {
    Self {
      track: track.to_string(),
      max_version_code: Some(max_version_code),
      outcome: TrackOutcome::Releases,
    }
  }

  pub fn absent(track: &str, outcome: TrackOutcome) -> Self {
    Self {
      track: track.to_string(),
      max_version_code: None,
      outcome,
    }
  }

  /// Absent tracks count as 0.
  pub fn value(&self) -> u64 {
    self.max_version_code.unwrap_or(0)
  }
}

impl std::fmt::Display for TrackVersionSample {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match (&self.outcome, self.max_version_code) {
      (TrackOutcome::Skipped(reason), _) => write!(f, "Track '{}': skipped ({reason})", self.track),
      (_, Some(code)) => write!(f, "Track '{}': max version code = {code}", self.track),
      (_, None) => write!(f, "Track '{}': max version code = no releases", self.track),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResolution {
  pub package_name: String,
  pub samples: Vec<TrackVersionSample>,
  pub max_version_code: u64,
  pub next_version_code: u64,
}

impl VersionResolution {
  pub fn from_samples(package_name: &str, samples: Vec<TrackVersionSample>) -> Result<Self> {
    let max_version_code = reconcile(&samples);
    let next_version_code = max_version_code
      .checked_add(1)
      .ok_or(ReleaseError::VersionOverflow(max_version_code))?;

    Ok(Self {
      package_name: package_name.to_string(),
      samples,
      max_version_code,
      next_version_code,
    })
  }

  pub fn tracks_checked(&self) -> Vec<&str> {
    self.samples.iter().map(|s| s.track.as_str()).collect()
  }
}

impl std::fmt::Display for VersionResolution {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "Package: {}", self.package_name)?;
    writeln!(f, "Tracks checked: {}", self.tracks_checked().join(", "))?;
    writeln!(
      f,
      "Highest version code across all tracks: {}",
      self.max_version_code
    )?;
    write!(f, "Next version code: {}", self.next_version_code)
  }
}

/// Highest version code seen on any track; 0 when every track is absent.
pub fn reconcile(samples: &[TrackVersionSample]) -> u64 {
  samples.iter().map(TrackVersionSample::value).max().unwrap_or(0)
}

/// Fetches one track. Never fails: errors become a skipped sample.
pub fn sample_track<A: PublishingApi + ?Sized>(
  session: &EditSession<'_, A>,
  track: &str,
) -> TrackVersionSample {
  let sample = match session.track(track) {
    Ok(t) => match t.max_version_code() {
      Some(code) => TrackVersionSample::found(track, code),
      None => TrackVersionSample::absent(track, TrackOutcome::NoReleases),
    },
    Err(e) => TrackVersionSample::absent(track, TrackOutcome::Skipped(e.to_string())),
  };
  info!("{sample}");
  sample
}

/// Samples every track inside one edit and returns max + 1.
pub fn resolve<A: PublishingApi + ?Sized>(
  api: &A,
  package_name: &str,
  tracks: &[String],
) -> Result<VersionResolution> {
  let session = EditSession::open(api, package_name)?;

  let samples: Vec<TrackVersionSample> = tracks
    .iter()
    .map(|track| sample_track(&session, track))
    .collect();

  session.close()?;

  VersionResolution::from_samples(package_name, samples)
}

/// Loads credentials, connects, and resolves.
///
/// `connect` is only invoked once the credential file has been read, so a
/// missing file never reaches the network.
pub fn run<A, F>(config: &ResolverConfig, connect: F) -> Result<VersionResolution>
where
  A: PublishingApi,
  F: FnOnce(&ServiceAccountKey) -> Result<A>,
{
  let key = ServiceAccountKey::load(&config.credentials_file)?;
  let api = connect(&key)?;
  resolve(&api, &config.package_name, &config.tracks)
}
