use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ReleaseError, Result};
use crate::play::credentials::{ServiceAccountKey, ANDROID_PUBLISHER_SCOPE};
use crate::play::track::{AppEdit, Track};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The publishing-platform operations the version resolver consumes.
///
/// Reads are scoped through an edit even though nothing is ever committed.
pub trait PublishingApi {
  fn insert_edit(&self, package_name: &str) -> Result<String>;

  fn get_track(&self, package_name: &str, edit_id: &str, track: &str) -> Result<Track>;

  fn delete_edit(&self, package_name: &str, edit_id: &str) -> Result<()>;
}

impl<T: PublishingApi + ?Sized> PublishingApi for &T {
  fn insert_edit(&self, package_name: &str) -> Result<String> {
    (**self).insert_edit(package_name)
  }

  fn get_track(&self, package_name: &str, edit_id: &str, track: &str) -> Result<Track> {
    (**self).get_track(package_name, edit_id, track)
  }

  fn delete_edit(&self, package_name: &str, edit_id: &str) -> Result<()> {
    (**self).delete_edit(package_name, edit_id)
  }
}

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
}

/// Google Play Developer API v3 over blocking HTTP.
pub struct PlayPublisher {
  http: Client,
  api_base: String,
  access_token: String,
}

impl PlayPublisher {
  /// Exchanges a signed assertion for an access token.
  pub fn connect(key: &ServiceAccountKey, api_base: &str) -> Result<Self> {
    let http = Client::builder()
      .user_agent(concat!("release-tools/", env!("CARGO_PKG_VERSION")))
      .build()?;

    info!("requesting access token for {}", key.client_email);
    let assertion = key.assertion(ANDROID_PUBLISHER_SCOPE)?;

    let response = http
      .post(&key.token_uri)
      .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
      .send()?;
    let token: TokenResponse = check(response)?.json()?;

    Ok(Self {
      http,
      api_base: api_base.trim_end_matches('/').to_string(),
      access_token: token.access_token,
    })
  }

  fn edits_url(&self, package_name: &str) -> String {
    format!(
      "{}/androidpublisher/v3/applications/{package_name}/edits",
      self.api_base
    )
  }
}

impl PublishingApi for PlayPublisher {
  fn insert_edit(&self, package_name: &str) -> Result<String> {
    let response = self
      .http
      .post(self.edits_url(package_name))
      .bearer_auth(&self.access_token)
      .json(&serde_json::json!({}))
      .send()?;
    let edit: AppEdit = check(response)?.json()?;

    debug!("opened edit {} for {package_name}", edit.id);
    Ok(edit.id)
  }

  fn get_track(&self, package_name: &str, edit_id: &str, track: &str) -> Result<Track> {
    let url = format!("{}/{edit_id}/tracks/{track}", self.edits_url(package_name));
    let response = self
      .http
      .get(url)
      .bearer_auth(&self.access_token)
      .send()?;

    Ok(check(response)?.json()?)
  }

  fn delete_edit(&self, package_name: &str, edit_id: &str) -> Result<()> {
    let url = format!("{}/{edit_id}", self.edits_url(package_name));
    let response = self
      .http
      .delete(url)
      .bearer_auth(&self.access_token)
      .send()?;
    check(response)?;

    debug!("deleted edit {edit_id} for {package_name}");
    Ok(())
  }
}

fn check(response: Response) -> Result<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }
  let body = response.text().unwrap_or_default();
  Err(ReleaseError::Publisher {
    status: status.as_u16(),
    body,
  })
}
