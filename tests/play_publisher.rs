use std::path::PathBuf;

use release_tools::config::ResolverConfig;
use release_tools::error::ReleaseError;
use release_tools::pipeline::resolve::{self, TrackOutcome, VersionResolution};
use release_tools::play::PlayPublisher;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PACKAGE: &str = "cat.company.qrreader";
const EDITS: &str = "/androidpublisher/v3/applications/cat.company.qrreader/edits";
const TEST_KEY: &str = include_str!("fixtures/test-key.pem");

fn write_credentials(dir: &TempDir, server: &MockServer) -> PathBuf {
  let key = serde_json::json!({
    "type": "service_account",
    "project_id": "qr-reader",
    "private_key_id": "test-key-id",
    "private_key": TEST_KEY,
    "client_email": "ci@qr-reader.iam.gserviceaccount.com",
    "token_uri": format!("{}/token", server.uri()),
  });
  let path = dir.path().join("service-account.json");
  std::fs::write(&path, key.to_string()).unwrap();
  path
}

fn resolver_config(credentials_file: PathBuf, server: &MockServer) -> ResolverConfig {
  ResolverConfig {
    package_name: PACKAGE.into(),
    credentials_file,
    api_base: server.uri(),
    ..Default::default()
  }
}

async fn mount_token(server: &MockServer) {
  Mock::given(method("POST"))
    .and(path("/token"))
    .and(body_string_contains(
      "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
    ))
    .and(body_string_contains("assertion="))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "access_token": "test-token",
      "expires_in": 3599,
      "token_type": "Bearer",
    })))
    .expect(1)
    .mount(server)
    .await;
}

async fn mount_edit(server: &MockServer) {
  Mock::given(method("POST"))
    .and(path(EDITS))
    .and(header("authorization", "Bearer test-token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "id": "edit-42",
      "expiryTimeSeconds": "1760000000",
    })))
    .expect(1)
    .mount(server)
    .await;
}

async fn mount_track(server: &MockServer, track: &str, codes: &[&str]) {
  Mock::given(method("GET"))
    .and(path(format!("{EDITS}/edit-42/tracks/{track}")))
    .and(header("authorization", "Bearer test-token"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "track": track,
      "releases": [{"name": "release", "versionCodes": codes, "status": "completed"}],
    })))
    .mount(server)
    .await;
}

async fn mount_missing_track(server: &MockServer, track: &str) {
  Mock::given(method("GET"))
    .and(path(format!("{EDITS}/edit-42/tracks/{track}")))
    .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
      "error": {"code": 404, "message": "Track not found.", "status": "NOT_FOUND"},
    })))
    .mount(server)
    .await;
}

async fn mount_delete(server: &MockServer, status: u16) {
  Mock::given(method("DELETE"))
    .and(path(format!("{EDITS}/edit-42")))
    .and(header("authorization", "Bearer test-token"))
    .respond_with(ResponseTemplate::new(status))
    .expect(1)
    .mount(server)
    .await;
}

async fn run_resolver(config: ResolverConfig) -> Result<VersionResolution, ReleaseError> {
  tokio::task::spawn_blocking(move || {
    resolve::run(&config, |key| PlayPublisher::connect(key, &config.api_base))
  })
  .await
  .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn resolves_max_across_all_tracks() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_token(&server).await;
  mount_edit(&server).await;
  mount_track(&server, "internal", &["11", "12"]).await;
  mount_missing_track(&server, "alpha").await;
  mount_track(&server, "beta", &["15"]).await;
  mount_track(&server, "production", &["10"]).await;
  mount_delete(&server, 204).await;

  let config = resolver_config(write_credentials(&dir, &server), &server);
  let resolution = run_resolver(config).await.unwrap();

  assert_eq!(resolution.max_version_code, 15);
  assert_eq!(resolution.next_version_code, 16);
  assert_eq!(
    resolution.tracks_checked(),
    vec!["internal", "alpha", "beta", "production"]
  );
  assert!(matches!(
    resolution.samples[1].outcome,
    TrackOutcome::Skipped(_)
  ));
}

#[tokio::test(flavor = "multi_thread")]
async fn all_tracks_missing_yields_one() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_token(&server).await;
  mount_edit(&server).await;
  for track in ["internal", "alpha", "beta", "production"] {
    mount_missing_track(&server, track).await;
  }
  mount_delete(&server, 204).await;

  let config = resolver_config(write_credentials(&dir, &server), &server);
  let resolution = run_resolver(config).await.unwrap();

  assert_eq!(resolution.max_version_code, 0);
  assert_eq!(resolution.next_version_code, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_is_reported() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_token(&server).await;
  mount_edit(&server).await;
  mount_track(&server, "internal", &["3"]).await;
  mount_track(&server, "alpha", &["4"]).await;
  mount_track(&server, "beta", &["5"]).await;
  mount_track(&server, "production", &["2"]).await;
  mount_delete(&server, 500).await;

  let config = resolver_config(write_credentials(&dir, &server), &server);
  let err = run_resolver(config).await.unwrap_err();

  assert!(matches!(err, ReleaseError::Publisher { status: 500, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_stops_before_opening_an_edit() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  Mock::given(method("POST"))
    .and(path("/token"))
    .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error": "invalid_grant"}"#))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path(EDITS))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;

  let config = resolver_config(write_credentials(&dir, &server), &server);
  let err = run_resolver(config).await.unwrap_err();

  assert!(matches!(err, ReleaseError::Publisher { status: 400, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_credentials_make_no_requests() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();

  let config = resolver_config(dir.path().join("service-account.json"), &server);
  let err = run_resolver(config).await.unwrap_err();

  assert!(matches!(err, ReleaseError::CredentialsNotFound(_)));
  let requests = server.received_requests().await.unwrap();
  assert!(requests.is_empty());
}
