use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, Result};
use crate::github::label::LabelDefinition;

pub const DEFAULT_CONFIG_FILE: &str = "release-tools.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seeder: SeederConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeederConfig {
    #[serde(default = "default_github_repo")]
    pub github: String,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_issues_dir")]
    pub issues_dir: PathBuf,
    #[serde(default = "default_documents")]
    pub documents: Vec<String>,
    #[serde(default = "default_labels")]
    pub labels: Vec<LabelDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_package_name")]
    pub package_name: String,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    #[serde(default = "default_tracks")]
    pub tracks: Vec<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            github: default_github_repo(),
            token_env: default_token_env(),
            issues_dir: default_issues_dir(),
            documents: default_documents(),
            labels: default_labels(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            credentials_file: default_credentials_file(),
            tracks: default_tracks(),
            api_base: default_api_base(),
        }
    }
}

fn default_github_repo() -> String {
    "carlescs/QrReader".to_string()
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}
fn default_issues_dir() -> PathBuf {
    PathBuf::from(".github/ISSUES/tag-suggestions")
}
fn default_documents() -> Vec<String> {
    [
        "PBI-01-dependencies.md",
        "PBI-02-gemini-service.md",
        "PBI-03-domain-models.md",
        "PBI-04-use-cases.md",
        "PBI-05-repository-impl.md",
        "PBI-06-camera-integration.md",
        "PBI-07-creator-integration.md",
        "PBI-08-settings-toggle.md",
        "PBI-09-unit-tests.md",
        "PBI-10-ui-tests.md",
        "PBI-11-documentation.md",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_labels() -> Vec<LabelDefinition> {
    [
        ("enhancement", "a2eeef", "New feature or request"),
        ("dependencies", "0366d6", "Pull requests that update a dependency file"),
        ("setup", "d4c5f9", "Initial setup and configuration"),
        ("core", "d93f0b", "Core functionality"),
        ("ml", "e99695", "Machine learning related"),
        ("domain", "0e8a16", "Domain layer changes"),
        ("architecture", "1d76db", "Architecture-related changes"),
        ("use-case", "5319e7", "Use case implementations"),
        ("data", "fbca04", "Data layer changes"),
        ("repository", "c5def5", "Repository implementations"),
        ("ui", "d876e3", "User interface changes"),
        ("feature", "0052cc", "New feature"),
        ("camera", "bfdadc", "Camera feature"),
        ("code-creator", "c2e0c6", "Code creator feature"),
        ("settings", "f9d0c4", "Settings feature"),
        ("testing", "fef2c0", "Testing related"),
        ("quality", "d4c5f9", "Code quality"),
        ("unit-tests", "e4e669", "Unit testing"),
        ("instrumentation", "c5def5", "Instrumentation testing"),
        ("documentation", "0075ca", "Documentation updates"),
    ]
    .iter()
    .map(|(name, color, description)| LabelDefinition::new(*name, *color, *description))
    .collect()
}
fn default_package_name() -> String {
    "cat.company.qrreader".to_string()
}
fn default_credentials_file() -> PathBuf {
    PathBuf::from("service-account.json")
}
fn default_tracks() -> Vec<String> {
    vec![
        "internal".into(),
        "alpha".into(),
        "beta".into(),
        "production".into(),
    ]
}
fn default_api_base() -> String {
    "https://androidpublisher.googleapis.com".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReleaseError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given; otherwise the default file if present, else built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.seeder.documents.is_empty() {
            return Err(ReleaseError::Config("no documents configured".into()));
        }
        match self.seeder.github.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {}
            _ => {
                return Err(ReleaseError::Config(format!(
                    "github must be in owner/repo format: {}",
                    self.seeder.github
                )))
            }
        }
        if self.resolver.tracks.is_empty() {
            return Err(ReleaseError::Config("no tracks configured".into()));
        }
        if self.resolver.package_name.trim().is_empty() {
            return Err(ReleaseError::Config("package_name must not be empty".into()));
        }
        Ok(())
    }
}

impl SeederConfig {
    pub fn owner_repo(&self) -> (&str, &str) {
        self.github.split_once('/').unwrap_or((self.github.as_str(), ""))
    }

    pub fn document_path(&self, file_name: &str) -> PathBuf {
        self.issues_dir.join(file_name)
    }

    pub fn issues_url(&self) -> String {
        format!("https://github.com/{}/issues", self.github)
    }
}
