use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::error::{ReleaseError, Result};
use crate::github::issue::{NewIssue, RemoteIssue, RepositoryInfo};
use crate::github::label::LabelDefinition;

/// The issue-tracker operations the seeder consumes.
#[async_trait]
pub trait IssueTracker {
    async fn repository(&self) -> Result<RepositoryInfo>;

    async fn label_exists(&self, name: &str) -> Result<bool>;

    async fn create_label(&self, label: &LabelDefinition) -> Result<()>;

    async fn create_issue(&self, issue: &NewIssue) -> Result<RemoteIssue>;
}

pub struct GitHubClient {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(token: String, owner: &str, repo: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| ReleaseError::GitHub(format!("failed to build octocrab: {e}")))?;

        Ok(Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Reads the token from `var`, failing before any request is made.
    pub fn from_env(var: &str, owner: &str, repo: &str) -> Result<Self> {
        let token = std::env::var(var)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ReleaseError::MissingToken(var.to_string()))?;
        Self::new(token, owner, repo)
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn repository(&self) -> Result<RepositoryInfo> {
        info!("checking access to {}/{}", self.owner, self.repo);

        let repo = self.octocrab.repos(&self.owner, &self.repo).get().await?;

        Ok(RepositoryInfo {
            full_name: repo
                .full_name
                .unwrap_or_else(|| format!("{}/{}", self.owner, self.repo)),
            has_issues: repo.has_issues.unwrap_or(false),
        })
    }

    async fn label_exists(&self, name: &str) -> Result<bool> {
        // Any lookup failure counts as absent; creation reports the real error.
        match self
            .octocrab
            .issues(&self.owner, &self.repo)
            .get_label(name)
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!("label {name} lookup failed: {e}");
                Ok(false)
            }
        }
    }

    async fn create_label(&self, label: &LabelDefinition) -> Result<()> {
        info!("creating label {label}");

        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_label(&label.name, &label.color, &label.description)
            .await?;

        Ok(())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<RemoteIssue> {
        info!("creating issue: {}", issue.title);

        let created = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .send()
            .await?;

        info!("created issue #{}", created.number);
        Ok(RemoteIssue {
            number: created.number,
            html_url: created.html_url.to_string(),
        })
    }
}
