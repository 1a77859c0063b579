//! GitHub hosting service implementation

use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::types::{BranchComparison, BranchRef, CommitInfo, MergeOutcome, ReleaseInfo, RepoId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

// REST response types

#[derive(Deserialize)]
struct BranchResponse {
    name: String,
    commit: CommitObject,
}

#[derive(Deserialize)]
struct CommitObject {
    sha: String,
}

#[derive(Deserialize)]
struct CompareResponse {
    ahead_by: u64,
    commits: Vec<CompareCommit>,
}

#[derive(Deserialize)]
struct CompareCommit {
    sha: String,
    commit: CompareCommitDetail,
}

#[derive(Deserialize)]
struct CompareCommitDetail {
    message: String,
}

#[derive(Deserialize)]
struct MergeResponse {
    sha: String,
}

#[derive(Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    html_url: String,
}

/// GitHub service using the REST API directly
///
/// The merge-relevant endpoints signal their outcome through status codes
/// (404 missing branch, 409 conflict, 204 nothing to merge), so each call
/// handles status explicitly rather than flattening everything into one
/// error type.
pub struct GitHubService {
    http_client: Client,
    token: String,
    /// Full API base, e.g. `https://api.github.com` or
    /// `https://ghe.example.com/api/v3`
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service.
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_base_url(token, api_base)
    }

    /// Create a service against an explicit API base URL.
    ///
    /// Primarily for tests pointing at a local mock server.
    pub fn with_base_url(token: &str, api_base: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("merge-sweep")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            token: token.to_string(),
            api_base: api_base.into(),
        })
    }

    fn headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    async fn error_body(response: Response) -> String {
        #[derive(Deserialize)]
        struct ApiError {
            message: String,
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<ApiError>(&body)
            .map_or_else(|_| format!("HTTP {status}"), |e| e.message)
    }
}

#[async_trait]
impl HostingService for GitHubService {
    async fn get_branch(&self, repo: &RepoId, branch: &str) -> Result<Option<BranchRef>> {
        debug!(%repo, branch, "looking up branch");
        let url = format!(
            "{}/repos/{}/{}/branches/{branch}",
            self.api_base, repo.owner, repo.name
        );

        let response = self.headers(self.http_client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%repo, branch, "branch not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to fetch branch '{branch}': {}",
                Self::error_body(response).await
            )));
        }

        let branch: BranchResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse branch: {e}")))?;

        Ok(Some(BranchRef {
            name: branch.name,
            sha: branch.commit.sha,
        }))
    }

    async fn compare(&self, repo: &RepoId, base: &str, head: &str) -> Result<BranchComparison> {
        debug!(%repo, base, head, "comparing branches");
        let url = format!(
            "{}/repos/{}/{}/compare/{base}...{head}",
            self.api_base, repo.owner, repo.name
        );

        let response = self.headers(self.http_client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to compare {base}...{head}: {}",
                Self::error_body(response).await
            )));
        }

        let compare: CompareResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse comparison: {e}")))?;

        debug!(%repo, ahead_by = compare.ahead_by, "compared branches");
        Ok(BranchComparison {
            ahead_by: compare.ahead_by,
            commits: compare
                .commits
                .into_iter()
                .map(|c| CommitInfo {
                    sha: c.sha,
                    message: c.commit.message,
                })
                .collect(),
        })
    }

    async fn merge(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        message: &str,
    ) -> Result<MergeOutcome> {
        debug!(%repo, base, head, "merging via API");
        let url = format!("{}/repos/{}/{}/merges", self.api_base, repo.owner, repo.name);

        let response = self
            .headers(self.http_client.post(&url))
            .json(&serde_json::json!({
                "base": base,
                "head": head,
                "commit_message": message,
            }))
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                let merge: MergeResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::GitHubApi(format!("Failed to parse merge result: {e}")))?;
                debug!(%repo, sha = %merge.sha, "merge complete");
                Ok(MergeOutcome {
                    sha: merge.sha,
                    message: message.to_string(),
                })
            }
            // 204: base already contains head
            StatusCode::NO_CONTENT => Err(Error::NothingToMerge(format!(
                "'{base}' already contains '{head}'"
            ))),
            StatusCode::CONFLICT => Err(Error::MergeConflict(format!(
                "merging '{head}' into '{base}' requires manual resolution"
            ))),
            _ => Err(Error::GitHubApi(format!(
                "Merge failed: {}",
                Self::error_body(response).await
            ))),
        }
    }

    async fn create_branch_ref(&self, repo: &RepoId, branch: &str, sha: &str) -> Result<()> {
        debug!(%repo, branch, sha, "creating branch ref");
        let url = format!(
            "{}/repos/{}/{}/git/refs",
            self.api_base, repo.owner, repo.name
        );

        let response = self
            .headers(self.http_client.post(&url))
            .json(&serde_json::json!({
                "ref": format!("refs/heads/{branch}"),
                "sha": sha,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to create branch '{branch}': {}",
                Self::error_body(response).await
            )));
        }
        debug!(%repo, branch, "created branch ref");
        Ok(())
    }

    async fn delete_branch_ref(&self, repo: &RepoId, branch: &str) -> Result<()> {
        debug!(%repo, branch, "deleting branch ref");
        let url = format!(
            "{}/repos/{}/{}/git/refs/heads/{branch}",
            self.api_base, repo.owner, repo.name
        );

        let response = self.headers(self.http_client.delete(&url)).send().await?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to delete branch '{branch}': {}",
                Self::error_body(response).await
            )));
        }
        debug!(%repo, branch, "deleted branch ref");
        Ok(())
    }

    async fn create_release(
        &self,
        repo: &RepoId,
        tag_name: &str,
        target: &str,
        body: &str,
    ) -> Result<ReleaseInfo> {
        debug!(%repo, tag_name, target, "creating release");
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.api_base, repo.owner, repo.name
        );

        let response = self
            .headers(self.http_client.post(&url))
            .json(&serde_json::json!({
                "tag_name": tag_name,
                "target_commitish": target,
                "name": tag_name,
                "body": body,
                "draft": false,
                "prerelease": false,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Failed to create release '{tag_name}': {}",
                Self::error_body(response).await
            )));
        }

        let release: ReleaseResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse release: {e}")))?;

        debug!(%repo, tag = %release.tag_name, "created release");
        Ok(ReleaseInfo {
            tag_name: release.tag_name,
            html_url: release.html_url,
        })
    }
}
