//! Deployment request and resolved plan
//!
//! `DeployRequest` is raw user input. `ResolvedDeployPlan::resolve` validates
//! it once and derives every field the pipeline needs; the plan is never
//! mutated afterwards.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::error::{BallastError, BallastResult};

/// Remote name used when `site_alias_name` is not configured.
pub const DEFAULT_REMOTE_NAME: &str = "deploy";

/// Suffix of the local branch that tracks the remote branch.
pub const DEPLOY_BRANCH_SUFFIX: &str = "-deploy";

/// Number of characters kept from a CI commit id.
pub const BUILD_ID_LEN: usize = 7;

/// Deployment options as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployRequest {
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub commit_msg: Option<String>,
    pub remote_branch: Option<String>,
    pub remote: Option<String>,
    pub build_id: Option<String>,
}

impl DeployRequest {
    /// Fill unset options from CI environment variables.
    ///
    /// `DEPLOY_TARGET` provides the remote, `CI_BRANCH` the branch and
    /// `CI_COMMIT_ID` (first seven characters) the build id.
    pub fn with_env_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        self.remote = non_empty(self.remote).or_else(|| env("DEPLOY_TARGET"));
        self.branch = non_empty(self.branch).or_else(|| env("CI_BRANCH"));
        self.build_id = non_empty(self.build_id)
            .or_else(|| env("CI_COMMIT_ID").map(|id| id.chars().take(BUILD_ID_LEN).collect()));
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Which kind of deployment to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployMode {
    /// Tag deploy when a tag was supplied, branch deploy otherwise
    #[default]
    Auto,
    Branch,
    /// Always tag; a tag name is synthesised when none is supplied
    Tag,
}

/// Every field the pipeline needs, validated and derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeployPlan {
    remote_url: String,
    remote_name: String,
    branch: String,
    remote_branch: String,
    deploy_branch: String,
    tag: Option<String>,
    commit_msg: String,
    build_id: Option<String>,
}

impl ResolvedDeployPlan {
    /// Validate `request` and derive the plan.
    ///
    /// Fails before any side effect when the remote or the branch is missing.
    pub fn resolve(
        request: &DeployRequest,
        mode: DeployMode,
        settings: &Settings,
        now: DateTime<Utc>,
    ) -> BallastResult<Self> {
        let remote_url = non_empty(request.remote.clone()).ok_or_else(|| {
            BallastError::Validation(
                "A deploy remote is required: pass --remote or set DEPLOY_TARGET.".to_string(),
            )
        })?;
        let branch = non_empty(request.branch.clone()).ok_or_else(|| {
            BallastError::Validation(
                "A branch must be specified: pass --branch or set CI_BRANCH.".to_string(),
            )
        })?;

        let build_id = non_empty(request.build_id.clone());
        let remote_branch = non_empty(request.remote_branch.clone()).unwrap_or_else(|| branch.clone());
        let deploy_branch = Self::deploy_branch_for(&remote_branch);

        let requested_tag = non_empty(request.tag.clone());
        let tag = match mode {
            DeployMode::Branch => None,
            DeployMode::Auto => requested_tag,
            DeployMode::Tag => Some(requested_tag.unwrap_or_else(|| {
                Self::synthesize_tag(&branch, build_id.as_deref(), now.timestamp())
            })),
        };

        let commit_msg = non_empty(request.commit_msg.clone()).unwrap_or_else(|| {
            Self::default_commit_message(settings.get("site_shortname"), build_id.as_deref())
        });

        let remote_name = settings
            .get("site_alias_name")
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_REMOTE_NAME)
            .to_string();

        Ok(Self {
            remote_url,
            remote_name,
            branch,
            remote_branch,
            deploy_branch,
            tag,
            commit_msg,
            build_id,
        })
    }

    pub fn deploy_branch_for(remote_branch: &str) -> String {
        format!("{remote_branch}{DEPLOY_BRANCH_SUFFIX}")
    }

    /// `{branch}-{build_id}`, or `{branch}-{unix timestamp}` without a build id.
    pub fn synthesize_tag(branch: &str, build_id: Option<&str>, timestamp: i64) -> String {
        match build_id.filter(|id| !id.is_empty()) {
            Some(id) => format!("{branch}-{id}"),
            None => format!("{branch}-{timestamp}"),
        }
    }

    pub fn default_commit_message(site_shortname: Option<&str>, build_id: Option<&str>) -> String {
        let mut message = format!("Deployment built for {}", site_shortname.unwrap_or_default());
        if let Some(id) = build_id.filter(|id| !id.is_empty()) {
            message.push_str(&format!(" Build ID: {id}"));
        }
        message
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn remote_branch(&self) -> &str {
        &self.remote_branch
    }

    pub fn deploy_branch(&self) -> &str {
        &self.deploy_branch
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn commit_msg(&self) -> &str {
        &self.commit_msg
    }

    pub fn build_id(&self) -> Option<&str> {
        self.build_id.as_deref()
    }

    /// `remote_name/remote_branch`
    pub fn tracking_ref(&self) -> String {
        format!("{}/{}", self.remote_name, self.remote_branch)
    }

    /// `deploy_branch:remote_branch`
    pub fn push_refspec(&self) -> String {
        format!("{}:{}", self.deploy_branch, self.remote_branch)
    }

    pub fn merge_message(&self) -> String {
        format!("Merge to remote: {}", self.commit_msg)
    }

    pub fn is_tag_deploy(&self) -> bool {
        self.tag.is_some()
    }
}

/// Commit identity and SSH material for the deploy remote.
#[derive(Clone, PartialEq, Eq)]
pub struct DeployCredentials {
    pub git_name: String,
    pub git_email: String,
    known_host: Option<String>,
    private_key: Option<String>,
}

impl DeployCredentials {
    pub const DEFAULT_NAME: &'static str = "Deployment";
    pub const DEFAULT_EMAIL: &'static str = "deploy@example.com";

    pub fn new(known_host: Option<String>, private_key: Option<String>) -> Self {
        Self {
            git_name: Self::DEFAULT_NAME.to_string(),
            git_email: Self::DEFAULT_EMAIL.to_string(),
            known_host: non_empty(known_host),
            private_key: non_empty(private_key),
        }
    }

    /// `GIT_NAME`, `GIT_EMAIL`, `GIT_KNOWN_HOST`, `SSH_PRIVATE_KEY`
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut credentials = Self::new(env("GIT_KNOWN_HOST"), env("SSH_PRIVATE_KEY"));
        if let Some(name) = env("GIT_NAME") {
            credentials.git_name = name;
        }
        if let Some(email) = env("GIT_EMAIL") {
            credentials.git_email = email;
        }
        credentials
    }

    /// The host key line and the private key, or a validation error.
    pub fn ssh_material(&self) -> BallastResult<(&str, &str)> {
        let host = self.known_host.as_deref().ok_or_else(|| {
            BallastError::Validation(
                "A git host server key must be configured in GIT_KNOWN_HOST.".to_string(),
            )
        })?;
        let key = self.private_key.as_deref().ok_or_else(|| {
            BallastError::Validation(
                "An ssh key must be configured in SSH_PRIVATE_KEY.".to_string(),
            )
        })?;
        Ok((host, key))
    }

    /// Private key with literal `\n` separators expanded, newline terminated.
    pub fn expanded_private_key(&self) -> Option<String> {
        self.private_key.as_deref().map(|key| {
            let mut expanded = key.replace("\\n", "\n");
            if !expanded.ends_with('\n') {
                expanded.push('\n');
            }
            expanded
        })
    }
}

impl fmt::Debug for DeployCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployCredentials")
            .field("git_name", &self.git_name)
            .field("git_email", &self.git_email)
            .field("known_host", &self.known_host.as_ref().map(|_| "<set>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
