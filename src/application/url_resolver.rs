use crate::config::Config;

/// Builds raw-content URLs for repository-relative paths.
///
/// Paths are appended verbatim: no validation, no escaping.
#[derive(Debug, Clone)]
pub struct RawUrlResolver {
    base: String,
}

impl RawUrlResolver {
    pub fn new(raw_base_url: &str, owner: &str, repo: &str, branch: &str) -> Self {
        Self {
            base: format!(
                "{}/{}/{}/{}/",
                raw_base_url.trim_end_matches('/'),
                owner,
                repo,
                branch
            ),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.raw_base_url, &config.owner, &config.repo, &config.branch)
    }

    /// Everything before the path, ending in `/`
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}
