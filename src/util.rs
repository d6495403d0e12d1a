use serde::Serialize;

/// Build information embedded in check reports.
#[derive(Clone, Debug, Serialize)]
pub struct VersionInfo {
    ndtest_version: &'static str,
    git_desc: Option<&'static str>,
}

impl VersionInfo {
    pub fn new() -> Self {
        VersionInfo {
            ndtest_version: env!("CARGO_PKG_VERSION"),
            git_desc: option_env!("MAYBE_NDTEST_GIT_DESC"),
        }
    }

    /// Version string shown by the command-line interface.
    pub fn version_string(&self) -> &'static str {
        self.git_desc.unwrap_or(self.ndtest_version)
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub use self::test::*;
