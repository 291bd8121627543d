/// Build metadata embedded at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildInfo {
    /// One `label: value` line per field, in display order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Version", self.version.to_string()),
            ("Commit", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built", self.timestamp.to_string()),
            ("Target", format!("{} [{}]", self.target, self.profile)),
            ("Compiler", self.rustc.to_string()),
        ]
    }
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("COMMUNITY_CORE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("COMMUNITY_CORE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("COMMUNITY_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("COMMUNITY_CORE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("COMMUNITY_CORE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("COMMUNITY_CORE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
