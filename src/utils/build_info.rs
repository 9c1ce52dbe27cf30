/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    /// One-line summary used by `--version`.
    pub fn summary(&self) -> String {
        format!(
            "{} ({} {}, built {})",
            self.version, self.git_hash, self.profile, self.timestamp
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("MONTH_STATUS_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("MONTH_STATUS_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("MONTH_STATUS_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn summary_starts_with_package_version() {
        let summary = super::current().summary();
        assert!(summary.starts_with(env!("CARGO_PKG_VERSION")));
    }
}
