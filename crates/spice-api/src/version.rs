//! CLI build version reporting.

/// Version marker reported by development builds.
pub const DEV_VERSION: &str = "local-dev";

/// Returns the build version of the CLI.
///
/// Release pipelines inject `SPICE_VERSION` at compile time; builds
/// without it report [`DEV_VERSION`].
#[must_use]
pub fn version() -> &'static str {
    option_env!("SPICE_VERSION").unwrap_or(DEV_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_non_empty() {
        assert!(!version().is_empty());
    }
}
