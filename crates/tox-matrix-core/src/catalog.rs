//! Static lookup tables shared by every stage of matrix generation.
//!
//! The version catalog is ordered oldest to newest. Range resolution slices it,
//! so entries must only ever be appended or retired from the front.

/// Interpreter versions that jobs can be generated for, oldest first.
pub const KNOWN_PYTHONS: &[&str] = &["3.7", "3.8", "3.9", "3.10", "3.11", "3.12", "3.13-dev"];

/// User-facing versions that setup-python does not accept yet, mapped to the
/// identifier it does accept.
pub const PYTHON_REDIRECTS: &[(&str, &str)] = &[("3.13", "3.13-dev")];

/// A `max_python` equal to this value extends the range to the end of the
/// catalog, whatever is appended after it.
pub const DEVELOPMENT_MARKER: &str = "3.13";

pub const IMPLICIT_MIN_PYTHON: &str = "3.8";
pub const IMPLICIT_MAX_PYTHON: &str = "3.12";
pub const IMPLICIT_DEFAULT_PYTHON: &str = "3.9";

/// Applies [`PYTHON_REDIRECTS`]; unknown versions pass through untouched.
pub fn redirect(version: &str) -> &str {
    PYTHON_REDIRECTS
        .iter()
        .find(|(from, _)| *from == version)
        .map(|(_, to)| *to)
        .unwrap_or(version)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    #[default]
    Linux,
    Macos,
    Windows,
}

impl Platform {
    /// Known platforms in the order name inference scans them.
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::Macos, Platform::Windows];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Windows => "windows",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "linux" => Some(Platform::Linux),
            "macos" => Some(Platform::Macos),
            "windows" => Some(Platform::Windows),
            _ => None,
        }
    }

    /// Runner image the CI orchestrator schedules jobs for this platform on.
    pub fn runner(self) -> &'static str {
        match self {
            Platform::Linux => "ubuntu-24.04",
            Platform::Macos => "macos-13",
            Platform::Windows => "windows-latest",
        }
    }

    /// True for the platform whose job names carry no `-<platform>` suffix.
    pub fn is_implicit(self) -> bool {
        self == Platform::default()
    }
}

/// Runner for a raw platform string; strings outside the known set are used
/// verbatim as the runner label.
pub fn runner_for(platform: &str) -> &str {
    match Platform::parse(platform) {
        Some(p) => p.runner(),
        None => platform,
    }
}

/// How many versions of the resolved range a platform is tested against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every version in the range.
    #[default]
    Full,
    /// Only the first and last version in the range.
    MinMax,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Full => "full",
            Strategy::MinMax => "minmax",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "full" => Some(Strategy::Full),
            "minmax" => Some(Strategy::MinMax),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_defaults_are_catalog_members() {
        for v in [IMPLICIT_MIN_PYTHON, IMPLICIT_MAX_PYTHON, IMPLICIT_DEFAULT_PYTHON] {
            assert!(KNOWN_PYTHONS.contains(&v), "{v} missing from catalog");
        }
    }

    #[test]
    fn redirect_targets_exist_in_catalog() {
        for (from, to) in PYTHON_REDIRECTS {
            assert_eq!(redirect(from), *to);
            assert!(KNOWN_PYTHONS.contains(to), "{to} missing from catalog");
        }
        assert_eq!(redirect("3.11"), "3.11");
    }

    #[test]
    fn platform_names_round_trip() {
        for p in Platform::ALL {
            assert_eq!(Platform::parse(p.as_str()), Some(p));
        }
        assert_eq!(Platform::parse("freebsd"), None);
        assert!(Platform::Linux.is_implicit());
        assert!(!Platform::Windows.is_implicit());
    }

    #[test]
    fn unknown_platforms_pass_through_as_runner() {
        assert_eq!(runner_for("macos"), "macos-13");
        assert_eq!(runner_for("ubuntu-22.04-arm"), "ubuntu-22.04-arm");
    }

    #[test]
    fn strategy_parse_is_strict() {
        assert_eq!(Strategy::parse("minmax"), Some(Strategy::MinMax));
        assert_eq!(Strategy::parse(" full "), Some(Strategy::Full));
        assert_eq!(Strategy::parse("min-max"), None);
        assert_eq!(Strategy::default(), Strategy::Full);
    }
}
