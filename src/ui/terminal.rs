//! What the attached terminal can display

use is_terminal::IsTerminal;

/// Variables set by the CI services Ballast deploys from.
const CI_MARKERS: &[&str] = &[
    "CI",
    "CI_BRANCH",
    "CI_NAME",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "CIRCLECI",
    "JENKINS_URL",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub stdin_is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self::from_env(
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
            std::io::stdin().is_terminal(),
        )
    }

    pub(crate) fn from_env(
        var: impl Fn(&str) -> Option<String>,
        is_tty: bool,
        stdin_is_tty: bool,
    ) -> Self {
        let dumb = var("TERM").is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
        Self {
            is_tty,
            stdin_is_tty,
            supports_color: is_tty && !dumb && var("NO_COLOR").is_none(),
            supports_unicode: !dumb && !ascii_locale(&var),
            is_ci: CI_MARKERS.iter().any(|key| var(key).is_some()),
        }
    }
}

/// The effective locale is the first non-empty of `LC_ALL`, `LC_CTYPE` and
/// `LANG`. `C`, `POSIX` and any non UTF-8 codeset draw ASCII.
fn ascii_locale(var: &impl Fn(&str) -> Option<String>) -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| var(key).filter(|v| !v.is_empty()))
        .is_some_and(|locale| match locale.split_once('.') {
            Some((_, codeset)) => {
                let codeset = codeset.to_ascii_lowercase();
                !(codeset.starts_with("utf-8") || codeset.starts_with("utf8"))
            }
            None => locale.eq_ignore_ascii_case("c") || locale.eq_ignore_ascii_case("posix"),
        })
}
