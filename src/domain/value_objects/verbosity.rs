/// How much of the external tools' output the user asked to see.
///
/// Ordered: a command echoes its output only when the session verbosity is at
/// least the command's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Map the `-v` count of the CLI.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    pub fn allows(self, threshold: Verbosity) -> bool {
        self >= threshold
    }
}
