use std::fmt;

/// The ordered stages of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeployStage {
    Validate,
    VersionControl,
    Dependencies,
    Sanitize,
    Commit,
    Merge,
    Push,
}

impl DeployStage {
    pub const ALL: [DeployStage; 7] = [
        DeployStage::Validate,
        DeployStage::VersionControl,
        DeployStage::Dependencies,
        DeployStage::Sanitize,
        DeployStage::Commit,
        DeployStage::Merge,
        DeployStage::Push,
    ];

    /// 1-based position in the pipeline
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Stable identifier used in JSON events
    pub fn key(self) -> &'static str {
        match self {
            DeployStage::Validate => "validate",
            DeployStage::VersionControl => "version_control",
            DeployStage::Dependencies => "dependencies",
            DeployStage::Sanitize => "sanitize",
            DeployStage::Commit => "commit",
            DeployStage::Merge => "merge",
            DeployStage::Push => "push",
        }
    }
}

impl fmt::Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeployStage::Validate => "validate options",
            DeployStage::VersionControl => "configure version control",
            DeployStage::Dependencies => "wait for build dependencies",
            DeployStage::Sanitize => "sanitize artifact",
            DeployStage::Commit => "commit build",
            DeployStage::Merge => "merge into deploy branch",
            DeployStage::Push => "push",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_numbered_in_order() {
        let numbers: Vec<usize> = DeployStage::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(DeployStage::VersionControl.key(), "version_control");
        assert_eq!(DeployStage::Push.to_string(), "push");
    }
}
