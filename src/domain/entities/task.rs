//! Tasks: one action plus an optional compensating action

use std::path::PathBuf;

use super::command::CommandSpec;

/// What a task does. Either an external command or a filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Exec(CommandSpec),
    /// Copy a file. Without `overwrite` an existing target is left alone.
    Copy {
        from: PathBuf,
        to: PathBuf,
        overwrite: bool,
    },
    /// Move a file. Without `overwrite` an existing target is a failure.
    Rename {
        from: PathBuf,
        to: PathBuf,
        overwrite: bool,
    },
    /// Remove files or whole directories; missing paths are skipped.
    Remove(Vec<PathBuf>),
    /// Replace every occurrence of a placeholder.
    ReplaceInFile {
        path: PathBuf,
        from: String,
        to: String,
    },
    /// Replace whole lines that start with `prefix` and end with `suffix`.
    ReplaceLines {
        path: PathBuf,
        prefix: String,
        suffix: String,
        to: String,
    },
    WriteFile {
        path: PathBuf,
        contents: String,
        append: bool,
    },
    CreateDir(PathBuf),
    Touch(PathBuf),
    SetMode {
        path: PathBuf,
        mode: u32,
    },
}

impl Operation {
    pub fn copy(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Operation::Copy {
            from: from.into(),
            to: to.into(),
            overwrite: false,
        }
    }

    pub fn copy_overwrite(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Operation::Copy {
            from: from.into(),
            to: to.into(),
            overwrite: true,
        }
    }

    pub fn rename(from: impl Into<PathBuf>, to: impl Into<PathBuf>, overwrite: bool) -> Self {
        Operation::Rename {
            from: from.into(),
            to: to.into(),
            overwrite,
        }
    }

    pub fn remove(path: impl Into<PathBuf>) -> Self {
        Operation::Remove(vec![path.into()])
    }

    pub fn replace(path: impl Into<PathBuf>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Operation::ReplaceInFile {
            path: path.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn append(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Operation::WriteFile {
            path: path.into(),
            contents: contents.into(),
            append: true,
        }
    }

    /// One-line description for logs. File contents are never included.
    pub fn describe(&self) -> String {
        match self {
            Operation::Exec(spec) => spec.display(),
            Operation::Copy { from, to, .. } => {
                format!("copy {} -> {}", from.display(), to.display())
            }
            Operation::Rename { from, to, .. } => {
                format!("rename {} -> {}", from.display(), to.display())
            }
            Operation::Remove(paths) => match paths.as_slice() {
                [single] => format!("remove {}", single.display()),
                many => format!("remove {} paths", many.len()),
            },
            Operation::ReplaceInFile { path, from, .. } => {
                format!("replace '{}' in {}", from, path.display())
            }
            Operation::ReplaceLines { path, prefix, .. } => {
                format!("rewrite '{}' lines in {}", prefix, path.display())
            }
            Operation::WriteFile { path, append, .. } => {
                let verb = if *append { "append to" } else { "write" };
                format!("{} {}", verb, path.display())
            }
            Operation::CreateDir(path) => format!("mkdir {}", path.display()),
            Operation::Touch(path) => format!("touch {}", path.display()),
            Operation::SetMode { path, mode } => format!("chmod {:o} {}", mode, path.display()),
        }
    }
}

impl From<CommandSpec> for Operation {
    fn from(spec: CommandSpec) -> Self {
        Operation::Exec(spec)
    }
}

/// A unit of a `TaskSequence`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    label: String,
    action: Operation,
    rollback: Option<Operation>,
    allow_failure: bool,
}

impl Task {
    pub fn new(label: impl Into<String>, action: impl Into<Operation>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            rollback: None,
            allow_failure: false,
        }
    }

    /// Task labelled with its own command line.
    pub fn exec(spec: CommandSpec) -> Self {
        Self::new(spec.display(), spec)
    }

    pub fn with_rollback(mut self, rollback: impl Into<Operation>) -> Self {
        self.rollback = Some(rollback.into());
        self
    }

    /// A failure of this task is logged and the sequence carries on.
    pub fn allow_failure(mut self) -> Self {
        self.allow_failure = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> &Operation {
        &self.action
    }

    pub fn rollback(&self) -> Option<&Operation> {
        self.rollback.as_ref()
    }

    pub fn allows_failure(&self) -> bool {
        self.allow_failure
    }
}
