//! Host task executor
//!
//! Runs `Exec` operations through a `CommandRunner` and applies every other
//! operation through a `FileSystem`. Filesystem errors become failed results
//! so a sequence can roll back; only spawn failures surface as `Err`.

use std::path::Path;

use tracing::debug;

use crate::domain::entities::Operation;
use crate::domain::ports::{CommandRunner, FileSystem, FsError, FsResult, TaskExecutor};
use crate::domain::value_objects::ExecutionResult;
use crate::error::BallastResult;

pub struct HostExecutor<'a> {
    runner: &'a dyn CommandRunner,
    fs: &'a dyn FileSystem,
}

impl<'a> HostExecutor<'a> {
    pub fn new(runner: &'a dyn CommandRunner, fs: &'a dyn FileSystem) -> Self {
        Self { runner, fs }
    }

    pub fn runner(&self) -> &'a dyn CommandRunner {
        self.runner
    }

    pub fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    fn apply(&self, operation: &Operation) -> FsResult<()> {
        let fs = self.fs;
        match operation {
            Operation::Exec(_) => Ok(()),
            Operation::Copy {
                from,
                to,
                overwrite,
            } => {
                if !overwrite && fs.exists(to) {
                    debug!(target = %to.display(), "copy skipped, target exists");
                    return Ok(());
                }
                fs.copy(from, to)
            }
            Operation::Rename {
                from,
                to,
                overwrite,
            } => {
                if fs.exists(to) {
                    if !overwrite {
                        return Err(FsError::AlreadyExists(to.clone()));
                    }
                    fs.remove(to)?;
                }
                fs.rename(from, to)
            }
            Operation::Remove(paths) => {
                for path in paths.iter().filter(|p| exists_or_link(fs, p)) {
                    fs.remove(path)?;
                }
                Ok(())
            }
            Operation::ReplaceInFile { path, from, to } => {
                let content = fs.read(path)?;
                fs.write(path, &content.replace(from.as_str(), to))
            }
            Operation::ReplaceLines {
                path,
                prefix,
                suffix,
                to,
            } => {
                let content = fs.read(path)?;
                fs.write(path, &replace_lines(&content, prefix, suffix, to))
            }
            Operation::WriteFile {
                path,
                contents,
                append,
            } => {
                if *append {
                    fs.append(path, contents)
                } else {
                    fs.write(path, contents)
                }
            }
            Operation::CreateDir(path) => fs.create_dir_all(path),
            Operation::Touch(path) => fs.touch(path),
            Operation::SetMode { path, mode } => fs.set_mode(path, *mode),
        }
    }
}

fn exists_or_link(fs: &dyn FileSystem, path: &Path) -> bool {
    fs.exists(path) || path.symlink_metadata().is_ok()
}

/// Replace each line that starts with `prefix` and ends with `suffix`.
pub fn replace_lines(content: &str, prefix: &str, suffix: &str, to: &str) -> String {
    content
        .split_inclusive('\n')
        .map(|line| {
            let (body, newline) = match line.strip_suffix('\n') {
                Some(body) => {
                    let body = body.strip_suffix('\r').unwrap_or(body);
                    (body, &line[body.len()..])
                }
                None => (line, ""),
            };
            if body.len() >= prefix.len() + suffix.len()
                && body.starts_with(prefix)
                && body.ends_with(suffix)
            {
                format!("{to}{newline}")
            } else {
                line.to_string()
            }
        })
        .collect()
}

impl TaskExecutor for HostExecutor<'_> {
    fn execute(&self, operation: &Operation) -> BallastResult<ExecutionResult> {
        if let Operation::Exec(spec) = operation {
            return Ok(self.runner.run(spec)?.into_result());
        }
        debug!(operation = %operation.describe(), "filesystem task");
        Ok(match self.apply(operation) {
            Ok(()) => ExecutionResult::ok(operation.describe()),
            Err(err) => ExecutionResult::failure(format!("{}: {}", operation.describe(), err)),
        })
    }
}
