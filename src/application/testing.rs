//! Test doubles shared by the use case tests

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use super::Context;
use crate::config::{ProjectConfig, Settings};
use crate::domain::ports::{CommandRunner, Console, Pause, TaskExecutor};
use crate::infrastructure::LocalFs;

/// Console that records every message and answers from a script.
#[derive(Default)]
pub struct RecordingConsole {
    lines: RefCell<Vec<(&'static str, String)>>,
    answers: Vec<(String, String)>,
    confirms: Vec<(String, bool)>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer questions starting with `question`.
    pub fn answer(mut self, question: &str, value: &str) -> Self {
        self.answers.push((question.to_string(), value.to_string()));
        self
    }

    /// Confirm (or refuse) questions starting with `question`.
    pub fn confirm_with(mut self, question: &str, value: bool) -> Self {
        self.confirms.push((question.to_string(), value));
        self
    }

    pub fn messages(&self, kind: &str) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn has(&self, kind: &str, fragment: &str) -> bool {
        self.messages(kind).iter().any(|m| m.contains(fragment))
    }

    fn push(&self, kind: &'static str, text: &str) {
        self.lines.borrow_mut().push((kind, text.to_string()));
    }
}

impl Console for RecordingConsole {
    fn title(&self, text: &str) {
        self.push("title", text);
    }
    fn section(&self, text: &str) {
        self.push("section", text);
    }
    fn text(&self, text: &str) {
        self.push("text", text);
    }
    fn note(&self, text: &str) {
        self.push("note", text);
    }
    fn success(&self, text: &str) {
        self.push("success", text);
    }
    fn warning(&self, text: &str) {
        self.push("warning", text);
    }
    fn error(&self, text: &str) {
        self.push("error", text);
    }
    fn listing(&self, items: &[String]) {
        for item in items {
            self.push("listing", item);
        }
    }

    fn ask(&self, question: &str, default: &str) -> String {
        self.push("ask", question);
        self.answers
            .iter()
            .find(|(q, _)| question.starts_with(q.as_str()))
            .map(|(_, a)| a.clone())
            .unwrap_or_else(|| default.to_string())
    }

    fn confirm(&self, question: &str, default: bool) -> bool {
        self.push("confirm", question);
        self.confirms
            .iter()
            .find(|(q, _)| question.starts_with(q.as_str()))
            .map(|(_, v)| *v)
            .unwrap_or(default)
    }
}

/// Pause that only counts.
#[derive(Default)]
pub struct CountingPause {
    pub count: Cell<u32>,
}

impl Pause for CountingPause {
    fn pause(&self, _duration: Duration) {
        self.count.set(self.count.get() + 1);
    }
}

/// A temporary project and home directory with real file access.
pub struct Fixture {
    pub dir: TempDir,
    pub home: PathBuf,
    pub config: ProjectConfig,
    pub console: RecordingConsole,
    pub pause: CountingPause,
    pub fs: LocalFs,
}

impl Fixture {
    pub fn new(settings: &[(&str, &str)]) -> Self {
        Self::with_console(settings, RecordingConsole::new())
    }

    pub fn with_console(settings: &[(&str, &str)], console: RecordingConsole) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("project");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&home).unwrap();
        let mut values = Settings::default();
        for (key, value) in settings {
            values.set(*key, *value);
        }
        Self {
            config: ProjectConfig::new(root, values),
            home,
            dir,
            console,
            pause: CountingPause::default(),
            fs: LocalFs::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.config.project_root()
    }

    /// Create `relative` under the project root with `contents`.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root().join(relative)).unwrap()
    }

    pub fn context<'a>(
        &'a self,
        runner: &'a dyn CommandRunner,
        executor: &'a dyn TaskExecutor,
    ) -> Context<'a> {
        Context {
            config: &self.config,
            runner,
            executor,
            fs: &self.fs,
            console: &self.console,
            pause: &self.pause,
            home: &self.home,
        }
    }
}
