//! Console port - user-facing messages and questions
//!
//! Workflows report through this trait so they can run under a terminal
//! renderer, a JSON renderer or a recording double.

pub trait Console {
    fn title(&self, text: &str);
    fn section(&self, text: &str);
    fn text(&self, text: &str);
    fn note(&self, text: &str);
    fn success(&self, text: &str);
    fn warning(&self, text: &str);
    fn error(&self, text: &str);
    fn listing(&self, items: &[String]);

    /// Ask for a value. Non-interactive consoles return `default`.
    fn ask(&self, question: &str, default: &str) -> String;

    /// Ask a yes/no question. Non-interactive consoles return `default`.
    fn confirm(&self, question: &str, default: bool) -> bool;
}
