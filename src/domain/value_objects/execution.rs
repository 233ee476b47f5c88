/// Outcome of a single task or of a whole task sequence.
///
/// Ephemeral: nothing about it is persisted beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    success: bool,
    exit_code: Option<i32>,
    message: String,
}

impl ExecutionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: None,
            message: message.into(),
        }
    }

    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Captured output: stdout on success, stderr (or a description) on failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}
