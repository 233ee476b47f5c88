//! Assertion macros with descriptive failure messages.

/// Assert that combined stdout/stderr contains `needle`.
///
/// # Example
/// ```ignore
/// assert_output_contains!(result, "DEPLOY_TARGET");
/// ```
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain '{}'.\n\
             Exit code: {}\n\
             Output:\n{}",
            $needle,
            $result.exit_code,
            combined
        );
    };
}

/// Assert the command exited with `code`.
#[macro_export]
macro_rules! assert_exit_code {
    ($result:expr, $code:expr) => {
        assert_eq!(
            $result.exit_code,
            $code,
            "Unexpected exit code.\nstdout:\n{}\nstderr:\n{}",
            $result.stdout,
            $result.stderr
        );
    };
}
