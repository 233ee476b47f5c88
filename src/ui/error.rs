//! Top-level error reporting for `main`

use ballast::BallastError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::terminal::TerminalCapabilities;

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = TerminalCapabilities::detect();
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

fn format_error_with(err: &anyhow::Error, color: bool, unicode: bool) -> String {
    let mut block = err
        .chain()
        .skip(1)
        .fold(ErrorBlock::new(err.to_string()), |block, cause| {
            block.caused_by(cause.to_string())
        });
    if let Some(fix) = err.downcast_ref::<BallastError>().and_then(fix_for) {
        block = block.with_fix(fix);
    }
    block.render(color, unicode)
}

fn fix_for(err: &BallastError) -> Option<&'static str> {
    match err {
        BallastError::ConfigNotFound { .. } => {
            Some("Run ballast inside a project, or pass --project-root <PATH>.")
        }
        BallastError::InvalidConfig { .. } | BallastError::Yaml { .. } => {
            Some("setup/config.yml must be a mapping of setting names to values.")
        }
        BallastError::Validation(_) => {
            Some("Pass the value as an option or set the matching CI variable.")
        }
        BallastError::ExecutionSetup { .. } => {
            Some("Run `ballast setup prerequisites` to install the required tools.")
        }
        BallastError::NeverStarted | BallastError::Stalled { .. } => {
            Some("Check the front-end build container with `docker-compose logs`.")
        }
        _ => None,
    }
}

/// Report `err` on stderr, or as a JSON `error` event on stdout.
pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let event = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
            "causes": causes,
        });
        let _ = crate::ui::json::emit(&event);
        return;
    }

    eprint!("{}", format_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;
    use std::path::PathBuf;

    #[test]
    fn config_not_found_suggests_project_root() {
        let err = anyhow::Error::new(BallastError::ConfigNotFound {
            start: PathBuf::from("/tmp/elsewhere"),
        });
        let rendered = format_error_with(&err, false, false);
        assert!(rendered.contains("project root not found from /tmp/elsewhere"));
        assert!(rendered.contains("FIX: Run ballast inside a project"));
    }

    #[test]
    fn context_layers_are_listed_as_causes() {
        let err = Err::<(), _>(std::io::Error::other("disk full"))
            .context("unable to read the working directory")
            .unwrap_err();
        let rendered = format_error_with(&err, false, false);
        assert!(rendered.contains("| unable to read the working directory"));
        assert!(rendered.contains("| caused by: disk full"));
    }

    #[test]
    fn plain_errors_have_no_fix() {
        let err = anyhow::anyhow!("Deployment failed.");
        let rendered = format_error_with(&err, false, false);
        assert!(rendered.contains("Deployment failed."));
        assert!(!rendered.contains("FIX:"));
    }
}
