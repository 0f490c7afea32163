use async_trait::async_trait;
use std::{path::PathBuf, process::Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::{
    domain::{
        errors::{Backend, ControllerError, ControllerResult},
        models::{FormatError, FormatResponse},
    },
    ports::toolchain::CodeFormatter,
};

/// Name the source file carries, both on disk and in diagnostics
const SOURCE_FILE: &str = "prog.gop";

/// Formats Go+ source by running `<binary> fmt -smart` on a scratch copy
#[derive(Debug, Clone)]
pub struct GopFormatter {
    binary: PathBuf,
}

impl GopFormatter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }
}

impl Default for GopFormatter {
    fn default() -> Self {
        Self::new("gop")
    }
}

fn io_failure(what: &str, err: std::io::Error) -> ControllerError {
    ControllerError::upstream(Backend::Formatter, format!("{}: {}", what, err))
}

#[async_trait]
impl CodeFormatter for GopFormatter {
    async fn format(&self, source: &str) -> ControllerResult<FormatResponse> {
        // Removed when dropped, whichever way this function returns
        let scratch = tempfile::Builder::new()
            .prefix("gopformat")
            .tempdir()
            .map_err(|e| io_failure("Failed to create scratch directory", e))?;
        let file = scratch.path().join(SOURCE_FILE);

        tokio::fs::write(&file, source)
            .await
            .map_err(|e| io_failure("Failed to write source", e))?;

        let output = Command::new(&self.binary)
            .args(["fmt", "-smart"])
            .arg(&file)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                io_failure(&format!("Failed to run '{}'", self.binary.display()), e)
            })?;

        if !output.status.success() {
            // diagnostics go to stdout; stderr only matters when stdout is empty
            let raw = if output.stdout.iter().all(u8::is_ascii_whitespace) {
                String::from_utf8_lossy(&output.stderr).into_owned()
            } else {
                String::from_utf8_lossy(&output.stdout).into_owned()
            };
            let diagnostic = raw.replace(&file.display().to_string(), SOURCE_FILE);
            let error = FormatError::parse(&diagnostic);
            debug!(status = %output.status, line = error.line, column = error.column, "source rejected by formatter");
            return Ok(FormatResponse::failed(error));
        }

        match tokio::fs::read_to_string(&file).await {
            Ok(body) => Ok(FormatResponse::formatted(body)),
            Err(e) => {
                warn!(error = %e, "formatter output unreadable");
                Err(ControllerError::internal("internal error when formatting gop code"))
            }
        }
    }
}
