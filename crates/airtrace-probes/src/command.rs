use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Run an external tool to completion and return its stdout.
///
/// The C locale is forced so output labels are not translated.
pub(crate) fn run_tool(program: &Path, args: &[String]) -> Result<String> {
    let tool = program
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.display().to_string());

    tracing::debug!("Running {} {}", program.display(), args.join(" "));

    let output = Command::new(program)
        .args(args)
        .env("LC_ALL", "C")
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        return Err(Error::CommandFailed {
            tool,
            status: output.status.to_string(),
            stderr: if stderr.is_empty() { stdout } else { stderr },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
