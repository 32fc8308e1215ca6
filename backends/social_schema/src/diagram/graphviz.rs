use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{AppError, AppResult};

/// Pipes `source` into `dot -T<format> -o <output>` and waits for it.
pub fn run_dot(binary: &Path, format: &str, source: &str, output: &Path) -> AppResult<()> {
    let mut command = Command::new(binary);
    command
        .arg(format!("-T{}", format))
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    debug!("spawning {:?}", command);

    let mut child = command.spawn().map_err(|source| AppError::GraphvizMissing {
        binary: binary.to_path_buf(),
        source,
    })?;

    if let Some(mut stdin) = child.stdin.take() {
        // dot may exit before reading everything; its status says why.
        if let Err(err) = stdin.write_all(source.as_bytes()) {
            debug!("writing to dot failed: {}", err);
        }
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        return Err(AppError::Graphviz {
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_dot(
            &dir.path().join("no-such-dot"),
            "png",
            "graph {}",
            &dir.path().join("out.png"),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::GraphvizMissing { .. }), "{err:?}");
    }
}
