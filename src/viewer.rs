use crate::error::{QrError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Opens an image in the platform's default viewer.
/// - macOS: uses open
/// - Linux: uses xdg-open
/// - Windows: uses `cmd /C start`
///
/// The viewer is spawned and left running; this does not wait for it to exit.
pub fn open_image(path: &Path) -> Result<()> {
    let mut cmd = opener_command(path)?;
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            QrError::Viewer(format!(
                "Failed to launch '{}': {}",
                cmd.get_program().to_string_lossy(),
                e
            ))
        })?;
    debug!(pid = child.id(), path = %path.display(), "launched image viewer");
    Ok(())
}

fn opener_command(path: &Path) -> Result<Command> {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        Ok(cmd)
    }

    #[cfg(target_os = "linux")]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        Ok(cmd)
    }

    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        Ok(cmd)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = path;
        Err(QrError::Viewer(
            "Image viewer not supported on this platform".to_string(),
        ))
    }
}
