//! OS-level capabilities the core depends on but does not implement.
//!
//! Opening a path with the desktop's default handler and sending a path to
//! the trash are both platform services. Each sits behind its own trait so
//! the [`FileManager`](crate::manager::FileManager) only sees the interface;
//! [`SystemOpener`] and [`SystemTrash`] are the implementations selected for
//! the running platform.

use std::path::Path;
use std::process::Command;

use crate::error::{CoreError, CoreResult};

/// Opens a path with the platform's default application.
pub trait Opener: Send + Sync {
    fn open(&self, path: &Path) -> CoreResult<()>;
}

/// Moves a path into the platform's trash / recycle bin.
pub trait Trash: Send + Sync {
    fn trash(&self, path: &Path) -> CoreResult<()>;
}

/// Launches `xdg-open`, `open` or `cmd /C start` depending on the target OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> CoreResult<()> {
        if std::fs::symlink_metadata(path).is_err() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }

        let status = open_command(path)
            .status()
            .map_err(|e| CoreError::Platform(format!("failed to launch opener: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(CoreError::Platform(format!(
                "opener exited with {status} for {}",
                path.display()
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", windows)))]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

/// Uses the `trash` crate (freedesktop trash, macOS Finder, Windows recycle bin).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn trash(&self, path: &Path) -> CoreResult<()> {
        if std::fs::symlink_metadata(path).is_err() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }
        trash::delete(path).map_err(|e| CoreError::Platform(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_opener_rejects_missing_path() {
        let result = SystemOpener.open(Path::new("/nonexistent/file.pdf"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn system_trash_rejects_missing_path() {
        let result = SystemTrash.trash(Path::new("/nonexistent/file.pdf"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn capabilities_are_object_safe() {
        let opener: Box<dyn Opener> = Box::new(SystemOpener);
        let trash: Box<dyn Trash> = Box::new(SystemTrash);
        drop((opener, trash));
    }
}
