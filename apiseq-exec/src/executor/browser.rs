use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to open {target}: {message}")]
pub struct BrowserError {
    pub target: String,
    pub message: String,
}

pub trait BrowserLauncher: Send + Sync {
    fn launch(&self, target: &str) -> Result<(), BrowserError>;
}

/// Hands the target to the platform's default opener.
pub struct SystemBrowserLauncher;

impl BrowserLauncher for SystemBrowserLauncher {
    fn launch(&self, target: &str) -> Result<(), BrowserError> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };

        command
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| BrowserError {
                target: target.to_string(),
                message: e.to_string(),
            })
    }
}

pub struct NoOpBrowserLauncher;

impl BrowserLauncher for NoOpBrowserLauncher {
    fn launch(&self, _target: &str) -> Result<(), BrowserError> {
        Ok(())
    }
}
