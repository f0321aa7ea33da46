//! External gesture detector process
//!
//! The detector is a separate program that watches the camera and sends
//! command tokens back over the gesture socket. We only launch it, log its
//! output, and kill it.

use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    /// Exited inside the startup window: the launch did not take
    LaunchFailed(String),
    /// Exited after running for a while
    Exited(String),
}

pub struct CameraProcess {
    command: String,
    args: Vec<String>,
    startup_grace: Duration,
    child: Option<Child>,
    started_at: Option<Instant>,
}

impl CameraProcess {
    pub fn new(command: impl Into<String>, args: Vec<String>, startup_grace: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            startup_grace,
            child: None,
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Spawn the detector. Must be called inside a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Ok(());
        }

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to launch gesture detector '{}'", self.command))?;

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(pump_output(stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(pump_output(stderr));
        }

        info!(
            "Started gesture detector '{}' (pid {:?})",
            self.command,
            child.id()
        );
        self.child = Some(child);
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// Kill the detector by handle
    pub fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        self.started_at = None;

        if let Err(e) = child.start_kill() {
            warn!("Failed to kill gesture detector: {}", e);
        } else {
            info!("Stopped gesture detector '{}'", self.command);
        }
    }

    /// Start when stopped, stop when running. Returns the new running state.
    pub fn toggle(&mut self) -> Result<bool> {
        if self.is_running() {
            self.stop();
            Ok(false)
        } else {
            self.start()?;
            Ok(true)
        }
    }

    /// Non-blocking liveness check
    pub fn poll(&mut self) -> Option<CameraEvent> {
        let child = self.child.as_mut()?;
        let status = match child.try_wait() {
            Ok(Some(status)) => status,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to query gesture detector: {}", e);
                return None;
            }
        };

        let early = self
            .started_at
            .map(|t| t.elapsed() < self.startup_grace)
            .unwrap_or(false);
        self.child = None;
        self.started_at = None;

        let detail = format!("'{}' exited with {}", self.command, status);
        if early {
            warn!("Gesture detector failed to start: {}", detail);
            Some(CameraEvent::LaunchFailed(detail))
        } else {
            info!("Gesture detector stopped: {}", detail);
            Some(CameraEvent::Exited(detail))
        }
    }
}

impl Drop for CameraProcess {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn pump_output<R>(stream: R)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => info!(target: "camera", "{}", line),
            Ok(None) => break,
            Err(e) => {
                debug!(target: "camera", "Output stream closed: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn wait_for_event(camera: &mut CameraProcess) -> Option<CameraEvent> {
        for _ in 0..100 {
            if let Some(event) = camera.poll() {
                return Some(event);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_missing_executable_is_an_error() {
        let mut camera = CameraProcess::new(
            "definitely-not-a-gesture-detector",
            Vec::new(),
            Duration::from_secs(1),
        );
        assert!(camera.start().is_err());
        assert!(!camera.is_running());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_toggle_starts_then_kills() {
        let mut camera =
            CameraProcess::new("sleep", vec!["30".to_string()], Duration::from_millis(200));
        assert!(camera.toggle().unwrap());
        assert!(camera.is_running());
        assert_eq!(camera.poll(), None);

        assert!(!camera.toggle().unwrap());
        assert!(!camera.is_running());
        assert_eq!(camera.poll(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_early_exit_reports_launch_failure() {
        let mut camera = CameraProcess::new("false", Vec::new(), Duration::from_secs(30));
        camera.start().unwrap();

        let event = wait_for_event(&mut camera).await;
        assert!(matches!(event, Some(CameraEvent::LaunchFailed(_))));
        assert!(!camera.is_running());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_late_exit_reports_exited() {
        let mut camera = CameraProcess::new("true", Vec::new(), Duration::ZERO);
        camera.start().unwrap();

        let event = wait_for_event(&mut camera).await;
        assert!(matches!(event, Some(CameraEvent::Exited(_))));
    }
}
