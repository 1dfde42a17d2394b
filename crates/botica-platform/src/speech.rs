//! Text-to-speech output.
//!
//! Speech is delegated to an external synthesizer program run as a child
//! process. Only one utterance plays at a time: `speak` cancels whatever is
//! still running before starting the next one.

use std::io;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, MutexGuard, PoisonError};

use botica_common::PlatformError;
use tracing::{debug, warn};

/// Voice output collaborator. All commands are one-shot and independent.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), PlatformError>;
    fn cancel(&self) -> Result<(), PlatformError>;
    fn pause(&self) -> Result<(), PlatformError>;
    fn resume(&self) -> Result<(), PlatformError>;
}

/// Speaks by running `command [args..] <text>`.
pub struct CommandSpeaker {
    command: String,
    args: Vec<String>,
    child: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            child: Mutex::new(None),
        }
    }

    /// Whether an utterance is still playing (or paused).
    pub fn is_speaking(&self) -> bool {
        let mut guard = self.lock();
        match guard.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send a job-control signal to the running utterance, if any.
    #[cfg(unix)]
    fn signal(&self, signal: &str) -> Result<(), PlatformError> {
        let mut guard = self.lock();
        let Some(child) = guard.as_mut() else {
            return Ok(());
        };
        if !matches!(child.try_wait(), Ok(None)) {
            return Ok(());
        }

        let status = Command::new("kill")
            .arg(signal)
            .arg(child.id().to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| PlatformError::VoiceError(format!("kill {signal}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::VoiceError(format!(
                "kill {signal} exited with {status}"
            )))
        }
    }

    #[cfg(not(unix))]
    fn signal(&self, signal: &str) -> Result<(), PlatformError> {
        Err(PlatformError::NotSupported(format!(
            "speech {signal} on this platform"
        )))
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) -> Result<(), PlatformError> {
        self.cancel()?;

        debug!(command = %self.command, chars = text.chars().count(), "speaking");
        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PlatformError::VoiceUnavailable(format!(
                    "speech command '{}' not found",
                    self.command
                )),
                _ => PlatformError::VoiceError(e.to_string()),
            })?;

        *self.lock() = Some(child);
        Ok(())
    }

    fn cancel(&self) -> Result<(), PlatformError> {
        let Some(mut child) = self.lock().take() else {
            return Ok(());
        };
        if let Ok(None) = child.try_wait() {
            if let Err(e) = child.kill() {
                warn!("failed to stop speech process: {e}");
            }
        }
        // Reap so the process does not linger as a zombie.
        let _ = child.wait();
        Ok(())
    }

    fn pause(&self) -> Result<(), PlatformError> {
        self.signal("-STOP")
    }

    fn resume(&self) -> Result<(), PlatformError> {
        self.signal("-CONT")
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        let _ = self.cancel();
    }
}
