use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Email, InAppNotification, InAppNotifier, MailTransport};
use crate::error::{ExportError, Result};

const NOTIFICATIONS_FILE: &str = "notifications.jsonl";

/// Writes emails and in-app notifications to a local directory instead of
/// delivering them. Each email gets its own folder holding `email.json`
/// and the attachment files.
pub struct FileOutbox {
    dir: PathBuf,
}

impl FileOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_email_dir(&self, subject: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let last = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                name.split('_').next()?.parse::<u32>().ok()
            })
            .max()
            .unwrap_or(0);
        let slug: String = subject
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        Ok(self.dir.join(format!("{:04}_{slug}", last + 1)))
    }
}

impl MailTransport for FileOutbox {
    fn send(&self, email: &Email) -> Result<()> {
        let dir = self.next_email_dir(&email.subject)?;
        fs::create_dir(&dir)?;

        let json = serde_json::to_string_pretty(email)
            .map_err(|e| ExportError::Mail(e.to_string()))?;
        fs::write(dir.join("email.json"), json)?;
        for attachment in &email.attachments {
            fs::write(dir.join(&attachment.file_name), &attachment.bytes)?;
        }

        debug!(dir = %dir.display(), "wrote email to outbox");
        Ok(())
    }
}

impl InAppNotifier for FileOutbox {
    fn notify(&self, notification: &InAppNotification) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let line = serde_json::to_string(notification)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(NOTIFICATIONS_FILE))?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
