use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::app::{Result, Rss2EmailError};
use crate::mailer::{Mailer, Message};

pub const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

/// Submits each message through a freshly spawned local sendmail process.
///
/// Invoked as `<program> <args...> -f <to> <to>` with the message on stdin.
pub struct SendmailMailer {
    program: PathBuf,
    args: Vec<String>,
}

impl SendmailMailer {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the envelope arguments.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Default for SendmailMailer {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL)
    }
}

#[async_trait]
impl Mailer for SendmailMailer {
    async fn send(&self, message: &Message) -> Result<()> {
        let program = self.program.display();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("-f")
            .arg(&message.to)
            .arg(&message.to)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Rss2EmailError::Delivery(format!("failed to run {}: {}", program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Rss2EmailError::Delivery(format!("no stdin pipe to {}", program)))?;

        let written = stdin.write_all(message.to_mime().as_bytes()).await;
        // Close the pipe so the transport sees end of input
        drop(stdin);

        let output = child.wait_with_output().await.map_err(|e| {
            Rss2EmailError::Delivery(format!("failed waiting for {}: {}", program, e))
        })?;

        written.map_err(|e| {
            Rss2EmailError::Delivery(format!("failed to write to {}: {}", program, e))
        })?;

        if !output.stdout.is_empty() {
            tracing::debug!(
                "{} output: {}",
                program,
                String::from_utf8_lossy(&output.stdout).trim_end()
            );
        }

        if !output.status.success() {
            return Err(Rss2EmailError::Delivery(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            )));
        }

        Ok(())
    }
}
