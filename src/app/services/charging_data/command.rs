//! External process data source
//!
//! Invokes `chargemeup -k <key> -b "(lat1,lon1),(lat2,lon2)"` and captures
//! its standard output. Standard error is captured too and surfaced in the
//! error message when the process fails.

use super::ChargingDataProvider;
use crate::app::models::{ApiKey, BoundingBox};
use crate::config::FetcherConfig;
use crate::constants::{MAX_STDERR_IN_ERROR, fetcher_flags};
use crate::{Error, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Provider that shells out to an external executable
#[derive(Debug, Clone, PartialEq)]
pub struct CommandProvider {
    program: PathBuf,
    server: Option<String>,
    timeout: Option<Duration>,
}

impl CommandProvider {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            server: None,
            timeout: None,
        }
    }

    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            program: config.program.clone(),
            server: config.server.clone(),
            timeout: config.timeout,
        }
    }

    /// Forward a server override with `-s`
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Kill the child and fail if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Arguments passed to the program, in order
    pub fn build_args(&self, bbox: &BoundingBox, api_key: &ApiKey) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            fetcher_flags::API_KEY.into(),
            api_key.expose().into(),
            fetcher_flags::BOUNDING_BOX.into(),
            bbox.to_query_string().into(),
        ];

        if let Some(server) = &self.server {
            args.push(fetcher_flags::SERVER.into());
            args.push(server.into());
        }

        args
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Output> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            Error::execution_io(
                format!("Failed to start '{}'", self.program.display()),
                e,
            )
        })?;

        debug!(pid = ?child.id(), "Spawned {}", self.program.display());

        let output = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output).await.map_err(|_| {
                Error::execution(format!(
                    "'{}' did not finish within {}s",
                    self.program.display(),
                    limit.as_secs_f64()
                ))
            })?,
            None => output.await,
        };

        output.map_err(|e| {
            Error::execution_io(
                format!("Failed to read output of '{}'", self.program.display()),
                e,
            )
        })
    }
}

#[async_trait]
impl ChargingDataProvider for CommandProvider {
    async fn fetch(&self, bbox: &BoundingBox, api_key: &ApiKey) -> Result<Vec<u8>> {
        info!(
            "Running {} for bounding box {}",
            self.program.display(),
            bbox
        );

        let start_time = Instant::now();
        let output = self.run(self.build_args(bbox, api_key)).await?;

        if !output.status.success() {
            return Err(Error::execution(format!(
                "'{}' exited with {}{}",
                self.program.display(),
                output.status,
                stderr_suffix(&output.stderr)
            )));
        }

        if !output.stderr.is_empty() {
            warn!(
                "{} wrote to stderr: {}",
                self.program.display(),
                truncated_stderr(&output.stderr)
            );
        }

        debug!(
            "Captured {} bytes from {} in {:.2}s",
            output.stdout.len(),
            self.program.display(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(output.stdout)
    }
}

fn truncated_stderr(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= MAX_STDERR_IN_ERROR {
        return text.to_string();
    }

    let mut cut = MAX_STDERR_IN_ERROR;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}

fn stderr_suffix(stderr: &[u8]) -> String {
    let text = truncated_stderr(stderr);
    if text.is_empty() {
        String::new()
    } else {
        format!(": {}", text)
    }
}
