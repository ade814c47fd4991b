use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{Answer, SessionRequest};

const LOG_SIZE_LIMIT: u64 = 1024 * 1024; // 1MB

/// JSON-array log of answered prompts.
pub(crate) struct SessionLog {
    log_path: PathBuf,
}

impl SessionLog {
    pub(crate) fn new(log_path: &Path) -> Self {
        SessionLog {
            log_path: log_path.to_path_buf(),
        }
    }

    pub(crate) fn record(&self, request: &SessionRequest, answer: &Answer, exit_code: i32) -> Result<()> {
        let entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "prompt": request.prompt,
            "responses": request.responses.as_string(),
            "case_sensitive": request.case_mode.is_sensitive(),
            "key_code": answer.key.map(|key| key.code()),
            "result": answer.resolution,
            "exit_code": exit_code,
        });

        if let Ok(meta) = fs::metadata(&self.log_path)
            && meta.len() > LOG_SIZE_LIMIT
        {
            self.rotate_log()?;
        }

        let log_contents = if self.log_path.exists() {
            fs::read_to_string(&self.log_path).unwrap_or_else(|_| String::from("[]"))
        } else {
            String::from("[]")
        };

        // A damaged log is started over rather than blocking the answer.
        let mut entries: Vec<Value> =
            serde_json::from_str(&log_contents).unwrap_or_else(|_| Vec::new());

        entries.push(entry);

        let json_str =
            serde_json::to_string_pretty(&entries).context("failed to serialize log entries")?;

        if let Some(parent) = self.log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory: {}", parent.display()))?;
        }

        // The log is replaced whole, never rewritten in place.
        let temp_path = self.sibling_path(&format!("{}.tmp", std::process::id()));
        fs::write(&temp_path, json_str)
            .with_context(|| format!("failed to write log to {}", temp_path.display()))?;
        if let Err(err) = fs::rename(&temp_path, &self.log_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err)
                .with_context(|| format!("failed to replace log {}", self.log_path.display()));
        }

        Ok(())
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut path = self.log_path.clone().into_os_string();
        path.push(".");
        path.push(suffix);
        PathBuf::from(path)
    }

    fn rotate_log(&self) -> Result<()> {
        let rotated_path = self.sibling_path("1");

        if rotated_path.exists() {
            fs::remove_file(&rotated_path)
                .with_context(|| format!("failed to remove {}", rotated_path.display()))?;
        }

        fs::rename(&self.log_path, &rotated_path)
            .with_context(|| format!("failed to rotate log to {}", rotated_path.display()))?;

        Ok(())
    }
}
