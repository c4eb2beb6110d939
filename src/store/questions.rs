//! Question Store
//!
//! Plain text file, one question per line.

use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::StoreResult;
use super::open_for_append;

/// A free-text question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Append-only line store of questions
#[derive(Debug)]
pub struct QuestionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all questions in append order.
    ///
    /// A missing file is created empty. Blank lines are skipped.
    pub fn load(&self) -> StoreResult<Vec<Question>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_empty()?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Question::new)
            .collect())
    }

    /// Append one question as a new line
    pub fn append(&self, text: &str) -> StoreResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let (mut file, _) = open_for_append(&self.path)?;
        writeln!(file, "{}", text)?;

        tracing::info!(length = text.len(), "Appended question");
        Ok(())
    }

    fn create_empty(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(&self.path)?;
        tracing::info!(path = ?self.path, "Created empty question file");
        Ok(())
    }
}
