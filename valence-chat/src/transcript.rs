//! File-backed transcript

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use valence_core::{DialogueError, TranscriptEntry, TranscriptSink};

/// Session id derived from the local time, e.g. `2024-05-01-14:03`.
pub fn session_id_now() -> String {
    Local::now().format("%Y-%m-%d-%H:%M").to_string()
}

/// Appends transcript lines to `user-<session>.conversation.txt`.
pub struct FileTranscript {
    path: PathBuf,
    file: File,
}

impl FileTranscript {
    /// Open (or create) the transcript for a session under `dir`.
    pub fn open(dir: &Path, session_id: &str) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("user-{}.conversation.txt", session_id));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptSink for FileTranscript {
    fn record(&mut self, entry: &TranscriptEntry) -> valence_core::Result<()> {
        writeln!(self.file, "{}", entry).map_err(|e| {
            DialogueError::Transcript(format!("{}: {}", self.path.display(), e))
        })
    }
}
