//! Common test utilities and fixtures
//!
//! Every command runs inside its own temporary home so saved progress and
//! config files never leak between tests or into the real user directories.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Answers that lean heavily on vision
pub const VISION_ANSWERS: [&str; 7] = [
    "q1=q1d", "q2=q2d", "q3=q3d", "q4=q4d", "q5=q5b", "q6=q6c", "q7=q7c",
];

/// Same answers as typed into the interactive survey
pub const VISION_INPUT: &str = "4\n4\n4\n4\n2\n3\n3\n";

/// Isolated home, config and data directories for one test
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path().join("data")
    }

    /// File holding progress under the default storage key
    pub fn progress_file(&self) -> PathBuf {
        self.data_dir().join("newsletter-survey-progress.json")
    }

    /// Write a config file and return its path
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    /// A command for the work-persona binary confined to this environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("work-persona").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("WORK_PERSONA_DATA_DIR", self.data_dir())
            .env_remove("WORK_PERSONA_CONFIG")
            .env_remove("WORK_PERSONA_BASE_URL")
            .env_remove("WORK_PERSONA_STORAGE_KEY")
            .env_remove("WORK_PERSONA_LOG_LEVEL")
            .env_remove("WORK_PERSONA_LOG_FILE")
            .env_remove("RUST_LOG");
        cmd
    }
}
