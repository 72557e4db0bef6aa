use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{Board, Settings, Workspace};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not determine the user's home directory")]
    HomeDirUnavailable,
}

const WORKSPACE_PREFIX: &str = "workspace_";
const BOARD_PREFIX: &str = "board_";
const SETTINGS_FILE: &str = "settings.json";

/// Outcome of reading one document. Callers only ever see "value or
/// nothing"; the split exists so absent and corrupt files log differently.
enum Loaded<T> {
    Absent,
    Corrupt(String),
    Found(T),
}

/// One JSON document per workspace, per board and for the settings, all
/// directly under `<home>/.zingo`.
#[derive(Clone, Debug)]
pub struct Storage {
    home: PathBuf,
    data_dir: PathBuf,
}

impl Storage {
    pub const DIR_NAME: &'static str = ".zingo";

    /// Storage under the current user's home directory.
    pub fn new() -> Result<Self, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::HomeDirUnavailable)?;
        Self::in_home(home)
    }

    /// Storage under an explicit home directory. The data directory is
    /// created if needed.
    pub fn in_home(home: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let home = home.into();
        let data_dir = home.join(Self::DIR_NAME);
        fs::create_dir_all(&data_dir)?;
        tracing::debug!(dir = %data_dir.display(), "storage ready");
        Ok(Self { home, data_dir })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn workspace_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{WORKSPACE_PREFIX}{id}.json"))
    }

    pub fn board_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{BOARD_PREFIX}{id}.json"))
    }

    // Workspaces

    /// Every workspace document that parses, oldest first. Unreadable files
    /// are skipped.
    pub fn load_all_workspaces(&self) -> Vec<Workspace> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(dir = %self.data_dir.display(), error = %err, "cannot list workspaces");
                return Vec::new();
            }
        };

        let mut workspaces: Vec<Workspace> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_workspace_file(path))
            .filter_map(|path| match read_document::<Workspace>(&path) {
                Loaded::Found(workspace) => Some(workspace),
                Loaded::Corrupt(reason) => {
                    tracing::warn!(file = %path.display(), %reason, "skipping unreadable workspace");
                    None
                }
                Loaded::Absent => None,
            })
            .collect();

        workspaces.sort_by(|a, b| a.create_date.cmp(&b.create_date).then_with(|| a.id.cmp(&b.id)));
        workspaces
    }

    pub fn save_workspace(&self, workspace: &Workspace) -> Result<(), StorageError> {
        write_document(&self.workspace_path(&workspace.id), workspace)
    }

    pub fn delete_workspace(&self, id: &str) -> Result<(), StorageError> {
        remove_document(&self.workspace_path(id))
    }

    // Boards

    /// `None` both when the board was never saved and when its file is
    /// unreadable; either way the caller synthesizes a default.
    pub fn load_board(&self, id: &str) -> Option<Board> {
        let path = self.board_path(id);
        match read_document::<Board>(&path) {
            Loaded::Found(board) => Some(board),
            Loaded::Absent => {
                tracing::debug!(board = id, "no board document");
                None
            }
            Loaded::Corrupt(reason) => {
                tracing::warn!(file = %path.display(), %reason, "board document unreadable");
                None
            }
        }
    }

    /// [`Storage::load_board`] on the blocking pool, for screen entry.
    pub async fn load_board_async(&self, id: &str) -> Option<Board> {
        let storage = self.clone();
        let id = id.to_string();
        match tokio::task::spawn_blocking(move || storage.load_board(&id)).await {
            Ok(board) => board,
            Err(err) => {
                tracing::warn!(error = %err, "board load task failed");
                None
            }
        }
    }

    pub fn save_board(&self, board: &Board) -> Result<(), StorageError> {
        write_document(&self.board_path(&board.id), board)
    }

    pub fn delete_board(&self, id: &str) -> Result<(), StorageError> {
        remove_document(&self.board_path(id))
    }

    // Settings

    /// Settings from disk. A missing file is replaced by the defaults, which
    /// are written out. A corrupt file also yields the defaults but is left
    /// as is so it can be inspected or repaired by hand.
    pub fn load_settings(&self) -> Result<Settings, StorageError> {
        let path = self.settings_path();
        match read_document::<Settings>(&path) {
            Loaded::Found(settings) => Ok(settings),
            Loaded::Absent => {
                let defaults = Settings::defaults(&self.home);
                self.save_settings(&defaults)?;
                tracing::info!(file = %path.display(), "wrote default settings");
                Ok(defaults)
            }
            Loaded::Corrupt(reason) => {
                tracing::warn!(file = %path.display(), %reason, "settings unreadable, using defaults");
                Ok(Settings::defaults(&self.home))
            }
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        write_document(&self.settings_path(), settings)
    }
}

fn is_workspace_file(path: &Path) -> bool {
    let named = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(WORKSPACE_PREFIX));
    named && path.extension().is_some_and(|ext| ext == "json")
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Loaded<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Loaded::Absent,
        Err(err) => return Loaded::Corrupt(err.to_string()),
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Loaded::Found(value),
        Err(err) => Loaded::Corrupt(err.to_string()),
    }
}

/// Pretty-printed JSON written through a temporary sibling and an atomic
/// rename, so readers never observe a half-written document.
fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp = path.with_extension("tmp");
    let mut f = File::create(&temp)?;
    let content = serde_json::to_string_pretty(value)?;
    f.write_all(content.as_bytes())?;
    f.sync_all()?;
    fs::rename(temp, path)?;
    tracing::debug!(file = %path.display(), "saved");
    Ok(())
}

fn remove_document(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(file = %path.display(), "removed");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
