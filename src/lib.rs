//! Kanban workspaces, boards, columns and cards kept as one JSON document per
//! entity under `~/.zingo`.
//!
//! [`board`] and [`workspace`] hold the pure copy-on-write transforms,
//! [`storage`] reads and writes the documents, [`router`] tracks the screen
//! and settings a front end renders from, and [`app`] ties them together.

pub mod app;
pub mod board;
pub mod cli;
pub mod color;
pub mod commands;
pub mod error;
pub mod locale;
pub mod router;
pub mod storage;
pub mod types;
pub mod workspace;

pub mod metadata {
    include!(concat!(env!("OUT_DIR"), "/pkg_info.rs"));
}

pub use app::{App, AppError};
pub use router::{Router, Screen};
pub use storage::{Storage, StorageError};
pub use types::{Board, Card, Column, Difficulty, Person, Settings, Workspace};
