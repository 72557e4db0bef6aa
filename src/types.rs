use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::color::Rgba;

/// Fresh identifier for any entity. Ids are never reused.
pub fn new_id() -> String {
    Ulid::new().to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn color(self) -> Rgba {
        match self {
            Difficulty::Easy => Rgba::GREEN,
            Difficulty::Medium => Rgba::YELLOW,
            Difficulty::Hard => Rgba::RED,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Difficulty::Easy => "difficulty_easy",
            Difficulty::Medium => "difficulty_middle",
            Difficulty::Hard => "difficulty_hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default = "Rgba::random_person_color")]
    pub icon_color: Rgba,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into().trim().to_string(),
            icon_color: Rgba::random_person_color(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub color: Rgba,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl Card {
    /// A plain white, easy card. The id is provisional: adding the card to a
    /// board always assigns a fresh one.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            description: String::new(),
            difficulty: Difficulty::default(),
            color: Rgba::default(),
            people: Vec::new(),
            deadline: None,
        }
    }

    /// Deadline as epoch milliseconds at local midnight.
    pub fn deadline_timestamp(&self) -> Option<i64> {
        let midnight = self.deadline?.and_hms_opt(0, 0, 0)?;
        midnight
            .and_local_timezone(Local)
            .earliest()
            .map(|at| at.timestamp_millis())
    }

    /// True once the deadline day has passed. A card due today is not late.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline.is_some_and(|deadline| deadline < today)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            cards: Vec::new(),
        }
    }
}

/// The columns and cards of one workspace. Shares its id with the workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    pub create_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub folder_path: String,
    pub dark_theme: bool,
    pub locale: String,
}

impl Settings {
    pub const DEFAULT_LOCALE: &'static str = "ru";

    pub fn defaults(home: &std::path::Path) -> Self {
        Self {
            folder_path: home.to_string_lossy().into_owned(),
            dark_theme: false,
            locale: Self::DEFAULT_LOCALE.to_string(),
        }
    }
}
