//! The application context handed to a front end.
//!
//! Every intent follows the same path: run the pure transform on the held
//! snapshot, write the result, then keep it as the new snapshot. A failed
//! write leaves the held snapshot untouched.

use thiserror::Error;

use crate::board;
use crate::locale;
use crate::router::Router;
use crate::storage::{Storage, StorageError};
use crate::types::{Board, Card, Person, Settings, Workspace};
use crate::workspace;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("no board is open")]
    NoBoardOpen,
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(String),
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct App {
    storage: Storage,
    router: Router,
    settings: Settings,
    board: Option<Board>,
}

impl App {
    /// Loads the settings and mirrors them into a fresh router.
    pub fn open(storage: Storage) -> AppResult<Self> {
        let settings = storage.load_settings()?;
        let router = Router::new(&settings);
        tracing::debug!(locale = %settings.locale, dark = settings.dark_theme, "settings loaded");
        Ok(Self {
            storage,
            router,
            settings,
            board: None,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The open board snapshot, if any.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    // Workspaces

    pub fn workspaces(&self) -> Vec<Workspace> {
        self.storage.load_all_workspaces()
    }

    pub fn find_workspace(&self, id: &str) -> Option<Workspace> {
        self.workspaces().into_iter().find(|w| w.id == id)
    }

    /// Creates and persists a workspace plus its starter board, then opens it.
    pub fn create_workspace(&mut self, title: &str) -> AppResult<Workspace> {
        require_text(title, "workspace title")?;
        let (created, board) = workspace::create_workspace(title, &self.settings.locale);
        self.storage.save_workspace(&created)?;
        self.storage.save_board(&board)?;
        tracing::info!(workspace = %created.id, title, "workspace created");

        self.router.open_workspace(&created.id);
        self.board = Some(board);
        Ok(created)
    }

    pub fn rename_workspace(&mut self, id: &str, title: &str) -> AppResult<Workspace> {
        require_text(title, "workspace title")?;
        let current = self
            .find_workspace(id)
            .ok_or_else(|| AppError::WorkspaceNotFound(id.to_string()))?;
        let renamed = workspace::rename_workspace(&current, title);
        self.storage.save_workspace(&renamed)?;
        tracing::info!(workspace = id, title, "workspace renamed");
        Ok(renamed)
    }

    /// Removes the workspace document and its board document.
    pub fn delete_workspace(&mut self, id: &str) -> AppResult<()> {
        self.storage.delete_workspace(id)?;
        self.storage.delete_board(id)?;
        tracing::info!(workspace = id, "workspace deleted");

        if self.router.selected_workspace_id().as_deref() == Some(id) {
            self.router.clear_selection();
        }
        if self.board.as_ref().is_some_and(|b| b.id == id) {
            self.board = None;
        }
        Ok(())
    }

    // Boards

    /// Shows the workspace's board, loading it off the calling thread. A
    /// workspace without a board document gets the starter board, saved
    /// right away.
    pub async fn open_board(&mut self, workspace_id: &str) -> AppResult<&Board> {
        self.router.open_workspace(workspace_id);

        let board = match self.storage.load_board_async(workspace_id).await {
            Some(board) => board,
            None => {
                let title = match self.find_workspace(workspace_id) {
                    Some(found) => found.title,
                    None => locale::fallback_board_title(&self.settings.locale).to_string(),
                };
                let fresh = workspace::default_board(workspace_id, &title, &self.settings.locale);
                self.storage.save_board(&fresh)?;
                tracing::info!(board = workspace_id, "created missing board");
                fresh
            }
        };
        let board: &Board = self.board.insert(board);
        Ok(board)
    }

    /// Leaves the board screen.
    pub fn close_board(&mut self) {
        self.router.back();
        self.board = None;
    }

    pub fn add_column(&mut self, title: &str) -> AppResult<&Board> {
        require_text(title, "column title")?;
        self.apply(|b| board::add_column(b, title))
    }

    pub fn rename_column(&mut self, column_id: &str, title: &str) -> AppResult<&Board> {
        require_text(title, "column title")?;
        self.apply(|b| board::rename_column(b, column_id, title))
    }

    pub fn delete_column(&mut self, column_id: &str) -> AppResult<&Board> {
        self.apply(|b| board::delete_column(b, column_id))
    }

    pub fn move_column(&mut self, column_id: &str, index: usize) -> AppResult<&Board> {
        self.apply(|b| board::move_column(b, column_id, index))
    }

    pub fn add_card(&mut self, column_id: &str, card: Card) -> AppResult<&Board> {
        require_text(&card.text, "card text")?;
        self.apply(|b| board::add_card(b, column_id, card))
    }

    pub fn update_card(&mut self, column_id: &str, card: Card) -> AppResult<&Board> {
        require_text(&card.text, "card text")?;
        self.apply(|b| board::update_card(b, column_id, card))
    }

    pub fn delete_card(&mut self, column_id: &str, card_id: &str) -> AppResult<&Board> {
        self.apply(|b| board::delete_card(b, column_id, card_id))
    }

    /// Drag-and-drop of a card onto another column. Dropping it back on its
    /// own column does nothing.
    pub fn move_card(&mut self, card_id: &str, source_column_id: &str, target_column_id: &str) -> AppResult<&Board> {
        if source_column_id == target_column_id {
            return self.board.as_ref().ok_or(AppError::NoBoardOpen);
        }
        self.apply(|b| board::move_card(b, card_id, source_column_id, target_column_id))
    }

    pub fn move_card_to(
        &mut self,
        card_id: &str,
        source_column_id: &str,
        target_column_id: &str,
        index: usize,
    ) -> AppResult<&Board> {
        self.apply(|b| board::move_card_to(b, card_id, source_column_id, target_column_id, index))
    }

    pub fn add_person(&mut self, column_id: &str, card_id: &str, name: &str) -> AppResult<&Board> {
        require_text(name, "person name")?;
        let person = Person::new(name);
        self.apply(|b| board::add_person(b, column_id, card_id, person))
    }

    pub fn remove_person(&mut self, column_id: &str, card_id: &str, person_id: &str) -> AppResult<&Board> {
        self.apply(|b| board::remove_person(b, column_id, card_id, person_id))
    }

    fn apply(&mut self, change: impl FnOnce(&Board) -> Board) -> AppResult<&Board> {
        let current = self.board.as_ref().ok_or(AppError::NoBoardOpen)?;
        let next = change(current);
        self.storage.save_board(&next)?;
        let next: &Board = self.board.insert(next);
        Ok(next)
    }

    // Settings

    pub fn update_settings(&mut self, settings: Settings) -> AppResult<()> {
        self.storage.save_settings(&settings)?;
        self.router.apply_settings(&settings);
        tracing::info!(locale = %settings.locale, dark = settings.dark_theme, "settings saved");
        self.settings = settings;
        Ok(())
    }

    /// Flips the theme and persists it. Returns the new dark-theme flag.
    pub fn toggle_theme(&mut self) -> AppResult<bool> {
        let settings = Settings {
            dark_theme: !self.settings.dark_theme,
            ..self.settings.clone()
        };
        let dark = settings.dark_theme;
        self.update_settings(settings)?;
        Ok(dark)
    }
}

/// Titles, card text and names must contain something besides whitespace.
fn require_text(value: &str, what: &'static str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Blank(what));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::router::Screen;

    fn temp_app() -> (App, TempDir) {
        let home = TempDir::new().unwrap();
        let app = App::open(Storage::in_home(home.path()).unwrap()).unwrap();
        (app, home)
    }

    fn column_id(app: &App, index: usize) -> String {
        app.board().unwrap().columns[index].id.clone()
    }

    #[test]
    fn test_open_writes_default_settings() {
        let (app, home) = temp_app();
        assert_eq!(app.settings(), &Settings::defaults(home.path()));
        assert!(app.storage().settings_path().is_file());
        assert_eq!(app.router().screen(), Screen::Workspaces);
        assert_eq!(app.router().locale(), "ru");
    }

    #[test]
    fn test_create_workspace_persists_pair_and_opens_it() {
        let (mut app, _home) = temp_app();
        let created = app.create_workspace("Launch").unwrap();

        assert_eq!(app.workspaces(), vec![created.clone()]);
        let board = app.storage().load_board(&created.id).unwrap();
        assert_eq!(board.columns.len(), 3);
        // Default locale is ru.
        assert_eq!(board.columns[2].title, "Готово");

        assert_eq!(app.router().screen(), Screen::Board);
        assert_eq!(app.router().selected_workspace_id(), Some(created.id.clone()));
        assert_eq!(app.board(), Some(&board));
    }

    #[test]
    fn test_rename_workspace() {
        let (mut app, _home) = temp_app();
        let created = app.create_workspace("Draft").unwrap();
        let renamed = app.rename_workspace(&created.id, "Final").unwrap();
        assert_eq!(renamed.title, "Final");
        assert_eq!(app.find_workspace(&created.id).unwrap().title, "Final");

        assert!(matches!(
            app.rename_workspace("missing", "x"),
            Err(AppError::WorkspaceNotFound(_))
        ));
    }

    #[test]
    fn test_delete_workspace_removes_both_documents() {
        let (mut app, _home) = temp_app();
        let created = app.create_workspace("Temp").unwrap();
        app.delete_workspace(&created.id).unwrap();

        assert!(app.workspaces().is_empty());
        assert!(!app.storage().workspace_path(&created.id).exists());
        assert!(!app.storage().board_path(&created.id).exists());
        assert!(app.board().is_none());
        assert_eq!(app.router().selected_workspace_id(), None);
        assert_eq!(app.router().screen(), Screen::Workspaces);
    }

    #[tokio::test]
    async fn test_open_board_synthesizes_missing_board() {
        let (mut app, _home) = temp_app();
        let created = app.create_workspace("Orphan").unwrap();
        app.storage().delete_board(&created.id).unwrap();
        app.close_board();

        let board = app.open_board(&created.id).await.unwrap().clone();
        assert_eq!(board.id, created.id);
        assert_eq!(board.title, "Orphan");
        assert_eq!(board.columns.len(), 3);
        assert_eq!(app.storage().load_board(&created.id), Some(board));
        assert_eq!(app.router().screen(), Screen::Board);
    }

    #[tokio::test]
    async fn test_open_board_without_workspace_uses_fallback_title() {
        let (mut app, _home) = temp_app();
        let board = app.open_board("ghost").await.unwrap();
        assert_eq!(board.title, "Новая доска");
    }

    #[test]
    fn test_board_intents_need_open_board() {
        let (mut app, _home) = temp_app();
        assert!(matches!(app.add_column("x"), Err(AppError::NoBoardOpen)));
        assert!(matches!(app.move_card("c", "a", "a"), Err(AppError::NoBoardOpen)));
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut app, _home) = temp_app();
        let created = app.create_workspace("Work").unwrap();
        let todo = column_id(&app, 0);
        let doing = column_id(&app, 1);

        app.add_column("Review").unwrap();
        app.add_card(&todo, Card::new("Write tests")).unwrap();
        let card_id = app.board().unwrap().columns[0].cards[0].id.clone();
        app.add_person(&todo, &card_id, "Ann").unwrap();
        app.move_card(&card_id, &todo, &doing).unwrap();

        let on_disk = app.storage().load_board(&created.id).unwrap();
        assert_eq!(Some(&on_disk), app.board());
        assert_eq!(on_disk.columns.len(), 4);
        assert!(on_disk.columns[0].cards.is_empty());
        assert_eq!(on_disk.columns[1].cards[0].people[0].name, "Ann");
    }

    #[test]
    fn test_blank_input_is_rejected_and_not_saved() {
        let (mut app, _home) = temp_app();
        assert!(matches!(app.create_workspace("   "), Err(AppError::Blank(_))));
        assert!(app.workspaces().is_empty());

        let created = app.create_workspace("Named").unwrap();
        assert!(matches!(app.rename_workspace(&created.id, ""), Err(AppError::Blank(_))));
        assert_eq!(app.find_workspace(&created.id).unwrap().title, "Named");

        let todo = column_id(&app, 0);
        let before = app.board().unwrap().clone();
        assert!(matches!(app.add_column(""), Err(AppError::Blank(_))));
        assert!(matches!(app.rename_column(&todo, "\t"), Err(AppError::Blank(_))));
        assert!(matches!(app.add_card(&todo, Card::new("  ")), Err(AppError::Blank(_))));

        app.add_card(&todo, Card::new("real")).unwrap();
        let mut card = app.board().unwrap().columns[0].cards[0].clone();
        assert!(matches!(app.add_person(&todo, &card.id, "   "), Err(AppError::Blank(_))));
        card.text = " ".into();
        assert!(matches!(app.update_card(&todo, card), Err(AppError::Blank(_))));

        let on_disk = app.storage().load_board(&created.id).unwrap();
        assert_eq!(on_disk.columns.len(), before.columns.len());
        assert_eq!(on_disk.columns[0].title, before.columns[0].title);
        assert_eq!(on_disk.columns[0].cards.len(), 1);
        assert_eq!(on_disk.columns[0].cards[0].text, "real");
        assert!(on_disk.columns[0].cards[0].people.is_empty());
    }

    #[test]
    fn test_move_card_to_same_column_is_guarded() {
        let (mut app, _home) = temp_app();
        app.create_workspace("Guard").unwrap();
        let todo = column_id(&app, 0);
        app.add_card(&todo, Card::new("a")).unwrap();
        app.add_card(&todo, Card::new("b")).unwrap();
        let first = app.board().unwrap().columns[0].cards[0].id.clone();

        let before = app.board().unwrap().clone();
        let after = app.move_card(&first, &todo, &todo).unwrap();
        assert_eq!(after, &before);
    }

    #[test]
    fn test_update_and_delete_card() {
        let (mut app, _home) = temp_app();
        app.create_workspace("Edit").unwrap();
        let todo = column_id(&app, 0);
        app.add_card(&todo, Card::new("typo")).unwrap();

        let mut card = app.board().unwrap().columns[0].cards[0].clone();
        card.text = "fixed".into();
        app.update_card(&todo, card.clone()).unwrap();
        assert_eq!(app.board().unwrap().columns[0].cards[0], card);

        app.delete_card(&todo, &card.id).unwrap();
        assert!(app.board().unwrap().columns[0].cards.is_empty());
    }

    #[test]
    fn test_settings_are_saved_and_mirrored() {
        let (mut app, _home) = temp_app();
        app.update_settings(Settings {
            folder_path: "/boards".into(),
            dark_theme: false,
            locale: "en".into(),
        })
        .unwrap();
        assert_eq!(app.router().locale(), "en");

        assert!(app.toggle_theme().unwrap());
        assert!(app.router().dark_theme());
        let on_disk = app.storage().load_settings().unwrap();
        assert!(on_disk.dark_theme);
        assert_eq!(on_disk.folder_path, "/boards");

        // New workspaces follow the locale.
        app.create_workspace("English").unwrap();
        assert_eq!(app.board().unwrap().columns[0].title, "To do");
    }
}
