//! Which screen is showing, which workspace is selected, and the settings the
//! presentation layer reads (theme, locale, folder).
//!
//! The state is a plain value published through a `watch` channel; a front
//! end subscribes and re-renders whenever it changes.

use tokio::sync::watch;

use crate::types::Settings;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Workspaces,
    Board,
    Settings,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterState {
    pub screen: Screen,
    pub selected_workspace_id: Option<String>,
    /// Where `back()` leads from the settings screen.
    pub return_to: Screen,
    pub folder_path: String,
    pub dark_theme: bool,
    pub locale: String,
}

#[derive(Debug)]
pub struct Router {
    tx: watch::Sender<RouterState>,
}

impl Router {
    pub fn new(settings: &Settings) -> Self {
        let state = RouterState {
            screen: Screen::Workspaces,
            selected_workspace_id: None,
            return_to: Screen::Workspaces,
            folder_path: settings.folder_path.clone(),
            dark_theme: settings.dark_theme,
            locale: settings.locale.clone(),
        };
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<RouterState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> RouterState {
        self.tx.borrow().clone()
    }

    pub fn screen(&self) -> Screen {
        self.tx.borrow().screen
    }

    pub fn selected_workspace_id(&self) -> Option<String> {
        self.tx.borrow().selected_workspace_id.clone()
    }

    pub fn dark_theme(&self) -> bool {
        self.tx.borrow().dark_theme
    }

    pub fn locale(&self) -> String {
        self.tx.borrow().locale.clone()
    }

    pub fn folder_path(&self) -> String {
        self.tx.borrow().folder_path.clone()
    }

    /// Switches screens. The board screen needs a selected workspace; without
    /// one it falls through to the workspace list.
    pub fn navigate(&self, screen: Screen) {
        self.tx.send_modify(|state| {
            let target = match screen {
                Screen::Board if state.selected_workspace_id.is_none() => {
                    tracing::debug!("no workspace selected, showing workspace list");
                    Screen::Workspaces
                }
                other => other,
            };
            if target == Screen::Settings && state.screen != Screen::Settings {
                state.return_to = state.screen;
            }
            state.screen = target;
        });
    }

    /// Selects a workspace and shows its board.
    pub fn open_workspace(&self, workspace_id: &str) {
        self.tx.send_modify(|state| {
            state.selected_workspace_id = Some(workspace_id.to_string());
            state.screen = Screen::Board;
        });
    }

    pub fn open_settings(&self) {
        self.navigate(Screen::Settings);
    }

    /// Board goes back to the list (the selection is kept); settings go back
    /// to wherever they were opened from.
    pub fn back(&self) {
        let (screen, return_to) = {
            let state = self.tx.borrow();
            (state.screen, state.return_to)
        };
        let target = match screen {
            Screen::Workspaces | Screen::Board => Screen::Workspaces,
            Screen::Settings => return_to,
        };
        self.navigate(target);
    }

    /// Forgets the selection, e.g. after its workspace was deleted.
    pub fn clear_selection(&self) {
        self.tx.send_modify(|state| {
            state.selected_workspace_id = None;
            if state.screen == Screen::Board {
                state.screen = Screen::Workspaces;
            }
        });
    }

    pub fn apply_settings(&self, settings: &Settings) {
        self.tx.send_modify(|state| {
            state.folder_path = settings.folder_path.clone();
            state.dark_theme = settings.dark_theme;
            state.locale = settings.locale.clone();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            folder_path: "/home/test".into(),
            dark_theme: false,
            locale: "en".into(),
        }
    }

    #[test]
    fn test_starts_on_workspace_list() {
        let router = Router::new(&settings());
        assert_eq!(router.screen(), Screen::Workspaces);
        assert_eq!(router.selected_workspace_id(), None);
        assert_eq!(router.locale(), "en");
        assert_eq!(router.folder_path(), "/home/test");
        assert!(!router.dark_theme());
    }

    #[test]
    fn test_board_without_selection_redirects() {
        let router = Router::new(&settings());
        router.navigate(Screen::Board);
        assert_eq!(router.screen(), Screen::Workspaces);
    }

    #[test]
    fn test_open_workspace_and_back() {
        let router = Router::new(&settings());
        router.open_workspace("w1");
        assert_eq!(router.screen(), Screen::Board);
        assert_eq!(router.selected_workspace_id().as_deref(), Some("w1"));

        router.back();
        assert_eq!(router.screen(), Screen::Workspaces);
        // Back keeps the selection around.
        assert_eq!(router.selected_workspace_id().as_deref(), Some("w1"));

        router.navigate(Screen::Board);
        assert_eq!(router.screen(), Screen::Board);
    }

    #[test]
    fn test_settings_return_to_origin() {
        let router = Router::new(&settings());
        router.open_workspace("w1");
        router.open_settings();
        assert_eq!(router.screen(), Screen::Settings);
        router.back();
        assert_eq!(router.screen(), Screen::Board);

        router.back();
        router.open_settings();
        router.open_settings();
        router.back();
        assert_eq!(router.screen(), Screen::Workspaces);
    }

    #[test]
    fn test_clear_selection_leaves_board() {
        let router = Router::new(&settings());
        router.open_workspace("w1");
        router.clear_selection();
        assert_eq!(router.screen(), Screen::Workspaces);
        router.navigate(Screen::Board);
        assert_eq!(router.screen(), Screen::Workspaces);
    }

    #[test]
    fn test_apply_settings_mirrors_values() {
        let router = Router::new(&settings());
        router.apply_settings(&Settings {
            folder_path: "/data".into(),
            dark_theme: true,
            locale: "ru".into(),
        });
        assert!(router.dark_theme());
        assert_eq!(router.locale(), "ru");
        assert_eq!(router.folder_path(), "/data");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let router = Router::new(&settings());
        let mut rx = router.subscribe();

        router.open_workspace("w9");
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.screen, Screen::Board);
        assert_eq!(seen.selected_workspace_id.as_deref(), Some("w9"));
    }
}
