use chrono::Local;

use crate::locale;
use crate::types::{Board, Column, Workspace, new_id};

/// Creates a workspace dated today together with its companion board.
pub fn create_workspace(title: &str, locale: &str) -> (Workspace, Board) {
    let workspace = Workspace {
        id: new_id(),
        title: title.to_string(),
        columns: Vec::new(),
        create_date: Local::now().date_naive(),
    };
    let board = default_board(&workspace.id, title, locale);
    (workspace, board)
}

/// A board seeded with the three starter columns, all empty.
pub fn default_board(id: &str, title: &str, locale: &str) -> Board {
    Board {
        id: id.to_string(),
        title: title.to_string(),
        columns: locale::default_column_titles(locale)
            .into_iter()
            .map(Column::new)
            .collect(),
    }
}

pub fn rename_workspace(workspace: &Workspace, title: &str) -> Workspace {
    Workspace {
        title: title.to_string(),
        ..workspace.clone()
    }
}

pub fn delete_workspace(workspaces: &[Workspace], id: &str) -> Vec<Workspace> {
    workspaces.iter().filter(|w| w.id != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_workspace_with_board() {
        let (workspace, board) = create_workspace("X", "en");

        assert!(!workspace.id.is_empty());
        assert_eq!(workspace.title, "X");
        assert!(workspace.columns.is_empty());
        assert_eq!(workspace.create_date, Local::now().date_naive());

        assert_eq!(board.id, workspace.id);
        assert_eq!(board.title, "X");
        let titles: Vec<_> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To do", "In progress", "Done"]);
        assert!(board.columns.iter().all(|c| c.cards.is_empty()));
    }

    #[test]
    fn test_create_workspace_localized_columns() {
        let (_, board) = create_workspace("Дом", "ru");
        assert_eq!(board.columns[0].title, "Сделать");
        assert_eq!(board.columns.len(), 3);
    }

    #[test]
    fn test_fresh_ids_every_time() {
        let (a, board_a) = create_workspace("A", "en");
        let (b, board_b) = create_workspace("A", "en");
        assert_ne!(a.id, b.id);
        assert_ne!(board_a.columns[0].id, board_b.columns[0].id);
    }

    #[test]
    fn test_rename_and_delete() {
        let (first, _) = create_workspace("First", "en");
        let (second, _) = create_workspace("Second", "en");

        let renamed = rename_workspace(&first, "Renamed");
        assert_eq!(renamed.title, "Renamed");
        assert_eq!(renamed.id, first.id);
        assert_eq!(first.title, "First");

        let remaining = delete_workspace(&[first.clone(), second.clone()], &first.id);
        assert_eq!(remaining, vec![second.clone()]);
        assert_eq!(delete_workspace(&[second.clone()], "nope"), vec![second]);
    }
}
