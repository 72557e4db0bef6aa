//! Copy-on-write transforms over a [`Board`] snapshot.
//!
//! Every function borrows the current snapshot and returns a new one; the
//! input is never modified. Unknown column, card or person ids make the
//! operation a no-op, so these are total over any input.

use crate::types::{Board, Card, Column, Person, new_id};

pub fn add_column(board: &Board, title: &str) -> Board {
    let mut next = board.clone();
    next.columns.push(Column::new(title));
    next
}

pub fn rename_column(board: &Board, column_id: &str, title: &str) -> Board {
    let mut next = board.clone();
    if let Some(column) = next.columns.iter_mut().find(|c| c.id == column_id) {
        column.title = title.to_string();
    }
    next
}

/// Removes the column together with its cards.
pub fn delete_column(board: &Board, column_id: &str) -> Board {
    let mut next = board.clone();
    next.columns.retain(|c| c.id != column_id);
    next
}

/// Moves a column to `index` (clamped to the end).
pub fn move_column(board: &Board, column_id: &str, index: usize) -> Board {
    let mut next = board.clone();
    let Some(from) = next.columns.iter().position(|c| c.id == column_id) else {
        return next;
    };
    let column = next.columns.remove(from);
    let to = index.min(next.columns.len());
    next.columns.insert(to, column);
    next
}

/// Appends `card` to the column under a freshly generated id, whatever id the
/// caller supplied.
pub fn add_card(board: &Board, column_id: &str, card: Card) -> Board {
    let mut next = board.clone();
    if let Some(column) = next.columns.iter_mut().find(|c| c.id == column_id) {
        column.cards.push(Card { id: new_id(), ..card });
    }
    next
}

pub fn update_card(board: &Board, column_id: &str, card: Card) -> Board {
    let mut next = board.clone();
    if let Some(slot) = card_mut(&mut next, column_id, &card.id) {
        *slot = card;
    }
    next
}

pub fn delete_card(board: &Board, column_id: &str, card_id: &str) -> Board {
    let mut next = board.clone();
    if let Some(column) = next.columns.iter_mut().find(|c| c.id == column_id) {
        column.cards.retain(|c| c.id != card_id);
    }
    next
}

/// Takes the card out of `source_column_id` and appends it to
/// `target_column_id`.
pub fn move_card(board: &Board, card_id: &str, source_column_id: &str, target_column_id: &str) -> Board {
    move_card_to(board, card_id, source_column_id, target_column_id, usize::MAX)
}

/// Like [`move_card`] but drops the card at `index` in the target column
/// (clamped to the end). Missing card or missing target column: no-op.
pub fn move_card_to(
    board: &Board,
    card_id: &str,
    source_column_id: &str,
    target_column_id: &str,
    index: usize,
) -> Board {
    let mut next = board.clone();
    if !next.columns.iter().any(|c| c.id == target_column_id) {
        return next;
    }
    let Some(source) = next.columns.iter_mut().find(|c| c.id == source_column_id) else {
        return next;
    };
    let Some(position) = source.cards.iter().position(|c| c.id == card_id) else {
        return next;
    };
    let card = source.cards.remove(position);

    if let Some(target) = next.columns.iter_mut().find(|c| c.id == target_column_id) {
        let to = index.min(target.cards.len());
        target.cards.insert(to, card);
    }
    next
}

/// Attaches a person to a card. The person record gets a fresh id; people are
/// scoped to the card that holds them.
pub fn add_person(board: &Board, column_id: &str, card_id: &str, person: Person) -> Board {
    let mut next = board.clone();
    if let Some(card) = card_mut(&mut next, column_id, card_id) {
        card.people.push(Person { id: new_id(), ..person });
    }
    next
}

pub fn remove_person(board: &Board, column_id: &str, card_id: &str, person_id: &str) -> Board {
    let mut next = board.clone();
    if let Some(card) = card_mut(&mut next, column_id, card_id) {
        card.people.retain(|p| p.id != person_id);
    }
    next
}

pub fn count_cards(board: &Board) -> usize {
    board.columns.iter().map(|c| c.cards.len()).sum()
}

/// Finds a card anywhere on the board, returning its column too.
pub fn find_card<'a>(board: &'a Board, card_id: &str) -> Option<(&'a Column, &'a Card)> {
    board
        .columns
        .iter()
        .find_map(|column| column.cards.iter().find(|c| c.id == card_id).map(|card| (column, card)))
}

fn card_mut<'a>(board: &'a mut Board, column_id: &str, card_id: &str) -> Option<&'a mut Card> {
    board
        .columns
        .iter_mut()
        .find(|c| c.id == column_id)?
        .cards
        .iter_mut()
        .find(|c| c.id == card_id)
}
