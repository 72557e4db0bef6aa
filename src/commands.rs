//! Terminal front end: turns parsed commands into application intents and
//! prints the resulting snapshots.

use chrono::Local;
use colored::{ColoredString, Colorize};
use dialoguer::{Confirm, Input, Select};

use crate::app::App;
use crate::board;
use crate::cli::{CardCommand, CardFields, Cli, ColumnCommand, Command, PersonCommand};
use crate::color::Rgba;
use crate::error::{ServiceError, ServiceResult};
use crate::locale;
use crate::metadata::{PKG_NAME, PKG_VERSION};
use crate::storage::Storage;
use crate::types::{Board, Card, Settings, Workspace};

pub async fn run(cli: Cli) -> ServiceResult<()> {
    if let Command::Version = cli.command {
        println!("{PKG_NAME} {PKG_VERSION}");
        return Ok(());
    }

    let storage = match cli.home {
        Some(home) => Storage::in_home(home)?,
        None => Storage::new()?,
    };
    let mut app = App::open(storage)?;

    match cli.command {
        Command::Workspaces => print_workspaces(&app.workspaces()),
        Command::Create { title } => {
            let created = app.create_workspace(&title)?;
            println!("{} {}", "created".green(), created.id.dimmed());
            if let Some(board) = app.board() {
                print_board(board);
            }
        }
        Command::Rename { workspace, title } => {
            let id = resolve_workspace(&app, &workspace)?;
            let renamed = app.rename_workspace(&id, &title)?;
            println!("{} {}", "renamed".green(), renamed.title.bold());
        }
        Command::Delete { workspace } => {
            let id = resolve_workspace(&app, &workspace)?;
            app.delete_workspace(&id)?;
            println!("{} {}", "deleted".red(), id.dimmed());
        }
        Command::Board { workspace } => {
            let id = resolve_workspace(&app, &workspace)?;
            print_board(app.open_board(&id).await?);
        }
        Command::Column(command) => run_column(&mut app, command).await?,
        Command::Card(command) => run_card(&mut app, command).await?,
        Command::Person(command) => run_person(&mut app, command).await?,
        Command::Settings => print_settings(app.settings()),
        Command::Theme => {
            let dark = app.toggle_theme()?;
            println!("theme: {}", if dark { "dark" } else { "light" });
        }
        Command::Config => edit_settings(&mut app)?,
        Command::Version => unreachable!("handled above"),
    }
    Ok(())
}

async fn run_column(app: &mut App, command: ColumnCommand) -> ServiceResult<()> {
    let board = match command {
        ColumnCommand::Add { workspace, title } => {
            open(app, &workspace).await?;
            app.add_column(&title)?
        }
        ColumnCommand::Rename {
            workspace,
            column,
            title,
        } => {
            let column = resolve_column(open(app, &workspace).await?, &column)?;
            app.rename_column(&column, &title)?
        }
        ColumnCommand::Delete { workspace, column } => {
            let column = resolve_column(open(app, &workspace).await?, &column)?;
            app.delete_column(&column)?
        }
        ColumnCommand::Move {
            workspace,
            column,
            index,
        } => {
            let column = resolve_column(open(app, &workspace).await?, &column)?;
            app.move_column(&column, index)?
        }
    };
    print_board(board);
    Ok(())
}

async fn run_card(app: &mut App, command: CardCommand) -> ServiceResult<()> {
    let board = match command {
        CardCommand::Add {
            workspace,
            column,
            text,
            fields,
        } => {
            let column = resolve_column(open(app, &workspace).await?, &column)?;
            app.add_card(&column, apply_fields(Card::new(text), fields))?
        }
        CardCommand::Edit {
            workspace,
            card,
            text,
            fields,
        } => {
            let (column, mut current) = resolve_card(open(app, &workspace).await?, &card)?;
            if let Some(text) = text {
                current.text = text;
            }
            app.update_card(&column, apply_fields(current, fields))?
        }
        CardCommand::Delete { workspace, card } => {
            let (column, current) = resolve_card(open(app, &workspace).await?, &card)?;
            app.delete_card(&column, &current.id)?
        }
        CardCommand::Move {
            workspace,
            card,
            to,
            index,
        } => {
            let board = open(app, &workspace).await?;
            let (source, current) = resolve_card(board, &card)?;
            let target = resolve_column(board, &to)?;
            match index {
                Some(index) => app.move_card_to(&current.id, &source, &target, index)?,
                None => app.move_card(&current.id, &source, &target)?,
            }
        }
    };
    print_board(board);
    Ok(())
}

async fn run_person(app: &mut App, command: PersonCommand) -> ServiceResult<()> {
    let board = match command {
        PersonCommand::Add {
            workspace,
            card,
            name,
        } => {
            let (column, current) = resolve_card(open(app, &workspace).await?, &card)?;
            app.add_person(&column, &current.id, &name)?
        }
        PersonCommand::Remove {
            workspace,
            card,
            person,
        } => {
            let (column, current) = resolve_card(open(app, &workspace).await?, &card)?;
            let person = resolve(
                "person",
                &person,
                current.people.iter().map(|p| (p.id.as_str(), p.name.as_str())),
            )?;
            app.remove_person(&column, &current.id, &person)?
        }
    };
    print_board(board);
    Ok(())
}

async fn open<'a>(app: &'a mut App, workspace: &str) -> ServiceResult<&'a Board> {
    let id = resolve_workspace(app, workspace)?;
    Ok(app.open_board(&id).await?)
}

fn apply_fields(mut card: Card, fields: CardFields) -> Card {
    if let Some(description) = fields.description {
        card.description = description;
    }
    if let Some(difficulty) = fields.difficulty {
        card.difficulty = difficulty;
    }
    if let Some(color) = fields.color {
        card.color = color;
    }
    if fields.clear_deadline {
        card.deadline = None;
    } else if let Some(deadline) = fields.deadline {
        card.deadline = Some(deadline);
    }
    card
}

// Lookup

fn resolve_workspace(app: &App, wanted: &str) -> ServiceResult<String> {
    let workspaces = app.workspaces();
    resolve(
        "workspace",
        wanted,
        workspaces.iter().map(|w| (w.id.as_str(), w.title.as_str())),
    )
}

fn resolve_column(board: &Board, wanted: &str) -> ServiceResult<String> {
    resolve(
        "column",
        wanted,
        board.columns.iter().map(|c| (c.id.as_str(), c.title.as_str())),
    )
}

/// Returns the owning column id and a copy of the card.
fn resolve_card(board: &Board, wanted: &str) -> ServiceResult<(String, Card)> {
    let cards = board
        .columns
        .iter()
        .flat_map(|c| c.cards.iter().map(|card| (card.id.as_str(), card.text.as_str())));
    let id = resolve("card", wanted, cards)?;
    board::find_card(board, &id)
        .map(|(column, card)| (column.id.clone(), card.clone()))
        .ok_or_else(|| ServiceError::Lookup(format!("card not found: {wanted}")))
}

/// Matches `wanted` against `(id, name)` pairs: exact id, then unique id
/// prefix, then unique case-insensitive name.
fn resolve<'a>(
    kind: &str,
    wanted: &str,
    candidates: impl Iterator<Item = (&'a str, &'a str)>,
) -> ServiceResult<String> {
    let candidates: Vec<_> = candidates.collect();
    if let Some((id, _)) = candidates.iter().find(|(id, _)| *id == wanted) {
        return Ok(id.to_string());
    }

    let upper = wanted.to_uppercase();
    let by_prefix: Vec<_> = candidates
        .iter()
        .filter(|(id, _)| id.to_uppercase().starts_with(&upper))
        .collect();
    let by_name: Vec<_> = candidates
        .iter()
        .filter(|(_, name)| name.to_lowercase() == wanted.to_lowercase())
        .collect();

    match (by_prefix.as_slice(), by_name.as_slice()) {
        ([(id, _)], _) | ([], [(id, _)]) => Ok(id.to_string()),
        ([], []) => Err(ServiceError::Lookup(format!("no {kind} matches '{wanted}'"))),
        _ => Err(ServiceError::Lookup(format!(
            "'{wanted}' matches more than one {kind}, use a longer id"
        ))),
    }
}

// Output

fn swatch(color: Rgba) -> ColoredString {
    "●".truecolor(color.red(), color.green(), color.blue())
}

fn print_workspaces(workspaces: &[Workspace]) {
    if workspaces.is_empty() {
        println!("{}", "no workspaces yet, try `zingo create <title>`".dimmed());
        return;
    }
    for workspace in workspaces {
        println!(
            "{}  {}  {}",
            workspace.id.dimmed(),
            workspace.title.bold(),
            workspace.create_date.to_string().dimmed()
        );
    }
}

fn print_board(board: &Board) {
    println!("{} {}", board.title.bold().underline(), board.id.dimmed());
    for column in &board.columns {
        println!();
        println!(
            "{} {} {}",
            column.title.bold(),
            format!("({})", column.cards.len()).dimmed(),
            column.id.dimmed()
        );
        for card in &column.cards {
            print_card(card);
        }
    }
}

fn print_card(card: &Card) {
    let level = card.difficulty;
    let tag = format!("{level:?}").to_uppercase();
    let tint = level.color();
    let mut line = format!(
        "  {} {} {} {}",
        swatch(card.color),
        card.text,
        tag.truecolor(tint.red(), tint.green(), tint.blue()),
        card.id.dimmed()
    );
    if let Some(deadline) = card.deadline {
        let due = deadline.to_string();
        let due = if card.is_overdue(Local::now().date_naive()) {
            due.red()
        } else {
            due.yellow()
        };
        line.push_str(&format!(" due {due}"));
    }
    println!("{line}");
    if !card.description.is_empty() {
        println!("      {}", card.description.italic());
    }
    for person in &card.people {
        println!("      {} {} {}", swatch(person.icon_color), person.name, person.id.dimmed());
    }
}

fn print_settings(settings: &Settings) {
    println!("folder:  {}", settings.folder_path);
    println!("theme:   {}", if settings.dark_theme { "dark" } else { "light" });
    println!(
        "locale:  {} ({})",
        settings.locale,
        locale::display_name(&settings.locale)
    );
}

fn edit_settings(app: &mut App) -> ServiceResult<()> {
    let current = app.settings().clone();

    let folder_path: String = Input::new()
        .with_prompt("Folder")
        .default(current.folder_path.clone())
        .interact_text()?;
    let dark_theme = Confirm::new()
        .with_prompt("Dark theme?")
        .default(current.dark_theme)
        .interact()?;

    let names: Vec<_> = locale::AVAILABLE_LOCALES
        .iter()
        .map(|(tag, name)| format!("{name} ({tag})"))
        .collect();
    let selected = locale::AVAILABLE_LOCALES
        .iter()
        .position(|(tag, _)| *tag == current.locale)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Language")
        .items(&names)
        .default(selected)
        .interact()?;
    let locale = locale::AVAILABLE_LOCALES[choice].0.to_string();

    app.update_settings(Settings {
        folder_path,
        dark_theme,
        locale,
    })?;
    println!("{} {}", "saved".green(), app.storage().settings_path().display());
    Ok(())
}
