/// Locales offered in settings, with their display names.
pub const AVAILABLE_LOCALES: [(&str, &str); 5] = [
    ("en", "English"),
    ("ru", "Русский"),
    ("es", "Español"),
    ("fr", "Français"),
    ("de", "Deutsch"),
];

pub fn is_supported(locale: &str) -> bool {
    AVAILABLE_LOCALES.iter().any(|(tag, _)| *tag == locale)
}

pub fn display_name(locale: &str) -> &str {
    AVAILABLE_LOCALES
        .iter()
        .find(|(tag, _)| *tag == locale)
        .map(|(_, name)| *name)
        .unwrap_or(locale)
}

/// Titles of the columns every new board starts with.
pub fn default_column_titles(locale: &str) -> [&'static str; 3] {
    match locale {
        "ru" => ["Сделать", "В прогрессе", "Готово"],
        _ => ["To do", "In progress", "Done"],
    }
}

/// Title given to a board whose workspace document has gone missing.
pub fn fallback_board_title(locale: &str) -> &'static str {
    match locale {
        "ru" => "Новая доска",
        _ => "New Board",
    }
}
