//! Line cleanup shared by every list-valued field

/// Strip one leading bullet marker (`-`, `•` or `*`) and surrounding
/// whitespace from a line.
///
/// A `*` directly followed by another `*` is bold emphasis, not a bullet,
/// and is left alone. Markdown rule lines (`---`, `***`) clean to "".
pub fn clean_line(line: &str) -> &str {
    let trimmed = line.trim();

    let unbulleted = if let Some(rest) = trimmed.strip_prefix(['-', '•']) {
        rest
    } else if let Some(rest) = trimmed.strip_prefix('*') {
        if rest.starts_with('*') { trimmed } else { rest }
    } else {
        trimmed
    };

    let cleaned = unbulleted.trim();
    if is_rule(cleaned) { "" } else { cleaned }
}

/// Split a block into cleaned, non-empty entries, preserving order
pub fn bullet_list(block: &str) -> Vec<String> {
    block
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_rule(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| matches!(c, '-' | '*' | '_' | '='))
}
