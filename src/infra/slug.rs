//! Slugs and filesystem-safe names.

/// Characters that are invalid in filenames on at least one platform.
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Longest sanitized filename, in characters.
const MAX_FILENAME_CHARS: usize = 100;

/// Converts a note title to a filename-friendly slug.
///
/// - Converts to lowercase
/// - Replaces spaces with hyphens
/// - Keeps letters and digits of any script, hyphens, and underscores
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens
/// - Truncates to 50 characters (at word boundary if possible)
/// - Returns "untitled" for empty results
///
/// # Examples
///
/// ```
/// use noteport::infra::slugify;
///
/// assert_eq!(slugify("Grocery List"), "grocery-list");
/// assert_eq!(slugify("Café Notes!"), "café-notes");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    const MAX_LENGTH: usize = 50;

    let mut slug = String::with_capacity(title.len());
    let mut prev_was_hyphen = true;
    for c in title.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.push(c);
            prev_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !prev_was_hyphen {
            slug.push('-');
            prev_was_hyphen = true;
        }
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        return "untitled".to_string();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= MAX_LENGTH {
        return trimmed.to_string();
    }

    let truncated = &chars[..MAX_LENGTH];
    // Only use a hyphen boundary if it's not too early
    if let Some(last_hyphen) = truncated.iter().rposition(|&c| c == '-')
        && last_hyphen > MAX_LENGTH / 2
    {
        return truncated[..last_hyphen].iter().collect();
    }

    truncated
        .iter()
        .collect::<String>()
        .trim_end_matches('-')
        .to_string()
}

/// Makes an arbitrary name safe to use as a single path component.
///
/// Invalid and control characters become `_`, the name is capped at 100
/// characters, and leading/trailing dots and spaces are stripped. Returns
/// `None` when nothing usable is left.
///
/// ```
/// use noteport::infra::sanitize_filename;
///
/// assert_eq!(sanitize_filename("a/b:c.png").as_deref(), Some("a_b_c.png"));
/// assert_eq!(sanitize_filename(" .. "), None);
/// ```
pub fn sanitize_filename(name: &str) -> Option<String> {
    let replaced: String = name
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect();

    let trimmed = replaced.trim_matches(|c| c == '.' || c == ' ');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Markdown filename for a note title.
pub fn note_filename(title: &str) -> String {
    format!("{}.md", slugify(title))
}
