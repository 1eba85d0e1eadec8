//! Final text cleanup.

use regex::Regex;
use std::sync::LazyLock;

/// Encoding artifacts removed from decoded text, in priority order.
///
/// The first entry is U+FFFC read back through Latin-1.
pub const ARTIFACTS: &[&str] = &["ï¿¼", "\u{0}", "\u{FEFF}"];

/// Lead byte of a UTF-8 encoded U+0080..=U+00BF when read back as Latin-1.
///
/// Only dropped when a continuation character follows, so `Â` as a letter
/// survives.
const LATIN1_LEAD: char = 'Â';

fn is_continuation(c: char) -> bool {
    ('\u{80}'..='\u{BF}').contains(&c)
}

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Removes every [`ARTIFACTS`] occurrence in one left-to-right scan.
///
/// A stray `Â` directly before a character in U+0080..=U+00BF is dropped
/// too, which restores the character it was mis-encoded from (`Â©` becomes
/// `©`). Text left behind by one removal is never rescanned, so a removal
/// cannot assemble a new artifact out of its neighbours.
pub fn remove_artifacts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(artifact) = ARTIFACTS.iter().find(|a| rest.starts_with(**a)) {
            rest = &rest[artifact.len()..];
            continue;
        }
        rest = &rest[c.len_utf8()..];
        if c == LATIN1_LEAD && rest.chars().next().is_some_and(is_continuation) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Optional presentation cleanup applied after [`remove_artifacts`].
///
/// Collapses runs of blank lines and trims the ends. With
/// `normalize_punctuation`, smart quotes and dashes become ASCII and
/// non-breaking spaces become plain spaces.
pub fn tidy(text: &str, normalize_punctuation: bool) -> String {
    let text = if normalize_punctuation {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{00A0}' => ' ',
                other => other,
            })
            .collect()
    } else {
        text.to_string()
    };
    BLANK_LINES.replace_all(&text, "\n\n").trim().to_string()
}
