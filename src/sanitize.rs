//! Text repair shared by the generation pipeline and the `repair` command.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Separates the front and back of a card.
pub const DELIMITER: char = ';';

/// Replaces every delimiter after the first one on a line.
pub const JOINER: &str = ",";

/// Extension of generated card files, matched case-insensitively by `repair`.
pub const CSV_EXTENSION: &str = "csv";

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("filename pattern is valid"));

/// Keeps the first delimiter of a line and turns every later one into the joiner.
///
/// Lines with zero or one delimiter come back borrowed and unchanged.
pub fn repair_line(line: &str) -> Cow<'_, str> {
    let Some((front, back)) = line.split_once(DELIMITER) else {
        return Cow::Borrowed(line);
    };
    if !back.contains(DELIMITER) {
        return Cow::Borrowed(line);
    }

    let mut fixed = String::with_capacity(line.len());
    fixed.push_str(front);
    fixed.push(DELIMITER);
    fixed.push_str(&back.replace(DELIMITER, JOINER));
    Cow::Owned(fixed)
}

/// Repairs freshly generated model output.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Blank lines are dropped and
/// the remaining lines are joined with `\n`, without a trailing newline.
pub fn sanitize_csv_content(content: &str) -> String {
    content
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(repair_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Maps a topic to a file base name made of ASCII letters, digits and single
/// inner underscores.
pub fn sanitize_filename(name: &str) -> String {
    NON_ALPHANUMERIC_RUN
        .replace_all(name.trim(), "_")
        .trim_matches('_')
        .to_string()
}
