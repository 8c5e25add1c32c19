// crates/content-parser/src/lines.rs
//! Single line recognizers
//!
//! Each function looks at one trimmed, non-empty line. Label matching is
//! ASCII case-insensitive so byte offsets stay valid in the original line.

/// Leading emoji that mark a line as a headline
pub const SIGNAL_EMOJI: &[&str] = &[
    "🤯", "💰", "🏛", "🧠", "🌍", "🚀", "🔬", "⚡", "💻", "🔥", "⚛",
];

/// Emoji that mark a line as the key insight
pub const INSIGHT_EMOJI: &[&str] = &["💡"];

const INSIGHT_LABELS: &[&str] = &["key insight", "takeaway"];

const BULLET_MARKERS: &[char] = &['-', '•'];

/// True if the line opens with a signal emoji
pub fn has_signal_emoji(line: &str) -> bool {
    SIGNAL_EMOJI.iter().any(|e| line.starts_with(e))
}

/// True if the line has letters and none of them are lower case
pub fn is_shouted(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

/// True if the first line of a response reads as a headline
pub fn is_headline(line: &str) -> bool {
    has_signal_emoji(line) || is_shouted(line)
}

/// `Step <n>:` or `<n>.` at line start
pub fn is_step(line: &str) -> bool {
    step_body(line).is_some()
}

/// Text after a step marker, if the line has one
pub fn step_body(line: &str) -> Option<&str> {
    if line.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("step ")) {
        let rest = &line[5..];
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 && rest[digits..].starts_with(':') {
            return Some(rest[digits + 1..].trim_start());
        }
        return None;
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with('.') {
        return Some(line[digits + 1..].trim_start());
    }
    None
}

/// Text after a `-` or `•` marker, if the line has one
pub fn bullet_body(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match chars.next() {
        Some(c) if BULLET_MARKERS.contains(&c) => Some(chars.as_str().trim_start()),
        _ => None,
    }
}

/// Markdown style `#` heading text
pub fn markdown_heading(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

/// Text of a list line with its marker removed, for action item collection
pub fn list_item(line: &str) -> Option<&str> {
    bullet_body(line).or_else(|| step_body(line))
}

/// Byte offset just past the first case-insensitive occurrence of `needle`
fn find_label_end(line: &str, needle: &str) -> Option<usize> {
    let hay = line.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (0..=hay.len() - needle.len())
        .find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
        .map(|i| i + needle.len())
}

/// Drops everything up to `end`, then an optional colon and whitespace
fn after_label(line: &str, end: usize) -> String {
    let rest = line[end..].trim_start();
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    rest.trim().to_string()
}

/// True if the line mentions the word "hook" anywhere
pub fn mentions_hook(line: &str) -> bool {
    find_label_end(line, "hook").is_some()
}

/// Hook text with any leading label removed
pub fn hook_text(line: &str) -> Option<String> {
    find_label_end(line, "hook").map(|end| after_label(line, end))
}

/// Key insight text with its label or emoji removed
pub fn insight_text(line: &str) -> Option<String> {
    for label in INSIGHT_LABELS {
        if let Some(end) = find_label_end(line, label) {
            return Some(after_label(line, end));
        }
    }
    for emoji in INSIGHT_EMOJI {
        if let Some(start) = line.find(emoji) {
            return Some(after_label(line, start + emoji.len()));
        }
    }
    None
}

/// True if the line introduces a list of things to do
pub fn is_action_trigger(line: &str) -> bool {
    find_label_end(line, "action").is_some()
}
