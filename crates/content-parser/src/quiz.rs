//! Multiple choice quiz extraction

use mentorscroll_core::Quiz;

const CORRECT_MARKERS: &[&str] = &["(correct)", "[correct]", "✅", "✓", "✔"];

/// Question text if `line` opens a quiz block
///
/// Accepts `Quiz:` and `Question:` labels, optionally behind emoji or other
/// decoration. The text after the colon may be empty when the question sits on
/// the following line.
pub fn quiz_opening(line: &str) -> Option<&str> {
    let start = line.find(|c: char| c.is_ascii_alphabetic())?;
    let labelled = &line[start..];
    for label in ["quiz", "question"] {
        let Some(prefix) = labelled.get(..label.len()) else {
            continue;
        };
        if !prefix.eq_ignore_ascii_case(label) {
            continue;
        }
        let rest = labelled[label.len()..].trim_start();
        if let Some(text) = rest.strip_prefix(':') {
            return Some(text.trim());
        }
    }
    None
}

/// Option letter index and text for lines like `A) text` or `b. text`
fn option_line(line: &str) -> Option<(usize, &str)> {
    let line = line.strip_prefix('(').unwrap_or(line);
    let mut chars = line.char_indices();
    let (_, letter) = chars.next()?;
    let (sep_at, sep) = chars.next()?;
    if !letter.is_ascii_alphabetic() || !matches!(sep, ')' | '.' | ':') {
        return None;
    }
    let index = (letter.to_ascii_uppercase() as u8).checked_sub(b'A')? as usize;
    if index > 5 {
        return None;
    }
    let text = line[sep_at + sep.len_utf8()..].trim();
    if text.is_empty() {
        return None;
    }
    Some((index, text))
}

/// Letter named by an `Answer: B` style line
fn answer_line(line: &str) -> Option<usize> {
    let lower = line.to_ascii_lowercase();
    let rest = ["correct answer", "answer", "correct"]
        .iter()
        .find_map(|label| lower.strip_prefix(label))?;
    let rest = rest.trim_start().strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('(').unwrap_or(rest);
    let letter = rest.chars().next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    Some((letter.to_ascii_uppercase() as u8 - b'A') as usize)
}

/// Removes a correct-answer marker, reporting whether one was present
fn strip_correct_marker(text: &str) -> (String, bool) {
    for marker in CORRECT_MARKERS {
        if let Some(pos) = text.find(marker) {
            let mut cleaned = String::with_capacity(text.len());
            cleaned.push_str(&text[..pos]);
            cleaned.push_str(&text[pos + marker.len()..]);
            return (cleaned.trim().to_string(), true);
        }
    }
    (text.to_string(), false)
}

/// Parses the lines following a quiz opening
///
/// Returns the quiz, if a valid one was found, and how many of `rest` were
/// consumed.
pub fn parse_quiz(opening: &str, rest: &[&str]) -> (Option<Quiz>, usize) {
    let mut consumed = 0;
    let mut question = opening.to_string();

    if question.is_empty() {
        if let Some(line) = rest.first() {
            if option_line(line).is_none() {
                question = line.to_string();
                consumed += 1;
            }
        }
    }

    let mut options = Vec::new();
    let mut correct = None;

    while let Some(line) = rest.get(consumed) {
        let Some((_, text)) = option_line(line) else {
            break;
        };
        let (text, marked) = strip_correct_marker(text);
        if marked && correct.is_none() {
            correct = Some(options.len());
        }
        options.push(text);
        consumed += 1;
    }

    if let Some(line) = rest.get(consumed) {
        if let Some(letter) = answer_line(line) {
            correct = correct.or(Some(letter));
            consumed += 1;
        }
    }

    if question.is_empty() || options.len() < 2 {
        return (None, consumed);
    }

    let quiz = correct.and_then(|c| Quiz::new(question, options, c));
    if quiz.is_none() {
        log::debug!("Quiz block without a usable answer was dropped");
    }
    (quiz, consumed)
}
