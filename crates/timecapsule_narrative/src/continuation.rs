//! Continuation excerpts carried from one beat into the next.

use timecapsule_core::ContinuationConfig;

const SENTENCE_END: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 6] = ['"', '\'', '\u{201D}', '\u{2019}', ')', ']'];

/// Char offsets at which a sentence begins.
///
/// The first non-whitespace character always begins a sentence. After that,
/// a sentence begins at the first non-whitespace character following a
/// terminator (`.`, `!`, `?`), optional closing quotes or brackets, and at
/// least one whitespace character.
fn sentence_starts(chars: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    if let Some(first) = chars.iter().position(|c| !c.is_whitespace()) {
        starts.push(first);
    }

    let mut i = 0;
    while i < chars.len() {
        if !SENTENCE_END.contains(&chars[i]) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && CLOSERS.contains(&chars[j]) {
            j += 1;
        }
        if j < chars.len() && chars[j].is_whitespace() {
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() {
                starts.push(j);
            }
        }
        i = j.max(i + 1);
    }

    starts
}

/// Select the trailing excerpt of `text` to carry into the next prompt.
///
/// Takes the last `max_chars` characters. If a sentence begins inside that
/// window the excerpt starts there, otherwise the hard cut is kept. With
/// `max_sentences` set, only the last *n* sentences of the excerpt remain.
/// The result is trimmed and never longer than `max_chars` characters.
///
/// # Examples
///
/// ```
/// use timecapsule_core::ContinuationConfig;
/// use timecapsule_narrative::extract_continuation;
///
/// let text = "The fog rolled in. Mr Hartley lit the lamp. The parcel ticked.";
/// let excerpt = extract_continuation(text, &ContinuationConfig::chars(30));
/// assert_eq!(excerpt, "The parcel ticked.");
/// ```
pub fn extract_continuation(text: &str, config: &ContinuationConfig) -> String {
    let max_chars = *config.max_chars();
    if max_chars == 0 || text.trim().is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let window_start = chars.len().saturating_sub(max_chars);
    let starts = sentence_starts(&chars);

    let mut from = starts
        .iter()
        .copied()
        .find(|&s| s >= window_start)
        .unwrap_or(window_start);

    if let Some(limit) = *config.max_sentences() {
        if limit == 0 {
            return String::new();
        }
        let mut excerpt_starts = vec![from];
        excerpt_starts.extend(starts.iter().copied().filter(|&s| s > from));
        if excerpt_starts.len() > limit {
            from = excerpt_starts[excerpt_starts.len() - limit];
        }
    }

    chars[from..].iter().collect::<String>().trim().to_string()
}
