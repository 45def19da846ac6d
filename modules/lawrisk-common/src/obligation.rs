use regex::Regex;
use std::sync::LazyLock;

/// Markers of a duty or prohibition in Korean statutory text.
pub const OBLIGATION_KEYWORDS: [&str; 9] = [
    "하여야", "해야", "금지", "의무", "제출", "보고", "비치", "작성", "준수",
];

pub const MAX_HIGHLIGHTS: usize = 2;
pub const MAX_HIGHLIGHT_CHARS: usize = 180;

/// "제1조부터 제5조까지": a placeholder listing a span of articles, not a rule.
static RANGE_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제\s*\d+\s*조\s*부터\s*제\s*\d+\s*조\s*까지").unwrap());

/// A sentence-final character followed by the whitespace run that ends it.
static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.다됨함]\s+").unwrap());

/// Split at every whitespace run that directly follows a sentence-final
/// character. No abbreviation handling.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK_RE.find_iter(text) {
        // keep the terminal character, drop the whitespace
        let terminal_len = text[m.start()..].chars().next().map_or(0, char::len_utf8);
        segments.push(&text[start..m.start() + terminal_len]);
        start = m.end();
    }
    segments.push(&text[start..]);
    segments
}

/// Pick up to [`MAX_HIGHLIGHTS`] sentences of `content` that state an
/// obligation, in source order, each cut to [`MAX_HIGHLIGHT_CHARS`]
/// characters. Empty content and range placeholders yield nothing.
pub fn extract_highlights(content: &str) -> Vec<String> {
    let text = content.trim();
    if text.is_empty() || RANGE_REFERENCE_RE.is_match(text) {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if OBLIGATION_KEYWORDS.iter().any(|k| sentence.contains(k)) {
            hits.push(sentence.chars().take(MAX_HIGHLIGHT_CHARS).collect());
        }
        if hits.len() >= MAX_HIGHLIGHTS {
            break;
        }
    }
    hits
}
