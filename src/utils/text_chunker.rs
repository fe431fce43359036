/// Punctuation that ends a fragment only when whitespace or the end of text follows,
/// so `1.5`, `10,000` and `10:30` stay intact
const BREAK_BEFORE_SPACE: &[char] = &['.', '!', '?', ';', ':', ','];

/// Characters that always end a fragment
const BREAK_ALWAYS: &[char] = &['\n', '。', '！', '？', '；', '：', '，', '、'];

/// Split text into fragments of at most `max_chars` characters for synthesis.
///
/// Text that already fits is returned as written, only trimmed. Longer text
/// breaks after sentence punctuation where possible, then between words, and
/// is cut inside a word only when that word alone exceeds the limit. The
/// original separators are kept inside each fragment. Fragments with no
/// alphanumeric content are dropped.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    if !has_words(text) {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut units: Vec<String> = Vec::new();
    for fragment in sentence_fragments(text) {
        if fragment.trim_end().chars().count() <= max_chars {
            units.push(fragment.to_string());
            continue;
        }
        for word in fragment.split_inclusive(char::is_whitespace) {
            let core = word.trim_end();
            let chars: Vec<char> = core.chars().collect();
            if chars.len() <= max_chars {
                units.push(word.to_string());
                continue;
            }
            let mut pieces: Vec<String> = chars
                .chunks(max_chars)
                .map(|piece| piece.iter().collect())
                .collect();
            if let Some(last) = pieces.last_mut() {
                last.push_str(&word[core.len()..]);
            }
            units.extend(pieces);
        }
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for unit in units {
        let candidate_len = current.chars().count() + unit.trim_end().chars().count();
        if !current.trim().is_empty() && candidate_len > max_chars {
            chunks.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(&unit);
    }
    chunks.push(current.trim().to_string());

    chunks.retain(|chunk| has_words(chunk));
    chunks
}

fn has_words(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// Slices of `text` that end after a break character and the whitespace following it
fn sentence_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let breaks = BREAK_ALWAYS.contains(&c)
            || (BREAK_BEFORE_SPACE.contains(&c) && next.map_or(true, char::is_whitespace));
        if !breaks {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            end = j + w.len_utf8();
            chars.next();
        }
        fragments.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        fragments.push(&text[start..]);
    }

    fragments
}
