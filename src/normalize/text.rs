/// Lowercases and folds every non-alphanumeric run into a single space, so
/// `"B.S."`, `"b s"` and `"  b-s "` all normalize to `"b s"`.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !folded.is_empty() {
                folded.push(' ');
            }
            pending_space = false;
            folded.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    folded
}

/// Word-bounded containment: `phrase` must start and end on word boundaries
/// inside `text`. Both sides are folded first.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let phrase = fold(phrase);
    if phrase.is_empty() {
        return false;
    }
    let haystack = format!(" {} ", fold(text));
    haystack.contains(&format!(" {phrase} "))
}

/// Word-start containment: `keyword` must begin on a word boundary but may
/// run into a longer word (`car` matches `cars`).
pub fn mentions(text: &str, keyword: &str) -> bool {
    let keyword = fold(keyword);
    if keyword.is_empty() {
        return false;
    }
    let haystack = format!(" {}", fold(text));
    haystack.contains(&format!(" {keyword}"))
}

pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased, trimmed, with trailing sentence punctuation removed.
pub fn clean_reply(text: &str) -> String {
    text.trim()
        .trim_end_matches(['.', '!', '?', ',', ';'])
        .trim()
        .to_lowercase()
}
