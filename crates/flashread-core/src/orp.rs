//! Optimal Recognition Point lookup.

/// Character index of the anchor letter for `word`, by character count.
pub fn orp_index(word: &str) -> usize {
    orp_index_for_len(word.chars().count())
}

pub const fn orp_index_for_len(len: usize) -> usize {
    match len {
        0 | 1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// A word split around its anchor letter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrpSplit<'a> {
    pub left: &'a str,
    /// Exactly one character, or empty when the word has none.
    pub center: &'a str,
    pub right: &'a str,
}

impl OrpSplit<'_> {
    /// Characters before the anchor, used to line the anchor up in a column.
    pub fn left_chars(&self) -> usize {
        self.left.chars().count()
    }
}

pub fn split_orp(word: &str) -> OrpSplit<'_> {
    let target = orp_index(word);

    match word.char_indices().nth(target) {
        Some((start, ch)) => {
            let end = start + ch.len_utf8();
            OrpSplit {
                left: &word[..start],
                center: &word[start..end],
                right: &word[end..],
            }
        }
        None => OrpSplit {
            left: word,
            center: "",
            right: "",
        },
    }
}
