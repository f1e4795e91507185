//! Token cleaning rules shared by segmentation and display helpers.

use alloc::{string::String, vec::Vec};

const DASHES: [char; 8] = [
    '-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
];

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

pub fn is_dash(ch: char) -> bool {
    DASHES.contains(&ch)
}

/// Characters that survive cleaning: letters, digits, apostrophes and the
/// terminal punctuation that carries reading rhythm.
pub fn is_kept(ch: char) -> bool {
    ch.is_alphabetic()
        || ch.is_ascii_digit()
        || matches!(ch, '\'' | '\u{2019}' | '.' | ',' | '!' | '?')
}

/// Strips one whitespace-free token. Dashes are removed outright, so
/// hyphenated compounds collapse into a single word.
pub fn clean_token(token: &str) -> Option<String> {
    let cleaned: String = token
        .chars()
        .filter(|&ch| !is_dash(ch) && is_kept(ch))
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Splits raw text on whitespace and cleans every token, dropping the ones
/// that end up empty.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(clean_token).collect()
}

/// Display-smoothing transform that spells out numbers.
///
/// Decimals are spelled digit by digit (`2.75` becomes `two point seven
/// five`), standalone single digits become words, multi-digit integers stay
/// as they are. Hyphens turn into spaces. Independent from [`tokenize`].
pub fn spell_out_tokens(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0usize;

    while i < chars.len() {
        let ch = chars[i];
        if !ch.is_ascii_digit() {
            out.push(if ch == '-' { ' ' } else { ch });
            i += 1;
            continue;
        }

        let int_end = digit_run_end(&chars, i);
        let is_decimal = int_end + 1 < chars.len()
            && chars[int_end] == '.'
            && chars[int_end + 1].is_ascii_digit();

        if is_decimal {
            let frac_end = digit_run_end(&chars, int_end + 1);
            push_spelled_digits(&mut out, &chars[i..int_end]);
            out.push_str(" point ");
            push_spelled_digits(&mut out, &chars[int_end + 1..frac_end]);
            i = frac_end;
            continue;
        }

        let standalone = int_end - i == 1
            && !(i > 0 && is_word_char(chars[i - 1]))
            && !chars.get(int_end).copied().is_some_and(is_word_char);

        if standalone {
            push_spelled_digits(&mut out, &chars[i..int_end]);
        } else {
            out.extend(&chars[i..int_end]);
        }
        i = int_end;
    }

    out.split_whitespace().map(String::from).collect()
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn push_spelled_digits(out: &mut String, digits: &[char]) {
    for (n, digit) in digits.iter().enumerate() {
        if n > 0 {
            out.push(' ');
        }
        match digit.to_digit(10) {
            Some(value) => out.push_str(DIGIT_WORDS[value as usize]),
            None => out.push(*digit),
        }
    }
}
