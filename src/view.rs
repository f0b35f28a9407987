//! Derived view - filtering and Spanish collation over the book collection
//!
//! Matching and ordering ignore case and accents, except that `ñ` stays a
//! letter of its own, sorting between `n` and `o`. Ordering compares base
//! letters only: whitespace sorts before punctuation and symbols, those before
//! digits, and digits before letters.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Book, SortKey};

const COMBINING_TILDE: char = '\u{0303}';

// Primary weight classes, highest byte of a collation element
const CLASS_SPACE: u32 = 1 << 24;
const CLASS_PUNCT: u32 = 2 << 24;
const CLASS_DIGIT: u32 = 3 << 24;
const CLASS_LETTER: u32 = 4 << 24;

/// Lowercase `text` and strip diacritics, keeping `ñ`.
///
/// Letters that carry a stroke or are ligatures have no decomposition, so
/// they are mapped to their base letters by hand.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.nfd() {
        if is_combining_mark(c) {
            if c == COMBINING_TILDE && folded.ends_with('n') {
                folded.pop();
                folded.push('ñ');
            }
            continue;
        }
        for lower in c.to_lowercase() {
            match base_letters(lower) {
                Some(base) => folded.push_str(base),
                None => folded.push(lower),
            }
        }
    }
    folded
}

fn base_letters(c: char) -> Option<&'static str> {
    Some(match c {
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'ħ' => "h",
        'ŧ' => "t",
        'ı' => "i",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        'þ' => "th",
        _ => return None,
    })
}

/// Primary weight of one folded character, `None` for ignorables
fn weight(c: char) -> Option<u32> {
    if c.is_control() {
        return None;
    }
    let w = if c.is_whitespace() {
        CLASS_SPACE | c as u32
    } else if let Some(d) = c.to_digit(10) {
        CLASS_DIGIT | d
    } else if c.is_alphabetic() {
        // Doubled so `ñ` can take the odd slot right after `n`
        match c {
            'ñ' => CLASS_LETTER | (('n' as u32) * 2 + 1),
            c => CLASS_LETTER | ((c as u32) * 2),
        }
    } else if c.is_numeric() {
        CLASS_DIGIT | (10 + c as u32)
    } else {
        CLASS_PUNCT | c as u32
    };
    Some(w)
}

/// Sort key of `text` under Spanish base-letter collation
fn collation_key(text: &str) -> Vec<u32> {
    fold(text).chars().filter_map(weight).collect()
}

/// Whether `book` matches an already folded search term
fn matches(book: &Book, folded_term: &str) -> bool {
    folded_term.is_empty()
        || fold(&book.title).contains(folded_term)
        || fold(&book.author).contains(folded_term)
}

/// Filter `books` by `term` on title or author, then sort by `sort_key`.
///
/// The sort is stable, so books that collate equal keep their server order.
pub fn derive_view(term: &str, sort_key: SortKey, books: &[Book]) -> Vec<Book> {
    let folded_term = fold(term);
    let mut view: Vec<Book> = books
        .iter()
        .filter(|book| matches(book, &folded_term))
        .cloned()
        .collect();

    view.sort_by_cached_key(|book| match sort_key {
        SortKey::Title => collation_key(&book.title),
        SortKey::Author => collation_key(&book.author),
    });
    view
}
