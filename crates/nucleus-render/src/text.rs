//! Label wrapping under a character budget.
//!
//! Greedy word packing: words are never split, a word longer than the budget gets a line of its
//! own, and lengths are counted in Unicode scalar values.

use std::borrow::Cow;
use std::iter::FusedIterator;
use std::str::SplitWhitespace;

/// Wraps `text` into lines of at most `max_chars` characters.
///
/// Text that already fits is yielded once, unchanged. Blank text yields nothing.
pub fn wrap_label(text: &str, max_chars: usize) -> WrapLabel<'_> {
    let mode = if text.trim().is_empty() {
        Mode::Done
    } else if text.chars().count() <= max_chars {
        Mode::Whole(text)
    } else {
        Mode::Words {
            words: text.split_whitespace(),
            carry: None,
        }
    };
    WrapLabel { mode, max_chars }
}

#[derive(Debug, Clone)]
pub struct WrapLabel<'a> {
    mode: Mode<'a>,
    max_chars: usize,
}

#[derive(Debug, Clone)]
enum Mode<'a> {
    Done,
    Whole(&'a str),
    Words {
        words: SplitWhitespace<'a>,
        carry: Option<&'a str>,
    },
}

impl<'a> Iterator for WrapLabel<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.mode {
            Mode::Done => None,
            Mode::Whole(text) => {
                let text = *text;
                self.mode = Mode::Done;
                Some(Cow::Borrowed(text))
            }
            Mode::Words { words, carry } => {
                let Some(first) = carry.take().or_else(|| words.next()) else {
                    self.mode = Mode::Done;
                    return None;
                };
                let mut line = String::from(first);
                let mut len = first.chars().count();
                for word in words.by_ref() {
                    let word_len = word.chars().count();
                    if len + 1 + word_len <= self.max_chars {
                        line.push(' ');
                        line.push_str(word);
                        len += 1 + word_len;
                    } else {
                        *carry = Some(word);
                        break;
                    }
                }
                Some(Cow::Owned(line))
            }
        }
    }
}

impl FusedIterator for WrapLabel<'_> {}
