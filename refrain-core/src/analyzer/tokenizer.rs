//! Streaming Tokenizer Module
//!
//! Splits filtered text into words. The input is the output of the
//! normalizer (lowercase words separated by single ASCII spaces), so a token
//! is any run of bytes between spaces.
//!
//! ```ignore
//! "rolling deep fire" → "rolling" "deep" "fire"
//! ```
//!
//! - **Zero Allocation**: tokens are slices of the input
//! - **Streaming**: tokens are handed to a callback
//! - **Fast**: `memchr` scans for the separator byte

use memchr::memchr_iter;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Inline capacity of [`distinct_tokens`]. Short lyrics never spill to the heap.
pub const INLINE_TOKENS: usize = 32;

/// Splits filtered text on ASCII spaces.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes filtered input and emits each word in order.
    ///
    /// Empty runs (from doubled spaces) are skipped.
    #[inline]
    pub fn tokenize<'n, F>(&self, filtered: &'n str, mut emit: F)
    where
        F: FnMut(&'n str),
    {
        debug_assert!(
            !filtered.starts_with(' ') && !filtered.ends_with(' '),
            "tokenizer: edge whitespace, input was not normalized"
        );

        let mut start = 0usize;

        // A space is never a UTF-8 continuation byte, so every split point
        // is a char boundary.
        for i in memchr_iter(b' ', filtered.as_bytes()) {
            if start < i {
                emit(&filtered[start..i]);
            }
            start = i + 1;
        }

        if start < filtered.len() {
            emit(&filtered[start..]);
        }
    }
}

/// Returns each distinct token of `filtered` once, in first-occurrence order.
pub fn distinct_tokens(filtered: &str) -> SmallVec<[&str; INLINE_TOKENS]> {
    let mut out: SmallVec<[&str; INLINE_TOKENS]> = SmallVec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    Tokenizer::new().tokenize(filtered, |text| {
        if seen.insert(text) {
            out.push(text);
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<&str> {
        let mut out = Vec::new();
        Tokenizer::new().tokenize(input, |text| out.push(text));
        out
    }

    #[test]
    fn single_word() {
        assert_eq!(collect("hello"), vec!["hello"]);
    }

    #[test]
    fn words_in_input_order() {
        assert_eq!(collect("set fire to rain"), vec!["set", "fire", "to", "rain"]);
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn inner_double_space_skipped() {
        assert_eq!(collect("a  b"), vec!["a", "b"]);
    }

    #[test]
    fn multibyte_tokens() {
        assert_eq!(collect("café naïve"), vec!["café", "naïve"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        Tokenizer::new().tokenize(&input, |text| {
            let offset = text.as_ptr() as usize - base;
            assert_eq!(&input[offset..offset + text.len()], text);
        });
    }

    #[test]
    fn distinct_keeps_first_occurrence_order() {
        let words = distinct_tokens("love fire love rain fire");
        assert_eq!(words.as_slice(), &["love", "fire", "rain"]);
    }

    #[test]
    fn distinct_with_many_repeats() {
        let text = (0..2_000)
            .map(|i| format!("w{}", i % 100))
            .collect::<Vec<_>>()
            .join(" ");
        let words = distinct_tokens(&text);
        assert_eq!(words.len(), 100);
        assert!(words.spilled());
        assert_eq!(words[0], "w0");
        assert_eq!(words[99], "w99");
    }

    #[test]
    fn distinct_of_empty() {
        assert!(distinct_tokens("").is_empty());
    }
}
