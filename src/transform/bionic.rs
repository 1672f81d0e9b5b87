//! Bionic reading: bold the first half of every word.

use super::{Inline, WordTransform};

/// Split a word into its bold prefix (`ceil(len / 2)` characters) and the
/// plain remainder.
pub fn split_bionic(word: &str) -> (&str, &str) {
    let bold_chars = word.chars().count().div_ceil(2);
    let cut = word
        .char_indices()
        .nth(bold_chars)
        .map_or(word.len(), |(offset, _)| offset);
    word.split_at(cut)
}

/// Word transform rendering `<b>prefix</b>suffix`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bionic;

impl WordTransform for Bionic {
    fn render(&self, word: &str) -> Vec<Inline> {
        let (bold, plain) = split_bionic(word);
        let mut out = vec![Inline::Bold(bold.to_string())];
        if !plain.is_empty() {
            out.push(Inline::Plain(plain.to_string()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_reading() {
        assert_eq!(split_bionic("Reading"), ("Read", "ing"));
    }

    #[test]
    fn test_split_short_words() {
        assert_eq!(split_bionic("a"), ("a", ""));
        assert_eq!(split_bionic("to"), ("t", "o"));
        assert_eq!(split_bionic("the"), ("th", "e"));
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        assert_eq!(split_bionic("élan"), ("él", "an"));
        assert_eq!(split_bionic("日本語"), ("日本", "語"));
    }

    #[test]
    fn test_render_single_letter_has_no_plain_part() {
        assert_eq!(Bionic.render("I"), vec![Inline::Bold("I".into())]);
    }

    proptest! {
        #[test]
        fn prop_split_reconstructs_word(word in "\\PC{1,20}") {
            let (bold, plain) = split_bionic(&word);
            prop_assert_eq!(format!("{bold}{plain}"), word.clone());
            prop_assert_eq!(bold.chars().count(), word.chars().count().div_ceil(2));
        }
    }
}
