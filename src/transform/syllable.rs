//! Syllable splitting: show pronounceable chunks of a word separated by `•`.

use super::{Inline, WordTransform};

/// Glyph placed between syllable chunks.
pub const SYLLABLE_SEPARATOR: char = '•';

/// Strategy turning a word into ordered chunks.
///
/// Concatenating the chunks must give back the word. An empty result means
/// "no split found" and the word is shown unchanged.
pub trait SyllableSplitter {
    fn split<'w>(&self, word: &'w str) -> Vec<&'w str>;
}

/// Heuristic splitter keyed on runs of the vowels `a e i o u y`
/// (ASCII, any case).
///
/// A chunk is any non-vowels, then a run of vowels, then either all the
/// remaining characters when none of them is a vowel, or a single non-vowel
/// when the character after it is also a non-vowel. `garden` splits as
/// `gar`/`den`, `fantastic` as `fan`/`tas`/`tic`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelRunSplitter;

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

impl SyllableSplitter for VowelRunSplitter {
    fn split<'w>(&self, word: &'w str) -> Vec<&'w str> {
        let chars: Vec<(usize, bool)> = word.char_indices().map(|(i, c)| (i, is_vowel(c))).collect();
        let n = chars.len();
        let offset = |i: usize| chars.get(i).map_or(word.len(), |&(byte, _)| byte);
        let vowel = |i: usize| chars[i].1;

        let mut chunks = Vec::new();
        let mut start = 0;
        while let Some(first_vowel) = (start..n).find(|&i| vowel(i)) {
            let mut end = (first_vowel..n).find(|&i| !vowel(i)).unwrap_or(n);
            if (end..n).all(|i| !vowel(i)) {
                end = n;
            } else if end + 1 < n && !vowel(end + 1) {
                end += 1;
            }
            chunks.push(&word[offset(start)..offset(end)]);
            start = end;
        }
        // Once no vowel is left the trailing non-vowels join the previous
        // chunk, so `start` only stops short of `n` when there was no vowel
        // at all and `chunks` is empty.
        chunks
    }
}

/// Join chunks with [`SYLLABLE_SEPARATOR`].
pub fn join_syllables(chunks: &[&str]) -> String {
    let mut sep = [0u8; 4];
    chunks.join(SYLLABLE_SEPARATOR.encode_utf8(&mut sep))
}

/// Word transform rendering the word with separators between chunks.
pub struct Syllables<'a> {
    splitter: &'a dyn SyllableSplitter,
}

impl<'a> Syllables<'a> {
    pub fn new(splitter: &'a dyn SyllableSplitter) -> Self {
        Self { splitter }
    }
}

impl WordTransform for Syllables<'_> {
    fn render(&self, word: &str) -> Vec<Inline> {
        let chunks = self.splitter.split(word);
        let text = if chunks.is_empty() {
            word.to_string()
        } else {
            join_syllables(&chunks)
        };
        vec![Inline::Plain(text)]
    }
}
