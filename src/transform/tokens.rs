//! Splitting a text leaf into words and stitching rendered words back
//! together with the original spacing.

use super::{Fragment, Inline};

/// Split on U+0020 only, keeping empty tokens.
///
/// Joining the tokens with a single space gives back the input exactly, so
/// leading, trailing and repeated spaces survive a transform.
pub fn split_spaces(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for pos in memchr::memchr_iter(b' ', text.as_bytes()) {
        tokens.push(&text[start..pos]);
        start = pos + 1;
    }
    tokens.push(&text[start..]);
    tokens
}

/// Render every word of `text` with `render_word`.
///
/// Blank tokens (empty, or whitespace such as a newline and indentation)
/// are not words: they and the separating spaces are emitted as literal
/// [`Fragment::Text`], with adjacent literals merged into one.
pub fn render_words<F>(text: &str, mut render_word: F) -> Vec<Fragment>
where
    F: FnMut(&str) -> Vec<Inline>,
{
    let tokens = split_spaces(text);
    let mut fragments = Vec::with_capacity(tokens.len() * 2);
    let mut literal = String::new();

    for (index, token) in tokens.into_iter().enumerate() {
        if index > 0 {
            literal.push(' ');
        }
        if token.trim().is_empty() {
            literal.push_str(token);
            continue;
        }
        if !literal.is_empty() {
            fragments.push(Fragment::Text(std::mem::take(&mut literal)));
        }
        fragments.push(Fragment::Word(render_word(token)));
    }

    if !literal.is_empty() {
        fragments.push(Fragment::Text(literal));
    }
    fragments
}
