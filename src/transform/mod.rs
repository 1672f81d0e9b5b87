//! Reading-aid text transforms.
//!
//! A pass walks the text leaves under a root, skips the ones that must not
//! change, and replaces every other leaf with one marker-classed span per
//! word:
//!
//! - **Bionic**: `<span class="bionic-word"><b>Read</b>ing</span>`
//! - **Syllable**: `<span class="syllable-word">gar•den</span>`
//!
//! Spacing between words stays outside the spans, so the visible text is
//! unchanged apart from the syllable separators.
//!
//! ## What is skipped
//!
//! 1. Leaves whose parent is `script`, `style`, `noscript` or `textarea`
//! 2. Leaves that are empty or only whitespace
//! 3. Leaves inside an element that already carries the pass's marker class,
//!    which makes a second pass of the same mode a no-op
//! 4. Leaves that lost their parent between collection and replacement
//!
//! # Example
//!
//! ```
//! use lockfocus::dom::parse_html;
//! use lockfocus::transform::{Mode, Transformer, transform};
//!
//! let mut doc = parse_html("<p>Reading aid</p>");
//! let body = doc.body().unwrap();
//! transform(&mut doc, body, Mode::Bionic, &Transformer::default());
//!
//! let p = doc.find_by_tag("p").unwrap();
//! assert_eq!(
//!     doc.outer_html(p).unwrap(),
//!     "<p><span class=\"bionic-word\"><b>Read</b>ing</span> \
//!      <span class=\"bionic-word\"><b>ai</b>d</span></p>"
//! );
//! ```

mod bionic;
mod syllable;
mod tokens;

pub use bionic::{Bionic, split_bionic};
pub use syllable::{
    SYLLABLE_SEPARATOR, SyllableSplitter, Syllables, VowelRunSplitter, join_syllables,
};
pub use tokens::{render_words, split_spaces};

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId, Scope};
use crate::error::Error;
use crate::settings::ClassNames;

/// Parent tags whose text is never rewritten.
pub const EXCLUDED_TAGS: [&str; 4] = ["script", "style", "noscript", "textarea"];

/// Which transform a pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Bionic,
    Syllable,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Bionic, Mode::Syllable];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Bionic => "bionic",
            Mode::Syllable => "syllable",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = if name == "syllables" { "syllable" } else { name.as_str() };
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// Styled piece inside a word span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Bold(String),
    Plain(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Bold(s) | Inline::Plain(s) => s,
        }
    }
}

/// One piece of a rewritten text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal text left outside any span (spacing).
    Text(String),
    /// A word wrapped in a marker span.
    Word(Vec<Inline>),
}

impl Fragment {
    /// The visible text of this fragment.
    pub fn text(&self) -> String {
        match self {
            Fragment::Text(s) => s.clone(),
            Fragment::Word(parts) => parts.iter().map(Inline::text).collect(),
        }
    }
}

/// Renders a single word (never empty, never blank).
pub trait WordTransform {
    fn render(&self, word: &str) -> Vec<Inline>;
}

/// The operations a pass needs from a tree.
///
/// [`Document`] implements it; anything else that can enumerate text leaves
/// and swap one for a run of siblings can be transformed too.
pub trait TextTree {
    type Node: Copy + Eq;

    /// Text leaves under `root` in document order.
    fn text_leaves(&self, root: Self::Node) -> Vec<Self::Node>;

    fn leaf_text(&self, leaf: Self::Node) -> Option<&str>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Lowercase tag of an element node.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Replace `leaf` with `fragments`, wrapping each word in a span with
    /// class `marker`. Returns `false` (and changes nothing) when the leaf
    /// has no parent.
    fn replace_leaf(&mut self, leaf: Self::Node, marker: &str, fragments: Vec<Fragment>) -> bool;
}

/// Counters for one or more passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Text leaves seen under the root.
    pub leaves: usize,
    /// Skipped: parent tag in [`EXCLUDED_TAGS`].
    pub excluded: usize,
    /// Skipped: empty or whitespace only.
    pub blank: usize,
    /// Skipped: inside an element carrying the marker class.
    pub already_marked: usize,
    /// Skipped: detached before replacement.
    pub detached: usize,
    /// Leaves replaced.
    pub transformed: usize,
    /// Word spans created.
    pub words: usize,
}

impl AddAssign for TransformStats {
    fn add_assign(&mut self, rhs: Self) {
        self.leaves += rhs.leaves;
        self.excluded += rhs.excluded;
        self.blank += rhs.blank;
        self.already_marked += rhs.already_marked;
        self.detached += rhs.detached;
        self.transformed += rhs.transformed;
        self.words += rhs.words;
    }
}

/// Word transforms plus the marker classes they tag their output with.
pub struct Transformer {
    classes: ClassNames,
    splitter: Box<dyn SyllableSplitter>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(ClassNames::default())
    }
}

impl Transformer {
    pub fn new(classes: ClassNames) -> Self {
        Self {
            classes,
            splitter: Box::new(VowelRunSplitter),
        }
    }

    /// Swap the syllable heuristic for another strategy.
    pub fn with_splitter(mut self, splitter: impl SyllableSplitter + 'static) -> Self {
        self.splitter = Box::new(splitter);
        self
    }

    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    /// Marker class of the spans produced by `mode`.
    pub fn marker(&self, mode: Mode) -> &str {
        match mode {
            Mode::Bionic => &self.classes.bionic_word,
            Mode::Syllable => &self.classes.syllable_word,
        }
    }

    /// Render one word with the transform for `mode`.
    pub fn render_word(&self, mode: Mode, word: &str) -> Vec<Inline> {
        match mode {
            Mode::Bionic => Bionic.render(word),
            Mode::Syllable => Syllables::new(self.splitter.as_ref()).render(word),
        }
    }
}

/// Run one pass of `mode` over the subtree at `root`.
pub fn transform<T: TextTree>(
    tree: &mut T,
    root: T::Node,
    mode: Mode,
    transformer: &Transformer,
) -> TransformStats {
    let mut stats = TransformStats::default();
    let candidates = collect_candidates(tree, root, transformer.marker(mode), &mut stats);
    rewrite_leaves(tree, &candidates, mode, transformer, &mut stats);

    log::debug!(
        "{mode} pass: {} of {} text leaves rewritten into {} words \
         ({} excluded, {} blank, {} already marked, {} detached)",
        stats.transformed,
        stats.leaves,
        stats.words,
        stats.excluded,
        stats.blank,
        stats.already_marked,
        stats.detached,
    );
    stats
}

/// Run a pass of `mode` over every subtree selected by `scope`.
pub fn transform_scoped(
    doc: &mut Document,
    scope: &Scope,
    mode: Mode,
    transformer: &Transformer,
) -> TransformStats {
    let roots = scope.roots(doc);
    if roots.is_empty() {
        log::debug!("{mode} pass: selector `{}` matched nothing", scope.as_str());
    }

    let mut stats = TransformStats::default();
    for root in roots {
        stats += transform(doc, root, mode, transformer);
    }
    stats
}

/// The leaves under `root` a pass with marker class `marker` would rewrite.
pub fn collect_candidates<T: TextTree>(
    tree: &T,
    root: T::Node,
    marker: &str,
    stats: &mut TransformStats,
) -> Vec<T::Node> {
    let mut candidates = Vec::new();

    for leaf in tree.text_leaves(root) {
        stats.leaves += 1;
        let parent = tree.parent(leaf);

        if parent
            .and_then(|p| tree.tag_name(p))
            .is_some_and(|tag| EXCLUDED_TAGS.contains(&tag))
        {
            stats.excluded += 1;
            continue;
        }

        if tree.leaf_text(leaf).is_none_or(|text| text.trim().is_empty()) {
            stats.blank += 1;
            continue;
        }

        if is_marked(tree, parent, marker) {
            stats.already_marked += 1;
            continue;
        }

        candidates.push(leaf);
    }
    candidates
}

/// True when `node` or one of its ancestors carries `marker`.
fn is_marked<T: TextTree>(tree: &T, mut node: Option<T::Node>, marker: &str) -> bool {
    while let Some(current) = node {
        if tree.has_class(current, marker) {
            return true;
        }
        node = tree.parent(current);
    }
    false
}

/// Replace each of `leaves` with its rendered words.
pub fn rewrite_leaves<T: TextTree>(
    tree: &mut T,
    leaves: &[T::Node],
    mode: Mode,
    transformer: &Transformer,
    stats: &mut TransformStats,
) {
    let marker = transformer.marker(mode);

    for &leaf in leaves {
        let Some(text) = tree.leaf_text(leaf) else {
            continue;
        };
        let fragments = render_words(text, |word| transformer.render_word(mode, word));
        let words = fragments
            .iter()
            .filter(|f| matches!(f, Fragment::Word(_)))
            .count();

        if tree.replace_leaf(leaf, marker, fragments) {
            stats.transformed += 1;
            stats.words += words;
        } else {
            log::trace!("{mode} pass: skipping detached text leaf");
            stats.detached += 1;
        }
    }
}

impl TextTree for Document {
    type Node = NodeId;

    fn text_leaves(&self, root: NodeId) -> Vec<NodeId> {
        Document::text_leaves(self, root)
    }

    fn leaf_text(&self, leaf: NodeId) -> Option<&str> {
        self.text(leaf)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Document::parent(self, node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element_name(node).map(|name| name.as_ref())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        Document::has_class(self, node, class)
    }

    fn replace_leaf(&mut self, leaf: NodeId, marker: &str, fragments: Vec<Fragment>) -> bool {
        if Document::parent(self, leaf).is_none() {
            return false;
        }

        for fragment in fragments {
            let node = match fragment {
                Fragment::Text(text) => self.create_text(text),
                Fragment::Word(parts) => {
                    let span = self.create_html_element("span", &[("class", marker)]);
                    for part in parts {
                        let child = match part {
                            Inline::Bold(text) => {
                                let b = self.create_html_element("b", &[]);
                                let inner = self.create_text(text);
                                self.append(b, inner);
                                b
                            }
                            Inline::Plain(text) => self.create_text(text),
                        };
                        self.append(span, child);
                    }
                    span
                }
            };
            self.insert_before(leaf, node);
        }

        self.detach(leaf);
        true
    }
}
