//! A word index: maps each word of a text to the positions where it occurs.
//!
//! # Examples
//!
//! ```
//! use avl_index::index::{IndexOptions, WordIndex};
//!
//! let text = "the cat\nsat on the mat\n";
//! let index = WordIndex::read(text.as_bytes(), IndexOptions::default()).unwrap();
//!
//! assert_eq!(index.unique_words(), 5);
//! assert_eq!(index.lookup("the").unwrap().to_string(), "[1(1), 2(5)]");
//! assert!(index.lookup("dog").is_none());
//! ```

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::result::Result;
use std::slice;
use tracing::{debug, trace};
use super::dictionary::Dictionary;
use super::error::{self, IndexError};
use super::tree::{AvlTree, Iter};

/// A single occurrence of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    /// The 1-based line the word occurs on.
    pub line: usize,
    /// The 1-based position of the word among all words of the text.
    pub word: usize,
}

impl Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.line, self.word)
    }
}

/// The occurrences of one word, in the order they were recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionList(Vec<Occurrence>);

impl PositionList {
    /// Creates an empty list.
    pub fn new() -> Self { PositionList(vec![]) }

    /// Appends an occurrence to the end of the list.
    pub fn push(&mut self, occurrence: Occurrence) { self.0.push(occurrence); }

    /// Returns the number of occurrences.
    pub fn len(&self) -> usize { self.0.len() }

    /// Checks if the list has no occurrences.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns the first occurrence, if any.
    pub fn first(&self) -> Option<&Occurrence> { self.0.first() }

    /// Returns the last occurrence, if any.
    pub fn last(&self) -> Option<&Occurrence> { self.0.last() }

    /// Returns an iterator over the occurrences.
    pub fn iter(&self) -> slice::Iter<Occurrence> { self.0.iter() }
}

impl From<Occurrence> for PositionList {
    fn from(occurrence: Occurrence) -> Self { PositionList(vec![occurrence]) }
}

impl<'a> IntoIterator for &'a PositionList {
    type Item = &'a Occurrence;
    type IntoIter = slice::Iter<'a, Occurrence>;
    fn into_iter(self) -> slice::Iter<'a, Occurrence> { self.iter() }
}

impl Display for PositionList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        let mut it = self.iter();

        if let Some(occurrence) = it.next() {
            write!(f, "{}", occurrence)?;
            for occurrence in it { write!(f, ", {}", occurrence)?; }
        }

        write!(f, "]")
    }
}

/// Options controlling how tokens become index keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Lower-case each token before stripping it, so capitalized words are kept.
    pub fold_case: bool,
}

/// Turns a whitespace-delimited token into an index key by removing every character that is not
/// a lowercase ASCII letter.
///
/// # Examples
///
/// ```
/// use avl_index::index::normalize;
///
/// assert_eq!(normalize("turing's,", false), "turings");
/// assert_eq!(normalize("Computer", false), "omputer");
/// assert_eq!(normalize("Computer", true), "computer");
/// assert_eq!(normalize("1936", false), "");
/// ```
pub fn normalize(token: &str, fold_case: bool) -> String {
    let keep = |c: &char| c.is_ascii_lowercase();

    if fold_case {
        token.chars().flat_map(char::to_lowercase).filter(keep).collect()
    } else {
        token.chars().filter(keep).collect()
    }
}

/// Returns the occurrences recorded for the given key in any dictionary of position lists.
pub fn lookup<'a, D>(dictionary: &'a D, key: &str) -> Option<&'a PositionList>
    where D: Dictionary<String, PositionList> {

    dictionary.find(&key.to_owned()).ok().flatten().map(|entry| entry.value())
}

/// An index from words to the positions where they occur.
#[derive(Clone, Debug)]
pub struct WordIndex {
    tree: AvlTree<String, PositionList>,
    options: IndexOptions,
    lines: usize,
    words: usize,
}

impl WordIndex {
    /// Creates an empty index.
    pub fn new(options: IndexOptions) -> Self {
        WordIndex { tree: AvlTree::new(), options: options, lines: 0, words: 0 }
    }

    /// Builds an index of the text read from `reader`.
    pub fn read<R: BufRead>(reader: R, options: IndexOptions) -> Result<Self, IndexError> {
        let mut index = WordIndex::new(options);
        for line in reader.lines() { index.add_line(&line?)?; }

        debug!(target: "avl_index::index", lines = index.lines, words = index.words,
               unique = index.unique_words(), height = index.tree.height(), "indexed text");
        Ok(index)
    }

    /// Builds an index of the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, options: IndexOptions) -> Result<Self, IndexError> {
        WordIndex::read(BufReader::new(File::open(path)?), options)
    }

    /// Records every whitespace-delimited token of the next line of text.
    pub fn add_line(&mut self, line: &str) -> error::Result<()> {
        self.lines += 1;
        for token in line.split_whitespace() { self.add_word(token)?; }
        Ok(())
    }

    // Tokens with no lowercase letters are counted but not indexed.
    fn add_word(&mut self, token: &str) -> error::Result<()> {
        self.words += 1;

        let key = normalize(token, self.options.fold_case);
        if key.is_empty() {
            trace!(target: "avl_index::index", token, word = self.words, "skipped empty token");
            return Ok(());
        }

        let occurrence = Occurrence { line: self.lines, word: self.words };

        match self.tree.get_mut(&key) {
            Some(positions) => positions.push(occurrence),
            None => { self.tree.insert(key, PositionList::from(occurrence))?; }
        }

        Ok(())
    }

    /// Returns the positions of the given key, which is matched exactly, without normalization.
    pub fn lookup(&self, key: &str) -> Option<&PositionList> { lookup(&self.tree, key) }

    /// Returns the number of distinct words in the index.
    pub fn unique_words(&self) -> usize { self.tree.size() }

    /// Returns the number of lines read.
    pub fn lines(&self) -> usize { self.lines }

    /// Returns the number of tokens read, including those that were not indexed.
    pub fn words(&self) -> usize { self.words }

    /// Returns the options the index was built with.
    pub fn options(&self) -> IndexOptions { self.options }

    /// Returns an iterator over the words and their positions in ascending word order.
    pub fn iter(&self) -> Iter<String, PositionList> { self.tree.iter() }

    /// Returns the tree backing the index.
    pub fn tree(&self) -> &AvlTree<String, PositionList> { &self.tree }
}

impl Display for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { Display::fmt(&self.tree, f) }
}
