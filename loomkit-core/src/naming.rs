//! Word segmentation and case-insensitive name deduplication, shared
//! by the Identifier Service and the Schema Emitter's name case
//! conversions.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::iter::Peekable;
use std::str::CharIndices;

use bumpalo::collections::{CollectIn, Vec as BumpVec};
use bumpalo::Bump;
use rustc_hash::FxHashMap;
use unicase::UniCase;

/// Deduplicates names across case conventions.
#[derive(Debug, Default)]
pub struct UniqueNames(Bump);

impl UniqueNames {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty scope that's backed by this arena.
    ///
    /// A scope produces names that will never collide with other names
    /// within the same scope, even when converted to a different case.
    /// For example, `HTTP_Response` and `HTTPResponse` are distinct,
    /// but both become `http_response` in snake case.
    #[inline]
    pub fn scope(&self) -> UniqueNamesScope<'_> {
        UniqueNamesScope::new(&self.0)
    }

    /// Creates a new scope backed by this arena that reserves the
    /// given names up front, so a name colliding with a reserved word
    /// gets a suffix on its first use.
    #[inline]
    pub fn scope_with_reserved<S: AsRef<str>>(
        &self,
        reserved: impl IntoIterator<Item = S>,
    ) -> UniqueNamesScope<'_> {
        UniqueNamesScope::with_reserved(&self.0, reserved)
    }
}

/// A scope for unique names.
#[derive(Debug)]
pub struct UniqueNamesScope<'a> {
    arena: &'a Bump,
    space: FxHashMap<&'a [UniCase<&'a str>], usize>,
}

impl<'a> UniqueNamesScope<'a> {
    fn new(arena: &'a Bump) -> Self {
        Self { arena, space: FxHashMap::default() }
    }

    fn with_reserved<S: AsRef<str>>(arena: &'a Bump, reserved: impl IntoIterator<Item = S>) -> Self {
        let space = reserved
            .into_iter()
            .map(|name| arena.alloc_str(name.as_ref()))
            .map(|name| WordSegments::new(name).map(UniCase::new).collect_in::<BumpVec<_>>(arena))
            .fold(FxHashMap::default(), |mut names, segments| {
                names.insert(segments.into_bump_slice(), 1);
                names
            });
        Self { arena, space }
    }

    /// Adds a name to this scope. If the name doesn't exist within this
    /// scope yet, returns the name as-is; otherwise, returns the name
    /// with a numeric suffix unique within the scope.
    pub fn uniquify<'b>(&mut self, name: &'b str) -> Cow<'b, str> {
        match self.space.entry(
            WordSegments::new(name)
                .map(|name| UniCase::new(&*self.arena.alloc_str(name)))
                .collect_in::<BumpVec<_>>(self.arena)
                .into_bump_slice(),
        ) {
            Entry::Occupied(mut entry) => {
                let count = entry.get_mut();
                *count += 1;
                format!("{name}{count}").into()
            }
            Entry::Vacant(entry) => {
                entry.insert(1);
                name.into()
            }
        }
    }
}

/// Segments a string into words, detecting word boundaries for case
/// transformation.
///
/// Word boundaries occur on non-alphanumeric characters, lowercase-
/// to-uppercase transitions (`httpResponse`), uppercase-to-lowercase
/// after an uppercase run (`XMLHttp`), and digit-to-letter
/// transitions (`1099KStatus`, `250g`). The digit-to-letter rule is
/// stricter than heck's segmentation, so that `1099KStatus` and
/// `1099_K_Status` collide rather than silently coexisting.
pub struct WordSegments<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    current_word_starts_at: Option<usize>,
    mode: WordMode,
}

impl<'a> WordSegments<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            current_word_starts_at: None,
            mode: WordMode::Boundary,
        }
    }
}

impl<'a> Iterator for WordSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, c)) = self.chars.next() {
            if c.is_uppercase() {
                match self.mode {
                    WordMode::Boundary | WordMode::Lowercase => {
                        let start = self.current_word_starts_at.replace(index);
                        self.mode = WordMode::Uppercase;
                        if let Some(start) = start {
                            return Some(&self.input[start..index]);
                        }
                    }
                    WordMode::Uppercase => {
                        let next_is_lowercase =
                            self.chars.peek().map(|&(_, next)| next.is_lowercase()).unwrap_or(false);
                        if next_is_lowercase
                            && let Some(start) = self.current_word_starts_at
                        {
                            self.current_word_starts_at = Some(index);
                            return Some(&self.input[start..index]);
                        }
                    }
                }
            } else if c.is_lowercase() {
                match self.mode {
                    WordMode::Boundary => {
                        let start = self.current_word_starts_at.replace(index);
                        self.mode = WordMode::Lowercase;
                        if let Some(start) = start {
                            return Some(&self.input[start..index]);
                        }
                    }
                    WordMode::Lowercase | WordMode::Uppercase => {
                        if self.current_word_starts_at.is_none() {
                            self.current_word_starts_at = Some(index);
                        }
                        self.mode = WordMode::Lowercase;
                    }
                }
            } else if !c.is_alphanumeric() {
                let start = std::mem::take(&mut self.current_word_starts_at);
                self.mode = WordMode::Boundary;
                if let Some(start) = start {
                    return Some(&self.input[start..index]);
                }
            } else if self.current_word_starts_at.is_none() {
                self.current_word_starts_at = Some(index);
            }
        }
        if let Some(start) = std::mem::take(&mut self.current_word_starts_at) {
            return Some(&self.input[start..]);
        }
        None
    }
}

#[derive(Clone, Copy)]
enum WordMode {
    Boundary,
    Lowercase,
    Uppercase,
}
