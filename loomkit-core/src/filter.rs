//! Include/exclude ref filters.
//!
//! User patterns are compiled once into predicates over `$ref`
//! strings; a ref is processed iff it passes `include` and doesn't
//! match `exclude`. An empty `include` list accepts everything.

/// A compiled set of include/exclude patterns.
#[derive(Debug, Default)]
pub struct Filters {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Filters {
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: include.iter().map(|p| Pattern::compile(p)).collect(),
            exclude: exclude.iter().map(|p| Pattern::compile(p)).collect(),
        }
    }

    /// Returns `true` iff `ref_` should be processed.
    pub fn accepts(&self, ref_: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches(ref_));
        let excluded = self.exclude.iter().any(|p| p.matches(ref_));
        included && !excluded
    }
}

/// A glob-like pattern over `$ref` strings, supporting `*` as a
/// "match any run of characters" wildcard. This is the only
/// metacharacter the contract's ref-pattern filters need.
#[derive(Debug)]
struct Pattern(Vec<PatternSegment>);

#[derive(Debug)]
enum PatternSegment {
    Literal(String),
    Wildcard,
}

impl Pattern {
    fn compile(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        for c in pattern.chars() {
            if c == '*' {
                if !literal.is_empty() {
                    segments.push(PatternSegment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(PatternSegment::Wildcard);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            segments.push(PatternSegment::Literal(literal));
        }
        Self(segments)
    }

    fn matches(&self, input: &str) -> bool {
        fn go(segments: &[PatternSegment], input: &str) -> bool {
            match segments {
                [] => input.is_empty(),
                [PatternSegment::Literal(lit), rest @ ..] => {
                    input.strip_prefix(lit.as_str()).is_some_and(|tail| go(rest, tail))
                }
                [PatternSegment::Wildcard, rest @ ..] => {
                    std::iter::once(input.len())
                        .chain((0..input.len()).rev())
                        .any(|i| input.is_char_boundary(i) && go(rest, &input[i..]))
                }
            }
        }
        go(&self.0, input)
    }
}
