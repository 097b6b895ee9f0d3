//! Range expressions for slicing variables.
//!
//! A variable argument may carry a slice suffix in one of two surface forms:
//!
//! - bracket form `name[R][R]...`, 0-based, outermost dimension first;
//! - paren form `name(R,R,...)`, 1-based, fastest-varying dimension first.
//!
//! Each `R` is `START`, `:`, `START:`, `:END` or `START:END`, with inclusive
//! bounds. Both forms normalize to a [`RangeSpec`] in 0-based, outermost-first
//! order.
//!
//! The paren form's dimension reversal follows the netCDF convention that
//! on-disk dimension order is the reverse of the Fortran display order.

mod parser;
mod validation;

pub use validation::RangeViolation;

use crate::error::{Result, SdsError};
use std::ops::Range;

/// Maximum number of dimensions a range expression may name.
pub const MAX_DIMS: usize = 32;

/// Which surface syntax a range suffix uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSyntax {
    /// `[a:b][c:d]`, 0-based.
    Bracket,
    /// `(a:b,c:d)`, 1-based and reversed.
    Paren,
}

impl RangeSyntax {
    fn open(self) -> char {
        match self {
            RangeSyntax::Bracket => '[',
            RangeSyntax::Paren => '(',
        }
    }
}

/// Location of a range suffix inside a `NAME[RANGE]` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSuffix {
    /// Surface syntax, chosen by the closing delimiter.
    pub syntax: RangeSyntax,
    /// Byte offset of the first character after the opening delimiter.
    pub body_start: usize,
}

/// Inclusive bounds on one dimension. `None` means "to that end of the extent".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimBound {
    /// First index.
    pub start: Option<usize>,
    /// Last index.
    pub end: Option<usize>,
}

impl DimBound {
    /// Bounds from explicit optional ends.
    pub fn new(start: Option<usize>, end: Option<usize>) -> Self {
        Self { start, end }
    }

    /// A single index.
    pub fn point(index: usize) -> Self {
        Self::new(Some(index), Some(index))
    }

    /// Concrete index range for a dimension of `size` elements.
    pub fn indices(&self, size: usize) -> Range<usize> {
        let start = self.start.unwrap_or(0).min(size);
        let end = self.end.map_or(size, |e| e.saturating_add(1).min(size));
        start..end.max(start)
    }
}

/// Per-dimension bounds describing a slice of a variable.
///
/// An empty spec means the whole variable. Once parsed a spec is never
/// modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSpec {
    dims: Vec<DimBound>,
}

impl RangeSpec {
    /// The spec used when no range suffix was given.
    pub fn entire() -> Self {
        Self::default()
    }

    /// Bounds `(0, size)` on every dimension of `shape`.
    pub fn full_extent(shape: &[usize]) -> Self {
        Self {
            dims: shape
                .iter()
                .map(|&size| DimBound::new(Some(0), Some(size)))
                .collect(),
        }
    }

    pub(crate) fn from_dims(dims: Vec<DimBound>) -> Self {
        Self { dims }
    }

    /// True when no range suffix was given.
    pub fn is_entire(&self) -> bool {
        self.dims.is_empty()
    }

    /// Per-dimension bounds, outermost first.
    pub fn dims(&self) -> &[DimBound] {
        &self.dims
    }

    /// Number of dimensions named by the expression.
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Whether the spec names no dimensions at all.
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// The spec to apply to a variable of `shape`: itself, or the full
    /// extent when no suffix was given.
    pub fn resolve(&self, shape: &[usize]) -> RangeSpec {
        if self.is_entire() {
            Self::full_extent(shape)
        } else {
            self.clone()
        }
    }

    /// Concrete half-open index ranges for slicing a buffer of `shape`.
    pub fn index_ranges(&self, shape: &[usize]) -> Vec<Range<usize>> {
        let resolved = self.resolve(shape);
        shape
            .iter()
            .enumerate()
            .map(|(i, &size)| match resolved.dims.get(i) {
                Some(bound) => bound.indices(size),
                None => 0..size,
            })
            .collect()
    }
}

/// Split `name[range]` / `name(range)` into the plain name and the location
/// of the range suffix, if any.
///
/// The suffix is recognized only when the text ends in `]` or `)` and the
/// matching opening delimiter occurs somewhere before it. Trailing blanks and
/// tabs are trimmed from the name.
pub fn split_name_and_range(text: &str) -> (String, Option<RangeSuffix>) {
    let syntax = match text.as_bytes().last() {
        Some(b']') => RangeSyntax::Bracket,
        Some(b')') => RangeSyntax::Paren,
        _ => return (trim_name(text), None),
    };

    match text.find(syntax.open()) {
        Some(open) => (
            trim_name(&text[..open]),
            Some(RangeSuffix {
                syntax,
                body_start: open + 1,
            }),
        ),
        None => (trim_name(text), None),
    }
}

fn trim_name(name: &str) -> String {
    name.trim_end_matches([' ', '\t']).to_string()
}

/// A variable name together with the range requested for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSelection {
    /// Plain variable name.
    pub name: String,
    /// The argument exactly as typed.
    pub expr: String,
    /// Parsed bounds; empty when no suffix was given.
    pub range: RangeSpec,
}

impl VariableSelection {
    /// Parse a `-v` argument.
    pub fn parse(text: &str) -> Result<Self> {
        let (name, suffix) = split_name_and_range(text);
        if name.is_empty() {
            return Err(SdsError::range_syntax(text, 0, "missing variable name"));
        }

        let range = match suffix {
            Some(suffix) => parser::parse(text, suffix)?,
            None => RangeSpec::entire(),
        };

        Ok(Self {
            name,
            expr: text.to_string(),
            range,
        })
    }
}
