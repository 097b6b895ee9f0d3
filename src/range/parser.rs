//! Recursive-descent parser for the two range grammars.

use super::{DimBound, RangeSpec, RangeSuffix, RangeSyntax, MAX_DIMS};
use crate::error::{Result, SdsError};
use tracing::debug;

/// Parse the range suffix of `text`, which starts at `suffix.body_start`.
pub(super) fn parse(text: &str, suffix: RangeSuffix) -> Result<RangeSpec> {
    let cursor = Cursor {
        text,
        pos: suffix.body_start,
        dims: Vec::new(),
    };
    match suffix.syntax {
        RangeSyntax::Bracket => cursor.bracket(),
        RangeSyntax::Paren => cursor.paren(),
    }
}

/// Position in the argument plus the bounds collected so far.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    dims: Vec<DimBound>,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn error_at(&self, pos: usize, message: &str) -> SdsError {
        SdsError::range_syntax(self.text, pos, message)
    }

    fn error(&self, message: &str) -> SdsError {
        self.error_at(self.pos, message)
    }

    /// Consume a run of decimal digits, if one starts here.
    fn number(&mut self) -> Result<Option<usize>> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        self.text[start..self.pos]
            .parse::<usize>()
            .map(Some)
            .map_err(|_| self.error_at(start, "index is too large"))
    }

    /// `[START] ':' [END] | START`
    fn one_range(&mut self, one_based: bool) -> Result<DimBound> {
        self.skip_ws();
        let start_pos = self.pos;
        let start = self.number()?;
        self.skip_ws();

        let (end, end_pos) = if self.peek() == Some(b':') {
            self.pos += 1;
            self.skip_ws();
            let end_pos = self.pos;
            let end = self.number()?;
            self.skip_ws();
            (end, end_pos)
        } else if start.is_some() {
            (start, start_pos)
        } else {
            return Err(self.error("expected a number or ':'"));
        };

        if one_based {
            if start == Some(0) {
                return Err(self.error_at(start_pos, "cannot start indexes with 0"));
            }
            if end == Some(0) {
                return Err(self.error_at(end_pos, "cannot start indexes with 0"));
            }
        }

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(self.error("start of range must be less than or equal to end"));
            }
        }

        Ok(DimBound::new(start, end))
    }

    /// `R] [R] ...` after the first `[`.
    fn bracket(mut self) -> Result<RangeSpec> {
        loop {
            if self.dims.len() == MAX_DIMS {
                return Err(self.error("too many dimensions"));
            }
            let bound = self.one_range(false)?;
            debug!(start = ?bound.start, end = ?bound.end, "parsed bracket range");
            self.dims.push(bound);

            if self.peek() != Some(b']') {
                return Err(self.error("expected ']'"));
            }
            self.pos += 1;
            self.skip_ws();

            match self.peek() {
                None => return Ok(RangeSpec::from_dims(self.dims)),
                Some(b'[') => self.pos += 1,
                Some(_) => return Err(self.error("expected '[' or end of range")),
            }
        }
    }

    /// `R, R, ... )` after the `(`.
    fn paren(mut self) -> Result<RangeSpec> {
        loop {
            if self.dims.len() == MAX_DIMS {
                return Err(self.error("too many dimensions"));
            }
            let bound = self.one_range(true)?;
            debug!(start = ?bound.start, end = ?bound.end, "parsed paren range");
            self.dims.push(bound);

            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    self.skip_ws();
                    if self.peek().is_none() {
                        break;
                    }
                    return Err(self.error("unexpected text after ')'"));
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }

        // zero was rejected above, so every specified bound is at least 1
        let dims = self
            .dims
            .iter()
            .rev()
            .map(|b| DimBound::new(b.start.map(|s| s - 1), b.end.map(|e| e - 1)))
            .collect();
        Ok(RangeSpec::from_dims(dims))
    }
}
