//! Line tokenizing for GEM bodies

use crate::error::{GemError, Result};
use nom::character::complete::{i64 as parse_i64, space0, space1};
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::number::complete::double;
use nom::sequence::delimited;
use nom::IResult;

fn integer_list(input: &str) -> IResult<&str, Vec<i64>> {
    all_consuming(delimited(space0, separated_list1(space1, parse_i64), space0))(input)
}

fn float_list(input: &str) -> IResult<&str, Vec<f64>> {
    all_consuming(delimited(space0, separated_list1(space1, double), space0))(input)
}

/// Whitespace separated integers; `None` if any token is not an integer
pub fn parse_integers(line: &str) -> Option<Vec<i64>> {
    integer_list(line).ok().map(|(_, values)| values)
}

/// Whitespace separated floats; `None` if any token is not a number
pub fn parse_floats(line: &str) -> Option<Vec<f64>> {
    float_list(line.trim_end_matches('\r')).ok().map(|(_, values)| values)
}

/// Sequential reader over the non-empty body lines of one segment.
///
/// Every failure carries the raw segment text.
pub struct LineCursor<'a> {
    lines: &'a [String],
    position: usize,
    segment: &'a str,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [String], segment: &'a str) -> Self {
        Self {
            lines,
            position: 0,
            segment,
        }
    }

    /// Build a parse error for this segment
    pub fn error(&self, message: impl Into<String>) -> GemError {
        GemError::parse(message, self.segment)
    }

    pub fn segment(&self) -> &'a str {
        self.segment
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.lines.len()
    }

    /// Lines left to read
    pub fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.position)
    }

    pub fn next_line(&mut self) -> Result<&'a str> {
        let line = self
            .lines
            .get(self.position)
            .ok_or_else(|| self.error(format!("unexpected end of segment after line {}", self.position)))?;
        self.position += 1;
        Ok(line.as_str())
    }

    pub fn next_integers(&mut self) -> Result<Vec<i64>> {
        let line = self.next_line()?;
        parse_integers(line).ok_or_else(|| self.error(format!("expected integers, found {:?}", line)))
    }

    /// Exactly `count` integers
    pub fn next_integers_exact(&mut self, count: usize) -> Result<Vec<i64>> {
        let values = self.next_integers()?;
        if values.len() != count {
            return Err(self.error(format!(
                "expected {} integers, found {}",
                count,
                values.len()
            )));
        }
        Ok(values)
    }

    pub fn next_floats(&mut self) -> Result<Vec<f64>> {
        let line = self.next_line()?;
        parse_floats(line).ok_or_else(|| self.error(format!("expected numbers, found {:?}", line)))
    }

    /// Non-negative count
    pub fn next_count(&mut self) -> Result<usize> {
        let value = self.next_integers_exact(1)?[0];
        usize::try_from(value).map_err(|_| self.error(format!("negative count {}", value)))
    }
}
