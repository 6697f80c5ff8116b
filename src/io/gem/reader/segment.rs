//! Splitting a GEM document into records and decoding record headers

use super::tokens::parse_integers;
use crate::error::{GemError, Result};
use crate::io::gem::identifier::name_and_identifier;
use crate::io::gem::object_type::{GemKeyword, GemObjectType};
use crate::notification::NotificationCollection;

/// Line that opens every record
pub const RECORD_MARKER: &str = "LAYER";

/// One record with its classified header
#[derive(Debug, Clone)]
pub struct GemSegment {
    /// Raw record text, used in error messages
    pub raw: String,
    pub object_type: GemObjectType,
    pub display_name: String,
    /// Unique within the document once the reader has deduplicated it
    pub identifier: String,
    /// Trimmed, non-empty lines after the name line
    pub body: Vec<String>,
}

/// Split document text into raw records.
///
/// Anything before the first `LAYER` line (the file header) is dropped.
pub fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim() == RECORD_MARKER {
            if let Some(lines) = current.take() {
                segments.push(lines.join("\n"));
            }
            current = Some(vec![line]);
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some(lines) = current {
        segments.push(lines.join("\n"));
    }
    segments
}

/// Integer on the line after `key`, searched within the header lines
fn header_value(header: &[&str], key: &str, raw: &str) -> Result<i64> {
    let position = header
        .iter()
        .position(|l| l.trim() == key)
        .ok_or_else(|| GemError::parse(format!("missing {} line", key), raw))?;
    let value = header
        .get(position + 1)
        .and_then(|l| parse_integers(l))
        .filter(|v| v.len() == 1)
        .ok_or_else(|| GemError::parse(format!("invalid {} value", key), raw))?;
    Ok(value[0])
}

/// Keyword and the rest of the line, if `line` is a name line
fn keyword_line(line: &str) -> Option<(GemKeyword, &str)> {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(' ') {
        Some((head, rest)) => (head, rest),
        None => (trimmed, ""),
    };
    GemKeyword::from_str_opt(head).map(|k| (k, rest))
}

impl GemSegment {
    /// Decode the header of a raw record.
    ///
    /// The identifier is taken from a trailing `[id]` tag or derived from the
    /// name; it is not yet unique.
    pub fn parse(raw: String, notifications: &mut NotificationCollection) -> Result<Self> {
        let lines: Vec<&str> = raw.lines().collect();
        let keyword_positions: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| keyword_line(l).is_some())
            .map(|(i, _)| i)
            .collect();

        let name_index = match keyword_positions.as_slice() {
            [] => return Err(GemError::MissingKeyword(raw)),
            [index] => *index,
            _ => {
                return Err(GemError::parse(
                    "record has more than one keyword line",
                    &raw,
                ))
            }
        };

        let header = &lines[..name_index];
        let category = header_value(header, "CATEGORY", &raw)?;
        let object_type = header_value(header, "TYPE", &raw)?;
        let subtype = header_value(header, "SUBTYPE", &raw)?;

        let (keyword, full_name) = keyword_line(lines[name_index])
            .ok_or_else(|| GemError::MissingKeyword(raw.clone()))?;
        let object_type =
            GemObjectType::classify(category, object_type, subtype, keyword, notifications);
        let (display_name, identifier) = name_and_identifier(full_name)?;

        let body = lines[name_index + 1..]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        Ok(GemSegment {
            raw,
            object_type,
            display_name,
            identifier,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationType;

    const SHADE: &str = "LAYER\n64\nCOLOUR\n62\nCATEGORY\n1\nTYPE\n4\nSUBTYPE\n0\nCOLOURRGB\n65280\nIES Shade 13c9e [Shade_13c9e001]\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 1 2 3\n0";

    #[test]
    fn test_split_skips_file_header() {
        let text = format!("COM GEM data file\nANT\n{}\n{}\n", SHADE, SHADE);
        let segments = split_segments(&text);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].starts_with("LAYER"));
        assert!(!segments[0].contains("ANT"));
    }

    #[test]
    fn test_parse_header() {
        let mut notes = NotificationCollection::new();
        let segment = GemSegment::parse(SHADE.to_string(), &mut notes).unwrap();
        assert_eq!(segment.object_type, GemObjectType::Shade);
        assert_eq!(segment.display_name, "Shade 13c9e");
        assert_eq!(segment.identifier, "Shade_13c9e001");
        assert_eq!(segment.body.len(), 6);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_missing_keyword() {
        let raw = SHADE.replace("IES ", "XYZ ");
        let mut notes = NotificationCollection::new();
        assert!(matches!(
            GemSegment::parse(raw, &mut notes),
            Err(GemError::MissingKeyword(_))
        ));
    }

    #[test]
    fn test_multiple_keywords() {
        let raw = format!("{}\nLAN Extra", SHADE);
        let mut notes = NotificationCollection::new();
        assert!(matches!(
            GemSegment::parse(raw, &mut notes),
            Err(GemError::Parse { .. })
        ));
    }

    #[test]
    fn test_unknown_tuple_reads_as_shade() {
        let raw = SHADE.replace("TYPE\n4", "TYPE\n9");
        let mut notes = NotificationCollection::new();
        let segment = GemSegment::parse(raw, &mut notes).unwrap();
        assert_eq!(segment.object_type, GemObjectType::Shade);
        assert!(notes.has_type(NotificationType::NotSupported));
    }
}
