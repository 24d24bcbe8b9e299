//! Fixed-column schema of SHIELD deck records.
//!
//! The source format encodes structural meaning positionally; the offsets
//! below are the whole schema.

use std::ops::Range;

/// Width of the SHIELD title field blanked before the line is reused as the
/// FLUKA geometry title.
pub const TITLE_BLANK_WIDTH: usize = 20;

/// 0-indexed columns whose blankness distinguishes continuation cards from
/// primary zone cards.
pub const ZONE_CLASS_COLUMNS: Range<usize> = 2..5;

/// Column overwritten on primary zone cards with the memory pre-allocation
/// marker the downstream geometry engine reads.
pub const MEMORY_HINT_COLUMN: usize = 8;
pub const MEMORY_HINT_MARKER: char = '5';

/// First-token sentinel closing both the geometry body and the zone list.
pub const SECTION_TERMINATOR: &str = "END";

pub fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

/// A terminator is recognized only as the first token; an `END` appearing
/// anywhere else in a card never closes a section.
pub fn is_section_terminator(line: &str) -> bool {
    first_token(line) == Some(SECTION_TERMINATOR)
}

/// Blanks the first 20 character positions of the title line, preserving any
/// remaining content and the trailing newline. Lines shorter than the field
/// are padded out to the full blank width.
pub fn blank_title_field(line: &str) -> String {
    let mut blanked = " ".repeat(TITLE_BLANK_WIDTH);
    let tail: String = line.chars().skip(TITLE_BLANK_WIDTH).collect();
    if tail.is_empty() && line.ends_with('\n') {
        blanked.push('\n');
    } else {
        blanked.push_str(&tail);
    }
    blanked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRecordClass {
    /// Starts a new zone definition; receives the memory hint marker.
    Primary,
    /// Extends the previous zone definition; passes through unmodified.
    Continuation,
}

pub fn classify_zone_record(line: &str) -> ZoneRecordClass {
    let body = line.strip_suffix('\n').unwrap_or(line);
    let has_marker = body
        .chars()
        .take(ZONE_CLASS_COLUMNS.end)
        .skip(ZONE_CLASS_COLUMNS.start)
        .any(|column| column != ' ');
    if has_marker {
        ZoneRecordClass::Primary
    } else {
        ZoneRecordClass::Continuation
    }
}

/// Overwrites the memory hint column of a primary zone card. Records shorter
/// than the fixed layout are padded with blanks up to the hint column instead
/// of being indexed out of bounds.
pub fn patch_primary_zone_record(line: &str) -> String {
    let (body, newline) = match line.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (line, ""),
    };

    let mut columns: Vec<char> = body.chars().collect();
    if columns.len() <= MEMORY_HINT_COLUMN {
        columns.resize(MEMORY_HINT_COLUMN + 1, ' ');
    }
    columns[MEMORY_HINT_COLUMN] = MEMORY_HINT_MARKER;

    let mut patched: String = columns.into_iter().collect();
    patched.push_str(newline);
    patched
}

#[cfg(test)]
mod tests {
    use super::{
        ZoneRecordClass, blank_title_field, classify_zone_record, is_section_terminator,
        patch_primary_zone_record,
    };

    #[test]
    fn terminator_matches_first_token_only() {
        assert!(is_section_terminator("END\n"));
        assert!(is_section_terminator("  END\n"));
        assert!(is_section_terminator("END   trailing comment\n"));
        assert!(!is_section_terminator("SPH END 1\n"));
        assert!(!is_section_terminator("ENDING\n"));
        assert!(!is_section_terminator("\n"));
    }

    #[test]
    fn title_blanking_preserves_tail_and_newline() {
        let blanked = blank_title_field("TESTGEO1            extra title text\n");
        assert_eq!(blanked, "                    extra title text\n");
    }

    #[test]
    fn short_title_is_padded_to_full_blank_width() {
        let blanked = blank_title_field("short\n");
        assert_eq!(blanked, format!("{}\n", " ".repeat(20)));
    }

    #[test]
    fn zone_record_classification_reads_columns_two_to_four() {
        assert_eq!(
            classify_zone_record("ZON1  1    +1  -2\n"),
            ZoneRecordClass::Primary
        );
        assert_eq!(
            classify_zone_record("        or +3  -4\n"),
            ZoneRecordClass::Continuation
        );
        // Columns absent on a short record count as blank.
        assert_eq!(classify_zone_record("ab\n"), ZoneRecordClass::Continuation);
    }

    #[test]
    fn primary_patch_changes_only_the_memory_hint_column() {
        let original = "ZON1  1    +1  -2\n";
        let patched = patch_primary_zone_record(original);

        assert_eq!(patched.len(), original.len());
        for (index, (was, now)) in original.chars().zip(patched.chars()).enumerate() {
            if index == 8 {
                assert_eq!(now, '5');
            } else {
                assert_eq!(was, now);
            }
        }
    }

    #[test]
    fn short_primary_record_is_padded_before_patching() {
        assert_eq!(patch_primary_zone_record("ZON1\n"), "ZON1    5\n");
    }
}
