//! Single-pass transcoding of a SHIELD geometry deck into a FLUKA `.inp`
//! deck: static header, blanked title, verbatim geometry body, patched zone
//! list, then material assignments expanded from the numeric tail.

mod model;
mod reader;
mod records;

pub use model::{
    CARD_RULER, CONVERTER_VERSION, MaterialAssignments, VACUUM_OFFSET, ZONE_RULER,
    render_assignmat,
};
pub use reader::DeckCursor;
pub use records::{
    MEMORY_HINT_COLUMN, MEMORY_HINT_MARKER, SECTION_TERMINATOR, TITLE_BLANK_WIDTH,
    ZONE_CLASS_COLUMNS, ZoneRecordClass, blank_title_field, classify_zone_record, first_token,
    is_section_terminator, patch_primary_zone_record,
};

use crate::domain::{ConversionReport, ConvertError, ConvertRequest, ConvertResult};
use crate::serialization::write_text_artifact;
use model::FlukaDeck;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Runs the full conversion. The input is opened before the output path is
/// touched, so a missing input never truncates an existing `output.inp`.
/// The deck is rendered in memory and written once at the end; a failed run
/// leaves no partial output behind.
pub fn run_conversion(request: &ConvertRequest) -> ConvertResult<ConversionReport> {
    let input = File::open(&request.input_path).map_err(|source| {
        ConvertError::io_system(
            "IO.INPUT_OPEN",
            format!(
                "could not open input file '{}': {}",
                request.input_path.display(),
                source
            ),
        )
    })?;

    let mut cursor = DeckCursor::new(BufReader::new(input));
    let outcome = transcode_deck(&mut cursor)?;

    write_text_artifact(&request.output_path, &outcome.text).map_err(|source| {
        ConvertError::io_system(
            "IO.OUTPUT_WRITE",
            format!(
                "could not write output file '{}': {}",
                request.output_path.display(),
                source
            ),
        )
    })?;

    Ok(ConversionReport {
        input_path: request.input_path.display().to_string(),
        output_path: request.output_path.display().to_string(),
        geometry_cards: outcome.geometry_cards,
        zone_cards: outcome.zone_cards,
        primary_zone_cards: outcome.primary_zone_cards,
        assignment_cards: outcome.assignments.len(),
        dropped_tail_values: outcome.assignments.dropped_tail_values(),
    })
}

/// Rendered deck text plus the per-section counts feeding the report.
#[derive(Debug)]
pub struct TranscodeOutcome {
    pub text: String,
    pub geometry_cards: usize,
    pub zone_cards: usize,
    pub primary_zone_cards: usize,
    pub assignments: MaterialAssignments,
}

/// Drives the five phases over one shared cursor, in deck order.
pub fn transcode_deck<R: BufRead>(cursor: &mut DeckCursor<R>) -> ConvertResult<TranscodeOutcome> {
    let mut deck = FlukaDeck::new();
    deck.push_header();

    copy_title(cursor, &mut deck)?;
    let geometry_cards = copy_geometry_body(cursor, &mut deck)?;

    deck.push_card(ZONE_RULER);
    let zone_stats = copy_zone_list(cursor, &mut deck)?;
    // TODO: emit the blackhole boundary region card here.
    deck.push_card(ZONE_RULER);
    deck.push_card("GEOEND");

    let tail = cursor.remaining_integers()?;
    let assignments = MaterialAssignments::from_flat_tail(&tail);
    deck.push_card(CARD_RULER);
    for card in assignments.cards() {
        deck.push_card(&card);
    }
    // TODO: emit the blackhole material assignment here.
    deck.push_trailer();

    Ok(TranscodeOutcome {
        text: deck.into_text(),
        geometry_cards,
        zone_cards: zone_stats.cards,
        primary_zone_cards: zone_stats.primary_cards,
        assignments,
    })
}

fn copy_title<R: BufRead>(cursor: &mut DeckCursor<R>, deck: &mut FlukaDeck) -> ConvertResult<()> {
    let line = cursor.next_raw_line()?.ok_or_else(|| {
        ConvertError::input_validation(
            "INPUT.SECTION_EOF",
            "input ended before the geometry title line",
        )
    })?;
    deck.push_raw_line(&blank_title_field(&line));
    Ok(())
}

/// Copies geometry-body cards verbatim through the terminating `END` card
/// (inclusive). Returns the number of cards before the terminator.
fn copy_geometry_body<R: BufRead>(
    cursor: &mut DeckCursor<R>,
    deck: &mut FlukaDeck,
) -> ConvertResult<usize> {
    let mut cards = 0;
    loop {
        let line = cursor.next_raw_line()?.ok_or_else(|| {
            ConvertError::input_validation(
                "INPUT.SECTION_EOF",
                "geometry body ended without an END card",
            )
        })?;
        let done = is_section_terminator(&line);
        deck.push_raw_line(&line);
        if done {
            return Ok(cards);
        }
        cards += 1;
    }
}

#[derive(Debug, Default)]
struct ZoneListStats {
    cards: usize,
    primary_cards: usize,
}

/// Copies zone-list cards through the terminating `END` card (inclusive),
/// patching the memory hint column of every primary card. The terminator is
/// copied verbatim: it closes the section rather than defining a zone.
fn copy_zone_list<R: BufRead>(
    cursor: &mut DeckCursor<R>,
    deck: &mut FlukaDeck,
) -> ConvertResult<ZoneListStats> {
    let mut stats = ZoneListStats::default();
    loop {
        let line = cursor.next_raw_line()?.ok_or_else(|| {
            ConvertError::input_validation(
                "INPUT.SECTION_EOF",
                "zone list ended without an END card",
            )
        })?;
        if is_section_terminator(&line) {
            deck.push_raw_line(&line);
            return Ok(stats);
        }

        match classify_zone_record(&line) {
            ZoneRecordClass::Primary => {
                deck.push_raw_line(&patch_primary_zone_record(&line));
                stats.primary_cards += 1;
            }
            ZoneRecordClass::Continuation => deck.push_raw_line(&line),
        }
        stats.cards += 1;
    }
}
