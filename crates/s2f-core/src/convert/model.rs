use crate::serialization::format_fixed_i64;

/// Version advertised in the generated deck title and the usage banner.
pub const CONVERTER_VERSION: &str = "1.1";

/// 80-column ruler separating control-card sections.
pub const CARD_RULER: &str =
    "*---+----1----+----2----+----3----+----4----+----5----+----6----+----7----+----8";

/// Ruler framing the region/zone list.
pub const ZONE_RULER: &str =
    "*-reg-----or-----or-----or-----or-----or-----or-----or-----or-----or-----";

/// SHIELD reserves material index 0 for vacuum, FLUKA reserves index 2; no
/// other material remapping is performed.
pub const VACUUM_OFFSET: i64 = 2;

const ASSIGNMAT_FIELD_WIDTH: usize = 5;

/// Renders one material-to-zone assignment card with both numeric fields in
/// fixed five-column float style.
pub fn render_assignmat(material: i64, zone: i64) -> String {
    format!(
        "ASSIGNMAT    {}.0   {}.0",
        format_fixed_i64(material, ASSIGNMAT_FIELD_WIDTH),
        format_fixed_i64(zone, ASSIGNMAT_FIELD_WIDTH)
    )
}

/// The flat numeric tail of the deck split into its two positional halves:
/// material indices first, zone indices second, paired by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialAssignments {
    materials: Vec<i64>,
    zones: Vec<i64>,
    dropped_tail_values: usize,
}

impl MaterialAssignments {
    /// Halves the flat tail. An odd element count drops the final unpaired
    /// value without error; the drop is surfaced so callers can warn.
    pub fn from_flat_tail(values: &[i64]) -> Self {
        let pair_count = values.len() / 2;
        Self {
            materials: values[..pair_count].to_vec(),
            zones: values[pair_count..pair_count * 2].to_vec(),
            dropped_tail_values: values.len() - pair_count * 2,
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn dropped_tail_values(&self) -> usize {
        self.dropped_tail_values
    }

    /// Assignment cards in deck order, with the vacuum offset applied to the
    /// material field.
    pub fn cards(&self) -> impl Iterator<Item = String> + '_ {
        self.materials
            .iter()
            .zip(&self.zones)
            .map(|(material, zone)| render_assignmat(material + VACUUM_OFFSET, *zone))
    }
}

/// Accumulates the FLUKA deck text in output order.
#[derive(Debug, Default)]
pub struct FlukaDeck {
    text: String,
}

impl FlukaDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one control card and its line terminator.
    pub fn push_card(&mut self, card: &str) {
        self.text.push_str(card);
        self.text.push('\n');
    }

    /// Appends an input line verbatim; the line carries its own newline when
    /// the source had one.
    pub fn push_raw_line(&mut self, line: &str) {
        self.text.push_str(line);
    }

    /// Static control cards opening the deck.
    pub fn push_header(&mut self) {
        self.push_card("TITLE");
        self.push_card(&format!(
            "SHIELD2FLUKA ver.{CONVERTER_VERSION} generated .inp file."
        ));
        self.push_card(CARD_RULER);
        self.push_card("DEFAULTS                                                              HADROTHE  ");
        self.push_card(CARD_RULER);
        self.push_card("BEAM           -0.15       0.0       0.0       4.0       4.0       1.0PROTON    ");
        self.push_card("BEAMPOS          0.0       0.0      -1.0       0.0       0.0          POSITIVE  ");
        self.push_card(CARD_RULER);
        self.push_card("GEOBEGIN                                                              COMBINAT  ");
    }

    /// Static control cards closing the deck.
    pub fn push_trailer(&mut self) {
        self.push_card(CARD_RULER);
        self.push_card("RANDOMIZE        1.0");
        self.push_card(CARD_RULER);
        self.push_card("START         20000.");
        self.push_card("STOP");
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
