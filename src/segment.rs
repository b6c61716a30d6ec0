//! Seven-segment glyphs for the common-anode display.
//!
//! Patterns are active-low: a cleared bit lights the segment.
//!
//! Layout (7 bits, bit 7 unused):
//! ```text
//! Bit:  6 5 4 3 2 1 0
//! Seg:  A D E F G C B
//! ```
//!
//! Bits 0-5 go out on the segment bus. Segment A is wired to its own
//! line, driven from bit 6.

/// Number of symbols in the glyph table.
pub const GLYPH_COUNT: usize = 15;

/// Encoded patterns indexed by [`Glyph`] discriminant.
const GLYPH_TABLE: [u8; GLYPH_COUNT] = [
    0b000_0100, // 0
    0b111_1100, // 1
    0b000_1010, // 2
    0b001_1000, // 3
    0b111_0000, // 4
    0b001_0001, // 5
    0b000_0001, // 6
    0b011_1100, // 7
    0b000_0000, // 8
    0b001_0000, // 9
    0b111_1011, // -
    0b011_0010, // °
    0b000_0111, // C
    0b110_0000, // H
    0b111_1111, // blank
];

/// One of the 15 symbols the display can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    D0 = 0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Minus,
    Degree,
    LetterC,
    LetterH,
    Blank,
}

impl Glyph {
    const ALL: [Glyph; GLYPH_COUNT] = [
        Glyph::D0,
        Glyph::D1,
        Glyph::D2,
        Glyph::D3,
        Glyph::D4,
        Glyph::D5,
        Glyph::D6,
        Glyph::D7,
        Glyph::D8,
        Glyph::D9,
        Glyph::Minus,
        Glyph::Degree,
        Glyph::LetterC,
        Glyph::LetterH,
        Glyph::Blank,
    ];

    /// Glyph for table index `0..=14`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Glyph for a single decimal digit `0..=9`.
    pub fn digit(value: u8) -> Option<Self> {
        if value < 10 {
            Self::from_index(value)
        } else {
            None
        }
    }

    /// Table index of this glyph.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up the encoded segment pattern.
    pub const fn pattern(self) -> SegmentPattern {
        SegmentPattern(GLYPH_TABLE[self as usize])
    }
}

/// Digit lookup service: table index to encoded pattern.
///
/// Total over `0..=14`; anything else is `None`.
pub fn encode(index: u8) -> Option<SegmentPattern> {
    Glyph::from_index(index).map(Glyph::pattern)
}

/// Individual segments of one digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    /// Bit position inside a [`SegmentPattern`].
    const fn bit(self) -> u8 {
        match self {
            Segment::B => 0,
            Segment::C => 1,
            Segment::G => 2,
            Segment::F => 3,
            Segment::E => 4,
            Segment::D => 5,
            Segment::A => 6,
        }
    }
}

/// Encoded, active-low segment pattern for one digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// Mask of the bits carried on the shared segment bus (B..D).
    pub const BUS_MASK: u8 = 0b011_1111;

    /// Number of lines on the segment bus.
    pub const BUS_WIDTH: usize = 6;

    /// Raw pattern byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The part of the pattern written to the segment bus.
    pub const fn bus_bits(self) -> u8 {
        self.0 & Self::BUS_MASK
    }

    /// Level of the separately wired segment A line (pattern bit 6).
    pub const fn segment_a_high(self) -> bool {
        self.0 & (1 << Segment::A.bit()) != 0
    }

    /// Whether a segment is lit (its bit is cleared).
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & (1 << segment.bit()) == 0
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }
}

/// The two encoded digits currently meant to be on the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    pub tens: SegmentPattern,
    pub units: SegmentPattern,
}

impl DisplayBuffer {
    /// Both digits fully lit, shown from power-on until the first write.
    pub const LAMP_TEST: Self = Self::from_glyphs(Glyph::D8, Glyph::D8);

    /// Both digits dark.
    pub const BLANK: Self = Self::from_glyphs(Glyph::Blank, Glyph::Blank);

    /// Encode a pair of glyphs. The only way to build a buffer, so a raw
    /// digit can never reach the display.
    pub const fn from_glyphs(tens: Glyph, units: Glyph) -> Self {
        Self {
            tens: tens.pattern(),
            units: units.pattern(),
        }
    }
}
