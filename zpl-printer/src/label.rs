//! Label layouts and rendering
//!
//! Two physical label sizes are supported, each with a fixed ZPL layout: a
//! Data Matrix barcode holding the full identifier, the identifier prefix as
//! plain text, and four (Medium) or five (Large) lines of operator text.

use std::fmt;
use std::str::FromStr;

use crate::error::{PrintError, PrintResult};
use crate::identifier::Identifier;
use crate::text::{char_len, truncate};
use crate::zpl::{MatrixSlot, Orientation, TextSlot, ZplBuilder};

/// Index of the field that is renumbered between copies (fourth line)
pub const NUMBERED_FIELD: usize = 3;

/// Physical label size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelSize {
    /// 4 text lines, 18 characters each
    #[default]
    Medium,
    /// 25x51 mm, 5 text lines in a large font
    Large,
}

impl LabelSize {
    pub const ALL: [LabelSize; 2] = [LabelSize::Medium, LabelSize::Large];

    /// Fixed layout for this size
    pub fn layout(self) -> &'static LabelLayout {
        match self {
            Self::Medium => &MEDIUM,
            Self::Large => &LARGE,
        }
    }

    /// Number of text fields on the label
    pub fn field_count(self) -> usize {
        self.layout().fields.len()
    }

    /// Maximum characters for the field at `index`
    pub fn max_chars(self, index: usize) -> Option<usize> {
        self.layout().fields.get(index).map(|f| f.max_chars)
    }

    /// Whether `text` fits the field at `index` without being cut
    pub fn fits(self, index: usize, text: &str) -> bool {
        self.max_chars(index)
            .is_some_and(|max| char_len(text) <= max)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for LabelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelSize {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "medium" | "m" => Ok(Self::Medium),
            "large" | "l" => Ok(Self::Large),
            other => Err(PrintError::InvalidRequest(format!(
                "Unknown label size: {}",
                other
            ))),
        }
    }
}

/// Where the identifier prefix is written relative to the text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixPlacement {
    BeforeFields,
    AfterFields,
}

/// A text line and its character limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub slot: TextSlot,
    pub max_chars: usize,
}

/// Fixed ZPL layout of one label size
#[derive(Debug)]
pub struct LabelLayout {
    /// `~SD` darkness
    pub darkness: u8,
    /// `^PW` print width in dots
    pub print_width: u32,
    /// `^LL` label length in dots
    pub label_length: u32,
    pub matrix: MatrixSlot,
    pub prefix: TextSlot,
    pub prefix_placement: PrefixPlacement,
    pub fields: &'static [FieldSlot],
}

const fn field(x: u32, y: u32, height: u32, width: u32, max_chars: usize) -> FieldSlot {
    FieldSlot {
        slot: TextSlot {
            x,
            y,
            orientation: Orientation::Normal,
            height,
            width,
        },
        max_chars,
    }
}

static MEDIUM: LabelLayout = LabelLayout {
    darkness: 30,
    print_width: 898,
    label_length: 295,
    matrix: MatrixSlot {
        x: 506,
        y: 111,
        module: 4,
    },
    prefix: TextSlot {
        x: 462,
        y: 33,
        orientation: Orientation::Rotated,
        height: 21,
        width: 21,
    },
    prefix_placement: PrefixPlacement::AfterFields,
    fields: &[
        field(445, 151, 21, 21, 18),
        field(445, 184, 21, 21, 18),
        field(445, 217, 21, 21, 18),
        field(445, 253, 21, 21, 18),
    ],
};

static LARGE: LabelLayout = LabelLayout {
    darkness: 28,
    print_width: 602,
    label_length: 295,
    matrix: MatrixSlot {
        x: 465,
        y: 143,
        module: 5,
    },
    prefix: TextSlot {
        x: 491,
        y: 171,
        orientation: Orientation::Normal,
        height: 21,
        width: 21,
    },
    prefix_placement: PrefixPlacement::BeforeFields,
    fields: &[
        field(35, 67, 42, 40, 20),
        field(35, 119, 42, 40, 20),
        field(35, 171, 42, 40, 20),
        field(35, 226, 42, 40, 20),
        field(35, 278, 42, 40, 36),
    ],
};

/// What to print: label size, field texts, copy count and numbering
///
/// Field texts are cut to their slot limits on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    size: LabelSize,
    fields: Vec<String>,
    copies: u32,
    increment: bool,
}

impl LabelRequest {
    /// Create a request for one copy without numbering
    ///
    /// `fields` must hold exactly [`LabelSize::field_count`] entries.
    pub fn new<S: AsRef<str>>(size: LabelSize, fields: &[S]) -> PrintResult<Self> {
        check_field_count(size, fields.len())?;

        let fields = size
            .layout()
            .fields
            .iter()
            .zip(fields)
            .map(|(slot, text)| truncate(text.as_ref(), slot.max_chars).to_string())
            .collect();

        Ok(Self {
            size,
            fields,
            copies: 1,
            increment: false,
        })
    }

    /// Set the number of copies (at least one)
    pub fn with_copies(mut self, copies: u32) -> PrintResult<Self> {
        if copies == 0 {
            return Err(PrintError::InvalidRequest(
                "Copy count must be at least 1".to_string(),
            ));
        }
        self.copies = copies;
        Ok(self)
    }

    /// Renumber the fourth field on every copy after the first
    pub fn with_increment(mut self, increment: bool) -> Self {
        self.increment = increment;
        self
    }

    pub fn size(&self) -> LabelSize {
        self.size
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }

    pub fn increment(&self) -> bool {
        self.increment
    }
}

fn check_field_count(size: LabelSize, got: usize) -> PrintResult<()> {
    let expected = size.field_count();
    if got != expected {
        return Err(PrintError::InvalidRequest(format!(
            "{} label takes {} fields, got {}",
            size, expected, got
        )));
    }
    Ok(())
}

/// A complete ZPL document ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes as sent on the wire
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a label to ZPL
///
/// Each field is truncated to its slot limit. Field values are not escaped,
/// so they must not contain `^` or `~`.
pub fn render<S: AsRef<str>>(
    size: LabelSize,
    identifier: &Identifier,
    fields: &[S],
) -> PrintResult<RenderedDocument> {
    check_field_count(size, fields.len())?;

    let layout = size.layout();
    let id = identifier.as_string();
    let prefix = identifier.prefix();

    let mut b = ZplBuilder::new();
    b.newline();
    b.printer_setup(layout.darkness);
    b.start_format()
        .tear_off()
        .print_width(layout.print_width)
        .label_length(layout.label_length)
        .label_shift(0);
    b.data_matrix(&layout.matrix, &id);

    if layout.prefix_placement == PrefixPlacement::BeforeFields {
        b.text(&layout.prefix, &prefix);
    }
    for (slot, text) in layout.fields.iter().zip(fields) {
        b.text(&slot.slot, truncate(text.as_ref(), slot.max_chars));
    }
    if layout.prefix_placement == PrefixPlacement::AfterFields {
        b.text(&layout.prefix, &prefix);
    }

    b.end_format();

    Ok(RenderedDocument(b.build()))
}
