//! ZPL command builder
//!
//! Provides a fluent API for building ZPL II label documents. Field data is
//! written verbatim: `^`, `~` and `\` inside a value are not escaped.

/// Field orientation for scalable font text (`^A0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Normal
    Normal,
    /// Rotated 90 degrees clockwise
    Rotated,
}

impl Orientation {
    fn code(self) -> char {
        match self {
            Self::Normal => 'N',
            Self::Rotated => 'R',
        }
    }
}

/// A text field position and font, in dots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSlot {
    pub x: u32,
    pub y: u32,
    pub orientation: Orientation,
    pub height: u32,
    pub width: u32,
}

/// A Data Matrix barcode position and module size, in dots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixSlot {
    pub x: u32,
    pub y: u32,
    pub module: u32,
}

/// ZPL command builder
///
/// Builds a ZPL document as UTF-8 text. Commands are appended in call order;
/// line breaks are only inserted where a method says so.
pub struct ZplBuilder {
    buf: String,
}

impl ZplBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(512),
        }
    }

    // === Raw Output ===

    /// Write raw ZPL
    pub fn raw(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write raw ZPL followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    // === Printer Setup ===

    /// Printer configuration block sent ahead of the label format
    ///
    /// Selects the default control characters, tear-off position, web
    /// sensing, thermal transfer media, print rate 4, the given darkness
    /// and UTF-8 field encoding (`^CI28`), then saves the settings.
    pub fn printer_setup(&mut self, darkness: u8) -> &mut Self {
        self.line("CT~~CD,~CC^~CT~");
        self.line(&format!(
            "^XA~TA000~JSN^LT0^MNW^MTT^PON^PMN^LH0,0^JMA^PR4,4~SD{}^JUS^LRN^CI28^XZ",
            darkness
        ))
    }

    // === Label Format ===

    /// Start a label format (`^XA`)
    pub fn start_format(&mut self) -> &mut Self {
        self.line("^XA")
    }

    /// Tear-off print mode (`^MMT`)
    pub fn tear_off(&mut self) -> &mut Self {
        self.line("^MMT")
    }

    /// Print width in dots (`^PW`)
    pub fn print_width(&mut self, dots: u32) -> &mut Self {
        self.line(&format!("^PW{}", dots))
    }

    /// Label length in dots (`^LL`), zero-padded to four digits
    pub fn label_length(&mut self, dots: u32) -> &mut Self {
        self.line(&format!("^LL{:04}", dots))
    }

    /// Label shift (`^LS`)
    pub fn label_shift(&mut self, dots: i32) -> &mut Self {
        self.line(&format!("^LS{}", dots))
    }

    // === Fields ===

    /// Data Matrix barcode (`^BX`, ECC 200) holding `data`
    pub fn data_matrix(&mut self, slot: &MatrixSlot, data: &str) -> &mut Self {
        self.line(&format!(
            "^BY110,110^FT{},{}^BXN,{},200,22,22,1,~",
            slot.x, slot.y, slot.module
        ));
        self.field_data(data)
    }

    /// Text in the scalable font (`^A0`)
    pub fn text(&mut self, slot: &TextSlot, data: &str) -> &mut Self {
        self.raw(&format!(
            "^FT{},{}^A0{},{},{}",
            slot.x,
            slot.y,
            slot.orientation.code(),
            slot.height,
            slot.width
        ));
        self.field_data(data)
    }

    /// Field data with hex indicator enabled (`^FH\^FD...^FS`)
    fn field_data(&mut self, data: &str) -> &mut Self {
        self.raw("^FH\\^FD");
        self.raw(data);
        self.line("^FS")
    }

    /// Print one label and end the format (`^PQ1,0,1,Y^XZ`)
    pub fn end_format(&mut self) -> &mut Self {
        self.raw("^PQ1,0,1,Y^XZ")
    }

    // === Build ===

    pub fn build(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for ZplBuilder {
    fn default() -> Self {
        Self::new()
    }
}
