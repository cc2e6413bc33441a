//! Label field values from the command line and presets.

use anyhow::bail;
use chrono::NaiveDate;
use zpl_printer::LabelSize;

/// Text put on the second line by `--test`
pub const TEST_TEXT: &str = "This is a test";

/// Presets that overwrite a line
#[derive(Debug, Clone, Copy, Default)]
pub struct Presets {
    /// Today's date (ISO 8601) on the first line
    pub date: Option<NaiveDate>,
    /// [`TEST_TEXT`] on the second line
    pub test: bool,
}

/// Build the field list for `size`
///
/// Missing lines are left empty; more values than lines is an error.
pub fn build_fields(size: LabelSize, text: &[String], presets: Presets) -> anyhow::Result<Vec<String>> {
    let count = size.field_count();
    if text.len() > count {
        bail!("A {} label has {} lines, got {} values", size, count, text.len());
    }

    let mut fields = text.to_vec();
    fields.resize(count, String::new());

    if let Some(date) = presets.date {
        fields[0] = date.format("%Y-%m-%d").to_string();
    }
    if presets.test {
        fields[1] = TEST_TEXT.to_string();
    }

    Ok(fields)
}
