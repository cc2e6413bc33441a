//! # zpl-printer
//!
//! ZPL label printing for networked Zebra printers.
//!
//! ## Scope
//!
//! This crate handles rendering and sending labels:
//! - Label layouts (Medium, Large) with fixed field slots and limits
//! - ZPL command building
//! - Time-based label identifiers
//! - Numbering of a field across copies
//! - Network printing (TCP port 9100), one connection per batch
//!
//! Collecting field values, reading configuration and reporting errors to an
//! operator stay in application code (`label-station`).
//!
//! ## Example
//!
//! ```ignore
//! use zpl_printer::{LabelRequest, LabelSize, NetworkPrinter, PrintJob, PrinterEndpoint};
//!
//! let request = LabelRequest::new(LabelSize::Medium, &["ID123", "Cruise A", "2024-06-01", "Box 1"])?
//!     .with_copies(3)?
//!     .with_increment(true);
//!
//! let endpoint = PrinterEndpoint::new("158.39.88.208")?;
//! let mut job = PrintJob::new(NetworkPrinter::new());
//! let report = job.run_batch(&request, &endpoint).await?;
//! ```

mod error;
mod identifier;
mod increment;
mod job;
mod label;
mod printer;
mod text;
mod zpl;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use identifier::{Identifier, IdentifierGenerator, PREFIX_LEN, new_identifier};
pub use increment::increment_numbers;
pub use job::{BatchReport, BatchState, COPY_INTERVAL, PrintJob, render_batch};
pub use label::{
    FieldSlot, LabelLayout, LabelRequest, LabelSize, NUMBERED_FIELD, PrefixPlacement,
    RenderedDocument, render,
};
pub use printer::{
    Connection, DEFAULT_PORT, NetworkConnection, NetworkPrinter, PrinterEndpoint, Transport,
};
pub use text::{char_len, truncate};
pub use zpl::{MatrixSlot, Orientation, TextSlot, ZplBuilder};
