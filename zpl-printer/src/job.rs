//! Print job driver
//!
//! Runs one batch: connect, then for every copy renumber (optional), render
//! and send, then close. A batch owns its connection; running two batches on
//! the same [`PrintJob`] at once is prevented by `&mut self`.

use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::error::PrintResult;
use crate::identifier::new_identifier;
use crate::increment::increment_numbers;
use crate::label::{LabelRequest, NUMBERED_FIELD, RenderedDocument, render};
use crate::printer::{Connection, PrinterEndpoint, Transport};

/// Pause after every copy
pub const COPY_INTERVAL: Duration = Duration::from_micros(2);

/// Where a batch currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Connecting,
    Sending { copy: u32 },
    Closed,
    Failed,
}

/// Result of a finished batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub documents_sent: u32,
    /// Field values the next batch should start from
    ///
    /// With numbering on, the numbered field is already advanced past the
    /// last copy printed.
    pub fields: Vec<String>,
}

/// Print job executor
///
/// Sends label batches through a [`Transport`].
pub struct PrintJob<T: Transport> {
    transport: T,
    interval: Duration,
    state: BatchState,
}

impl<T: Transport> PrintJob<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            interval: COPY_INTERVAL,
            state: BatchState::Idle,
        }
    }

    /// Override the pause between copies
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Print all copies of `request` on the printer at `endpoint`
    ///
    /// The connection is opened once and closed once. If it cannot be opened,
    /// nothing is rendered or sent and the connection error is returned.
    /// A failed write aborts the batch; copies already sent stay printed.
    #[instrument(skip(self, request), fields(addr = %endpoint, size = %request.size(), copies = request.copies()))]
    pub async fn run_batch(
        &mut self,
        request: &LabelRequest,
        endpoint: &PrinterEndpoint,
    ) -> PrintResult<BatchReport> {
        self.state = BatchState::Connecting;

        let mut conn = match self.transport.open(endpoint).await {
            Ok(conn) => conn,
            Err(e) => {
                error!(error = %e, "Could not connect to printer");
                self.state = BatchState::Failed;
                return Err(e);
            }
        };

        let mut batch = Batch::new(request);
        let mut sent = 0;

        for copy in 1..=request.copies() {
            self.state = BatchState::Sending { copy };

            let result = match batch.next_document() {
                Ok(doc) => conn.send(doc).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                error!(copy, error = %e, "Batch aborted");
                conn.close().await;
                self.state = BatchState::Failed;
                return Err(e);
            }

            sent += 1;
            tokio::time::sleep(self.interval).await;
        }

        let fields = batch.into_next_fields();
        conn.close().await;

        let fields = match fields {
            Ok(fields) => fields,
            Err(e) => {
                error!(error = %e, "Could not number the next batch");
                self.state = BatchState::Failed;
                return Err(e);
            }
        };

        self.state = BatchState::Closed;
        info!(sent, "Batch sent");

        Ok(BatchReport {
            documents_sent: sent,
            fields,
        })
    }
}

/// Render every copy of `request` without sending anything
///
/// Returns the documents and the field values the next batch should start
/// from, as in [`BatchReport::fields`].
pub fn render_batch(request: &LabelRequest) -> PrintResult<(Vec<RenderedDocument>, Vec<String>)> {
    let mut batch = Batch::new(request);
    let docs = (0..request.copies())
        .map(|_| batch.next_document())
        .collect::<PrintResult<Vec<_>>>()?;
    Ok((docs, batch.into_next_fields()?))
}

/// Per-batch field state
///
/// The first copy uses the fields as given. With numbering on, every later
/// copy first advances the numbers in the fourth field, so the values run
/// on from the previous copy.
struct Batch<'a> {
    request: &'a LabelRequest,
    fields: Vec<String>,
    rendered: u32,
}

impl<'a> Batch<'a> {
    fn new(request: &'a LabelRequest) -> Self {
        Self {
            request,
            fields: request.fields().to_vec(),
            rendered: 0,
        }
    }

    fn next_document(&mut self) -> PrintResult<RenderedDocument> {
        if self.request.increment() && self.rendered > 0 {
            self.advance()?;
        }

        let doc = render(self.request.size(), &new_identifier(), &self.fields)?;
        self.rendered += 1;
        Ok(doc)
    }

    fn advance(&mut self) -> PrintResult<()> {
        let size = self.request.size();
        let numbered = &mut self.fields[NUMBERED_FIELD];
        let next = increment_numbers(numbered, 1)?;
        if next == *numbered {
            warn!(text = %next, "Numbered field has no digits");
        } else if size.fits(NUMBERED_FIELD, numbered) && !size.fits(NUMBERED_FIELD, &next) {
            warn!(text = %next, "Numbered field no longer fits, labels will be cut");
        }
        *numbered = next;
        Ok(())
    }

    /// Fields for the batch after this one
    fn into_next_fields(mut self) -> PrintResult<Vec<String>> {
        if self.request.increment() && self.rendered > 0 {
            self.advance()?;
        }
        Ok(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrintError;
    use crate::label::LabelSize;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct Record {
        opens: u32,
        closes: u32,
        sent: Vec<String>,
    }

    /// In-memory transport that records what a batch does
    #[derive(Clone, Default)]
    struct RecordingTransport {
        record: Arc<Mutex<Record>>,
        refuse: bool,
        fail_on_send: Option<usize>,
    }

    struct RecordingConnection {
        record: Arc<Mutex<Record>>,
        open: bool,
        fail_on_send: Option<usize>,
    }

    impl Transport for RecordingTransport {
        type Connection = RecordingConnection;

        async fn open(&self, endpoint: &PrinterEndpoint) -> PrintResult<RecordingConnection> {
            if self.refuse {
                return Err(PrintError::Connection(format!("{}: refused", endpoint)));
            }
            self.record.lock().unwrap().opens += 1;
            Ok(RecordingConnection {
                record: self.record.clone(),
                open: true,
                fail_on_send: self.fail_on_send,
            })
        }
    }

    impl Connection for RecordingConnection {
        async fn send(&mut self, document: RenderedDocument) -> PrintResult<()> {
            let mut record = self.record.lock().unwrap();
            if !self.open || self.fail_on_send == Some(record.sent.len()) {
                return Err(PrintError::Write("broken pipe".into()));
            }
            record.sent.push(document.into_string());
            Ok(())
        }

        async fn close(&mut self) {
            if self.open {
                self.open = false;
                self.record.lock().unwrap().closes += 1;
            }
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    fn endpoint() -> PrinterEndpoint {
        PrinterEndpoint::new("127.0.0.1").unwrap()
    }

    fn cruise_request(copies: u32, increment: bool) -> LabelRequest {
        LabelRequest::new(
            LabelSize::Medium,
            &["ID123", "Cruise A", "2024-06-01", "Box 1"],
        )
        .unwrap()
        .with_copies(copies)
        .unwrap()
        .with_increment(increment)
    }

    #[tokio::test]
    async fn test_batch_with_increment() {
        let transport = RecordingTransport::default();
        let mut job = PrintJob::new(transport.clone()).with_interval(Duration::ZERO);

        let report = job.run_batch(&cruise_request(3, true), &endpoint()).await.unwrap();

        let record = transport.record.lock().unwrap();
        assert_eq!(record.opens, 1);
        assert_eq!(record.closes, 1);
        assert_eq!(record.sent.len(), 3);
        for (doc, n) in record.sent.iter().zip(1..) {
            assert!(doc.contains(&format!("^FT445,253^A0N,21,21^FH\\^FDBox {}^FS", n)));
            assert!(doc.contains("^FDID123^FS"));
            assert!(doc.contains("^FDCruise A^FS"));
            assert!(doc.contains("^FD2024-06-01^FS"));
        }
        assert_ne!(record.sent[0], record.sent[1]);

        assert_eq!(report.documents_sent, 3);
        assert_eq!(report.fields[NUMBERED_FIELD], "Box 4");
        assert_eq!(job.state(), BatchState::Closed);
    }

    #[tokio::test]
    async fn test_chained_batches_never_repeat() {
        let transport = RecordingTransport::default();
        let mut job = PrintJob::new(transport.clone()).with_interval(Duration::ZERO);

        let first = job.run_batch(&cruise_request(3, true), &endpoint()).await.unwrap();
        let request = LabelRequest::new(LabelSize::Medium, &first.fields)
            .unwrap()
            .with_copies(2)
            .unwrap()
            .with_increment(true);
        let second = job.run_batch(&request, &endpoint()).await.unwrap();

        let record = transport.record.lock().unwrap();
        assert_eq!(record.sent.len(), 5);
        for n in 1..=5 {
            let label = format!("^FDBox {}^FS", n);
            assert_eq!(record.sent.iter().filter(|d| d.contains(&label)).count(), 1);
        }
        assert_eq!(second.fields[NUMBERED_FIELD], "Box 6");
    }

    #[tokio::test]
    async fn test_batch_without_increment() {
        let transport = RecordingTransport::default();
        let mut job = PrintJob::new(transport.clone()).with_interval(Duration::ZERO);

        job.run_batch(&cruise_request(2, false), &endpoint()).await.unwrap();

        let record = transport.record.lock().unwrap();
        assert_eq!(record.sent.len(), 2);
        assert!(record.sent.iter().all(|d| d.contains("^FDBox 1^FS")));
        // fresh identifier per copy
        assert_ne!(record.sent[0], record.sent[1]);
    }

    #[tokio::test]
    async fn test_connect_failure_sends_nothing() {
        let transport = RecordingTransport {
            refuse: true,
            ..Default::default()
        };
        let mut job = PrintJob::new(transport.clone()).with_interval(Duration::ZERO);

        let err = job.run_batch(&cruise_request(3, true), &endpoint()).await.unwrap_err();

        assert!(err.is_connection_error());
        assert_eq!(job.state(), BatchState::Failed);
        let record = transport.record.lock().unwrap();
        assert_eq!(record.opens, 0);
        assert!(record.sent.is_empty());
        assert_eq!(record.closes, 0);
    }

    #[tokio::test]
    async fn test_write_failure_aborts_batch() {
        let transport = RecordingTransport {
            fail_on_send: Some(1),
            ..Default::default()
        };
        let mut job = PrintJob::new(transport.clone()).with_interval(Duration::ZERO);

        let err = job.run_batch(&cruise_request(3, false), &endpoint()).await.unwrap_err();

        assert!(matches!(err, PrintError::Write(_)));
        assert_eq!(job.state(), BatchState::Failed);
        let record = transport.record.lock().unwrap();
        assert_eq!(record.sent.len(), 1);
        assert_eq!(record.closes, 1);
    }

    #[test]
    fn test_render_batch() {
        let (docs, fields) = render_batch(&cruise_request(4, true)).unwrap();

        assert_eq!(docs.len(), 4);
        assert!(!docs.iter().any(|d| d.as_str().contains("^FDBox 5^FS")));
        assert!(docs[3].as_str().contains("^FDBox 4^FS"));
        assert_eq!(fields[NUMBERED_FIELD], "Box 5");
        assert_eq!(fields[0], "ID123");
    }

    #[test]
    fn test_increment_keeps_full_text() {
        // 18 characters: the next number no longer fits on the label
        let request = LabelRequest::new(LabelSize::Medium, &["", "", "", "Sample number 9999"])
            .unwrap()
            .with_copies(2)
            .unwrap()
            .with_increment(true);

        let (docs, fields) = render_batch(&request).unwrap();

        assert!(!LabelSize::Medium.fits(NUMBERED_FIELD, &fields[NUMBERED_FIELD]));
        assert_eq!(fields[NUMBERED_FIELD], "Sample number 10001");
        assert!(docs[1].as_str().contains("^FDSample number 1000^FS"));
    }
}
