//! Print run: turn command-line input into a label batch and send it.

use std::io::Write;

use tracing::{debug, info};
use zpl_printer::{
    BatchReport, LabelRequest, NetworkPrinter, PrintJob, PrinterEndpoint, Transport, render_batch,
};

use crate::cli::Cli;
use crate::config::PrinterDefaults;
use crate::fields::{Presets, build_fields};

/// What the operator asked for, resolved against configuration
#[derive(Debug, Clone)]
pub struct PrintRun {
    pub request: LabelRequest,
    /// Printer address; `None` for a dry run
    pub endpoint: Option<PrinterEndpoint>,
}

impl PrintRun {
    /// Resolve fields, presets and printer address
    ///
    /// An explicit `--ip` wins over the configured default for the label size.
    pub fn from_cli(cli: &Cli, printers: &PrinterDefaults) -> anyhow::Result<Self> {
        let presets = Presets {
            date: cli.date.then(|| chrono::Local::now().date_naive()),
            test: cli.test,
        };
        let fields = build_fields(cli.size, &cli.text, presets)?;

        let request = LabelRequest::new(cli.size, &fields)?
            .with_copies(cli.copies)?
            .with_increment(cli.increment);

        let endpoint = if cli.dry_run {
            None
        } else {
            let host = cli.ip.as_deref().unwrap_or_else(|| printers.host_for(cli.size));
            Some(PrinterEndpoint::from_addr(host)?)
        };

        Ok(Self { request, endpoint })
    }

    /// Send the batch, or write it to `out` for a dry run
    ///
    /// Returns the field values the next batch should start from.
    pub async fn execute<T: Transport>(
        &self,
        job: &mut PrintJob<T>,
        out: &mut impl Write,
    ) -> anyhow::Result<Vec<String>> {
        match &self.endpoint {
            Some(endpoint) => {
                let BatchReport {
                    documents_sent,
                    fields,
                } = job.run_batch(&self.request, endpoint).await?;
                info!(documents_sent, printer = %endpoint, "Labels sent");
                Ok(fields)
            }
            None => {
                let (docs, fields) = render_batch(&self.request)?;
                for doc in &docs {
                    writeln!(out, "{}", doc)?;
                }
                debug!(count = docs.len(), "Dry run written");
                Ok(fields)
            }
        }
    }
}

/// Run a print job against the network printer
pub async fn run(cli: &Cli, printers: &PrinterDefaults) -> anyhow::Result<Vec<String>> {
    let run = PrintRun::from_cli(cli, printers)?;
    let mut job = PrintJob::new(NetworkPrinter::new());
    run.execute(&mut job, &mut std::io::stdout()).await
}
