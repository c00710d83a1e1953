//! Generation exchange engine.
//!
//! Owns the HTTP side of one export: build the client, send the entries,
//! hand back the opaque payload. Saving and event fan-out stay with the
//! orchestrator.

mod service;

use crate::model::{ExportConfig, ExportEvent, InfoEvent, TimeEntry};
use anyhow::Result;
use bytes::Bytes;
use tokio::sync::mpsc;

pub struct ExportEngine {
    cfg: ExportConfig,
}

impl ExportEngine {
    pub fn new(cfg: ExportConfig) -> Self {
        Self { cfg }
    }

    /// Run one exchange for the given ordered entries.
    ///
    /// Exactly one request is issued per call. Transport failures and
    /// non-success statuses surface as errors; the caller treats both as the
    /// same generation failure.
    pub async fn run(
        self,
        times: Vec<TimeEntry>,
        event_tx: mpsc::UnboundedSender<ExportEvent>,
    ) -> Result<Bytes> {
        let client = service::GenerateClient::new(&self.cfg)?;
        let _ = event_tx.send(ExportEvent::Info(InfoEvent::Message(format!(
            "Requesting {} run file(s) from {}",
            times.len(),
            self.cfg.base_url
        ))));
        client.generate(&times).await
    }
}
