//! Export lifecycle controller.
//!
//! Owns the in-flight exchange and emits events for presentation layers.
//! At most one request is ever outstanding: triggers arriving while busy are
//! rejected with a notification, never queued or overlapped.

use crate::engine::ExportEngine;
use crate::model::{ExportConfig, ExportEvent, InfoEvent, TimeEntry};
use crate::storage;
use anyhow::Result;
use bytes::Bytes;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI/CLI layers to drive the export lifecycle.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// A validated snapshot of the entry list, in submission order.
    /// Serialized before sending, so later list edits cannot touch it.
    Export(Vec<TimeEntry>),
    Quit,
}

/// Handle for the one outstanding export.
struct RunCtx {
    times: Vec<TimeEntry>,
    handle: Option<tokio::task::JoinHandle<Result<Bytes>>>,
}

/// Spawn the exchange for a snapshot and return its handle.
fn start_export(
    cfg: &ExportConfig,
    times: Vec<TimeEntry>,
    event_tx: UnboundedSender<ExportEvent>,
) -> RunCtx {
    let engine = ExportEngine::new(cfg.clone());
    let task_times = times.clone();
    let handle = tokio::spawn(async move { engine.run(task_times, event_tx).await });
    RunCtx {
        times,
        handle: Some(handle),
    }
}

/// Orchestrate exports based on UI commands and emit events back to
/// presentation layers. Returns once a quit command has been observed and
/// any outstanding exchange has reported its outcome.
pub async fn run_controller(
    cfg: &ExportConfig,
    event_tx: UnboundedSender<ExportEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut run_ctx: Option<RunCtx> = None;
    let mut quit_pending = false;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Export(times)) => {
                        if run_ctx.is_some() {
                            // Busy guard: never two outstanding requests.
                            let _ = event_tx.send(ExportEvent::Info(InfoEvent::ExportBusy));
                        } else {
                            let _ = event_tx.send(ExportEvent::Requesting { count: times.len() });
                            run_ctx = Some(start_export(cfg, times, event_tx.clone()));
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        // Quit waits for the outstanding exchange so its
                        // outcome is still reported.
                        if run_ctx.is_none() {
                            break;
                        }
                        quit_pending = true;
                    }
                }
            }
            // Do not take the JoinHandle before this branch wins; otherwise it
            // can be dropped if another select branch is chosen, and we'll
            // never observe completion.
            maybe_done = async {
                if let Some(ctx) = &mut run_ctx {
                    if let Some(h) = ctx.handle.as_mut() {
                        return Some(h.await);
                    }
                }
                futures::future::pending().await
            } => {
                if let Some(join_res) = maybe_done {
                    let times = match &mut run_ctx {
                        Some(ctx) => {
                            ctx.handle.take();
                            std::mem::take(&mut ctx.times)
                        }
                        None => Vec::new(),
                    };
                    match join_res {
                        Ok(Ok(payload)) => {
                            let name = storage::filename_for(&times);
                            match storage::save_payload(&cfg.output_dir, &name, &payload) {
                                Ok(path) => {
                                    let _ = event_tx.send(ExportEvent::Saved { path });
                                }
                                Err(e) => {
                                    let _ = event_tx.send(ExportEvent::Failed {
                                        message: format!("save failed: {e:#}"),
                                    });
                                }
                            }
                        }
                        Ok(Err(e)) => {
                            let _ = event_tx.send(ExportEvent::Failed {
                                message: format!("{e:#}"),
                            });
                        }
                        Err(e) => {
                            let _ = event_tx.send(ExportEvent::Failed {
                                message: format!("export task join failed: {e}"),
                            });
                        }
                    }
                    run_ctx = None;
                    if quit_pending {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
