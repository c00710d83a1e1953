use crate::entries::EntryList;
use crate::model::{ExportConfig, ExportEvent, FIELDS};
use crate::orchestrator::{self, UiCommand};
use crate::validate;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "tcx-export-cli",
    version,
    about = "Compose run start times and export TCX activity files"
)]
pub struct Cli {
    /// Base URL for the TCX generation service
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Directory generated files are saved into (default: the download
    /// directory, falling back to the current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Export the given run start time and exit (no TUI).
    /// Repeatable for a bundled archive; format "YYYY-MM-DD HH:MM:SS".
    #[arg(long = "time", value_name = "TIME")]
    pub times: Vec<String>,
}

pub async fn run(args: Cli) -> Result<()> {
    if !args.times.is_empty() {
        return run_headless(args).await;
    }

    #[cfg(feature = "tui")]
    {
        return crate::tui::run(args).await;
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        anyhow::bail!("built without TUI support; pass --time to export headlessly")
    }
}

/// Build an `ExportConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ExportConfig {
    ExportConfig {
        base_url: args.base_url.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(crate::storage::default_output_dir),
        user_agent: format!("tcx-export-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Split a "YYYY-MM-DD HH:MM:SS" argument into the six field texts.
/// Range checking happens in the shared validator, not here.
fn split_time_arg(raw: &str) -> Result<[String; 6]> {
    let fields: Vec<&str> = raw
        .trim()
        .split(|c: char| c == ' ' || c == '-' || c == ':' || c == 'T')
        .filter(|s| !s.is_empty())
        .take(7)
        .collect();
    if fields.len() != 6 {
        anyhow::bail!("expected \"YYYY-MM-DD HH:MM:SS\", got {raw:?}");
    }
    Ok(std::array::from_fn(|i| fields[i].to_string()))
}

/// Drive the same validate/export pipeline the TUI uses, without a terminal:
/// parse the --time arguments into editors, validate the whole list, run one
/// exchange, print the saved path on stdout.
async fn run_headless(args: Cli) -> Result<()> {
    let cfg = build_config(&args);

    let mut list = EntryList::new();
    // The first --time lands in the initial editor; the rest are appended.
    for (i, raw) in args.times.iter().enumerate() {
        let texts = split_time_arg(raw)?;
        let pos = if i == 0 { 0 } else { list.add_entry() };
        if let Some(editor) = list.editor_mut(pos) {
            for (field, text) in FIELDS.into_iter().zip(texts) {
                editor.set_text(field, text);
            }
        }
    }

    let times = match validate::validate_all(&mut list) {
        Ok(times) => times,
        Err(invalid) => {
            let mut detail = Vec::new();
            for editor in list.editors() {
                for field in FIELDS {
                    if !editor.is_valid(field) {
                        detail.push(format!("entry #{}: invalid {}", editor.index, field.label()));
                    }
                }
            }
            anyhow::bail!(
                "{invalid} of {} entr{} failed validation:\n  {}",
                list.len(),
                if list.len() == 1 { "y" } else { "ies" },
                detail.join("\n  ")
            );
        }
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ExportEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
    let (out_tx, out_handle) = spawn_output_writer();

    // One export, then quit; the controller reports the outcome before it
    // returns and drops the event channel.
    let _ = cmd_tx.send(UiCommand::Export(times));
    let _ = cmd_tx.send(UiCommand::Quit);
    drop(cmd_tx);

    let ctl_cfg = cfg.clone();
    let controller =
        tokio::spawn(async move { orchestrator::run_controller(&ctl_cfg, event_tx, cmd_rx).await });

    let mut saved: Option<PathBuf> = None;
    let mut failure: Option<String> = None;
    while let Some(ev) = event_rx.recv().await {
        match ev {
            ExportEvent::Requesting { count } => {
                let _ = out_tx.send(OutputLine::Stderr(format!(
                    "Exporting {count} run time(s)…"
                )));
            }
            ExportEvent::Info(info) => {
                let _ = out_tx.send(OutputLine::Stderr(info.to_message()));
            }
            ExportEvent::Saved { path } => {
                let _ = out_tx.send(OutputLine::Stdout(path.display().to_string()));
                saved = Some(path);
            }
            ExportEvent::Failed { message } => {
                let _ = out_tx.send(OutputLine::Stderr(format!("Export failed: {message}")));
                failure = Some(message);
            }
        }
    }

    controller.await.context("controller task failed")??;

    drop(out_tx);
    let _ = out_handle.await;

    if let Some(message) = failure {
        anyhow::bail!("{message}");
    }
    saved.context("export finished without saving a file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_arg_splits_into_six_fields() {
        let texts = split_time_arg("2024-3-5 7:8:9").unwrap();
        assert_eq!(texts, ["2024", "3", "5", "7", "8", "9"].map(String::from));
    }

    #[test]
    fn time_arg_keeps_digits_as_typed() {
        // Leading zeros survive the split; they still parse in range.
        let texts = split_time_arg("2024-03-05 07:08:09").unwrap();
        assert_eq!(texts[1], "03");
        assert_eq!(texts[3], "07");
    }

    #[test]
    fn time_arg_accepts_t_separator() {
        let texts = split_time_arg("2024-12-31T23:59:58").unwrap();
        assert_eq!(texts[0], "2024");
        assert_eq!(texts[5], "58");
    }

    #[test]
    fn malformed_time_arg_is_rejected() {
        assert!(split_time_arg("2024-03-05").is_err());
        assert!(split_time_arg("2024-03-05 07:08").is_err());
        assert!(split_time_arg("2024-03-05 07:08:09:10").is_err());
        assert!(split_time_arg("").is_err());
    }
}
