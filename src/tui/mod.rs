mod export;
mod help;
mod input;
mod state;

use crate::cli::{build_config, Cli};
use crate::model::{ExportEvent, Field, FIELDS};
use crate::orchestrator::{self, UiCommand};
use crate::validate;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::Action;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use state::UiState;
use std::{io, time::Duration, time::Instant};
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// i32::MIN prints as 11 characters; no field needs more.
const MAX_FIELD_LEN: usize = 11;

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ExportEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let cfg = build_config(&args);

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    let res = orchestrator::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    mut event_rx: UnboundedReceiver<ExportEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState::default();
    // The first editor starts at the current wall clock; editors added later
    // always start blank. This runs once, here.
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    state.entries.seed_first(now);
    state.info = "Press 'e' to export, '?' for help".into();

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = input::action_for(&k) else {
                    continue;
                };
                if action == Action::Quit {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
                apply_action(&mut state, action, &cmd_tx);
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Mutate the focused field's text and refresh its marker immediately.
fn edit_field(state: &mut UiState, edit: impl FnOnce(&mut String)) {
    let field = state.field;
    if let Some(editor) = state.entries.editor_mut(state.selected) {
        let mut text = editor.text(field).to_string();
        edit(&mut text);
        editor.set_text(field, text);
        validate::revalidate_field(editor, field);
    }
}

fn apply_action(state: &mut UiState, action: Action, cmd_tx: &UnboundedSender<UiCommand>) {
    match action {
        // Quit is handled by the event loop before we get here.
        Action::Quit => {}
        Action::ToggleHelp => state.tab = (state.tab + 1) % 2,
        Action::AddEntry => {
            let pos = state.entries.add_entry();
            state.selected = pos;
            state.field = Field::Year;
            state.info = format!("Added run #{}", pos + 1);
        }
        Action::RemoveEntry => {
            if state.entries.remove_entry(state.selected) {
                state.clamp_selection();
                state.info = format!("Removed; {} run time(s) left", state.entries.len());
            } else {
                state.info = "The last run time cannot be removed".into();
            }
        }
        Action::NextEntry => {
            if state.selected + 1 < state.entries.len() {
                state.selected += 1;
            }
        }
        Action::PrevEntry => state.selected = state.selected.saturating_sub(1),
        Action::NextField => state.field = state.field.next(),
        Action::PrevField => state.field = state.field.prev(),
        Action::InsertChar(c) => edit_field(state, |text| {
            if text.len() < MAX_FIELD_LEN {
                text.push(c);
            }
        }),
        Action::DeleteChar => edit_field(state, |text| {
            text.pop();
        }),
        Action::ClearField => edit_field(state, String::clear),
        Action::Export => {
            if state.exporting {
                // The controller guards too; reflecting it here keeps the
                // status line accurate without a round trip.
                state.info = "Export already in progress".into();
                return;
            }
            match validate::validate_all(&mut state.entries) {
                Ok(times) => {
                    state.exporting = true;
                    let _ = cmd_tx.send(UiCommand::Export(times));
                }
                Err(invalid) => {
                    state.info = format!(
                        "{invalid} run time{} failed validation - fix the highlighted fields",
                        if invalid == 1 { "" } else { "s" }
                    );
                }
            }
        }
        Action::CopySavedPath => {
            if let Some(ref path) = state.last_saved_path {
                match export::copy_to_clipboard(path) {
                    Ok(()) => state.info = format!("Copied to clipboard: {path}"),
                    Err(e) => state.info = format!("Clipboard copy failed: {e:#}"),
                }
            } else {
                state.info = "Nothing saved yet".into();
            }
        }
    }
}

fn apply_event(state: &mut UiState, ev: ExportEvent) {
    match ev {
        ExportEvent::Requesting { count } => {
            state.exporting = true;
            state.info = format!("Requesting {count} run file(s)…");
        }
        ExportEvent::Info(info) => state.info = info.to_message(),
        ExportEvent::Saved { path } => {
            state.exporting = false;
            let path = path.display().to_string();
            state.info = format!("Saved: {path} (press 'y' to copy path)");
            state.last_saved_path = Some(path);
        }
        ExportEvent::Failed { message } => {
            state.exporting = false;
            state.info = format!("Export failed: {message}");
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Editor"), Line::from("Help")])
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("tcx-export-cli"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_entries(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    draw_status(chunks[2], f, state);
}

fn draw_entries(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    const ROW: u16 = 3;
    let visible = ((area.height / ROW) as usize).max(1);
    // Minimal scroll: keep the selected editor in view.
    let offset = state.selected.saturating_sub(visible - 1);

    let editors = state.entries.editors();
    let count = editors.len().saturating_sub(offset).min(visible);
    let mut constraints = vec![Constraint::Length(ROW); count];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, editor) in editors.iter().enumerate().skip(offset).take(count) {
        let is_selected = i == state.selected;

        let mut spans: Vec<Span> = Vec::new();
        for field in FIELDS {
            let text = editor.text(field);
            let shown = if text.is_empty() { "·" } else { text };
            let mut value_style = Style::default();
            if !editor.is_valid(field) {
                value_style = value_style.fg(Color::Red);
            }
            if is_selected && field == state.field {
                value_style = value_style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(
                format!("{}: ", field.label()),
                Style::default().fg(Color::Gray),
            ));
            spans.push(Span::styled(shown.to_string(), value_style));
            spans.push(Span::raw("   "));
        }

        let border_style = if is_selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let p = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Run #{}", editor.index))
                .border_style(border_style),
        );
        f.render_widget(p, rows[i - offset]);
    }
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let phase = if state.exporting {
        Span::styled("Requesting…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("Idle", Style::default().fg(Color::Green))
    };
    let lines = vec![
        Line::from(vec![phase, Span::raw("  "), Span::raw(state.info.clone())]),
        Line::from(Span::styled(
            "a add · d remove · ←/→ field · ↑/↓ entry · e export · y copy path · ? help · q quit",
            Style::default().fg(Color::Gray),
        )),
    ];
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(p, area);
}
