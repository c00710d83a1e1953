use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("a", Style::default().fg(Color::Magenta)),
            Span::raw("           Add a run time"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("d", Style::default().fg(Color::Magenta)),
            Span::raw("           Remove the selected run time"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("e", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw("   Export"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y", Style::default().fg(Color::Magenta)),
            Span::raw("           Copy last saved path to clipboard"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("?", Style::default().fg(Color::Magenta)),
            Span::raw("           Toggle this help"),
        ]),
        Line::from(""),
        Line::from("Editing:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("0-9", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("-", Style::default().fg(Color::Magenta)),
            Span::raw("     Type into the focused field"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("←/→", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("Tab", Style::default().fg(Color::Magenta)),
            Span::raw("  Move between fields"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("j/k", Style::default().fg(Color::Magenta)),
            Span::raw("  Move between run times"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Backspace", Style::default().fg(Color::Magenta)),
            Span::raw("   Delete the last digit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Delete", Style::default().fg(Color::Magenta)),
            Span::raw("      Clear the focused field"),
        ]),
        Line::from(""),
        Line::from("Invalid fields are highlighted in red; fix them and export again."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
