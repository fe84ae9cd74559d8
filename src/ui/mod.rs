use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, InputMode, StatusLevel};
use crate::core::Module;
use crate::domain::dashboard::PowerState;

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    app.dashboard.render(f, areas.main, &app.ctx);
    draw_toast_line(f, areas.toast_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let snap = &app.ctx.snapshot;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Guide Robot ")
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(34),
            Constraint::Min(10),
            Constraint::Length(16),
        ])
        .split(inner);

    let power = snap.power();
    let (button_label, badge_style) = match power {
        PowerState::Running => (
            "[p] DEACTIVATE",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        PowerState::Standby => (
            "[p] ACTIVATE",
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
    };
    let power_line = Line::from(vec![
        Span::styled(button_label, Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(format!(" {} ", power.title()), badge_style),
    ]);
    f.render_widget(Paragraph::new(power_line), chunks[0]);

    let gauge_color = match snap.battery_percent() {
        0..=20 => Color::LightRed,
        21..=50 => Color::LightYellow,
        _ => Color::LightGreen,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gauge_color).bg(Color::DarkGray))
        .percent(u16::from(snap.battery_percent()))
        .label(format!("Battery {}", snap.battery));
    f.render_widget(gauge, chunks[1]);

    let indicator = if snap.active {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let indicators = Line::from(vec![
        Span::styled(" LINK ", indicator),
        Span::styled(" SAFE ", indicator),
    ])
    .alignment(Alignment::Right);
    f.render_widget(Paragraph::new(indicators), chunks[2]);
}

fn draw_toast_line(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some((title, description)) = app.toast_text() {
        Line::from(vec![
            Span::styled(
                format!("{title}: "),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(description.to_string()),
        ])
    } else {
        Line::from(Span::styled(
            format!(
                "Mode {}  Mic {}  Sound {}",
                app.ctx.snapshot.navigation_mode,
                on_off(app.ctx.snapshot.voice_enabled),
                on_off(app.ctx.snapshot.sound_enabled)
            ),
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("power", "Toggle power"),
        ("voice", "Issue a voice command"),
        ("navigate", "Start navigation"),
        ("mode", "Set mode: indoor | outdoor"),
        ("mic", "Microphone: on | off"),
        ("sound", "Sound: on | off"),
        ("help", "Show key bindings"),
        ("quit", "Exit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("power | voice | navigate | mode | mic | sound");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(&app.command.input),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, Style::default().fg(color)),
                ])
            } else {
                Line::from(Span::styled(
                    "p power  v voice  n navigate  m mic  s sound  i/o mode  Tab panel  : command  ? help  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = layout::centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Power"),
        Line::from("  p          Activate / deactivate"),
        Line::from(""),
        Line::from("Actions (active only)"),
        Line::from("  v          Give voice command"),
        Line::from("  n          Start navigation"),
        Line::from("  m          Microphone on/off"),
        Line::from("  s          Sound on/off"),
        Line::from("  i / o      Indoor / outdoor"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  Tab        Next panel"),
        Line::from("  Shift-Tab  Previous panel"),
        Line::from("  Enter      Press panel control"),
        Line::from(""),
        Line::from("App"),
        Line::from("  :          Command bar"),
        Line::from("  ?          Toggle help"),
        Line::from("  q / Esc    Quit"),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(popup, popup_area);
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_hint_prefix() {
        assert_eq!(command_hint("po"), Some("Toggle power"));
        assert_eq!(command_hint("SO"), Some("Sound: on | off"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("zzz"), None);
    }
}
