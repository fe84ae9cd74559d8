//! Dashboard module - panel-based control view

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Context, Control, Module};
use crate::domain::dashboard::{DashboardSnapshot, NavigationMode, Sensor};

/// Sample phrases listed under the voice panel
pub const SAMPLE_PHRASES: [&str; 5] = [
    "\"Take me to...\"",
    "\"Stop\"",
    "\"Find the exit\"",
    "\"Where am I?\"",
    "\"What do you see?\"",
];

/// Static assistive features shown as always on
pub const AI_FEATURES: [&str; 3] = ["Obstacle detection", "Object recognition", "Text reading"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPanel {
    Sensors,
    Voice,
    Navigation,
    Activity,
}

impl DashboardPanel {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardPanel::Sensors => "SENSORS",
            DashboardPanel::Voice => "VOICE",
            DashboardPanel::Navigation => "NAVIGATION",
            DashboardPanel::Activity => "ACTIVITY",
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    active_panel: DashboardPanel,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            active_panel: DashboardPanel::Sensors,
        }
    }

    pub fn active_panel(&self) -> DashboardPanel {
        self.active_panel
    }

    pub fn next_panel(&mut self) {
        self.active_panel = match self.active_panel {
            DashboardPanel::Sensors => DashboardPanel::Voice,
            DashboardPanel::Voice => DashboardPanel::Navigation,
            DashboardPanel::Navigation => DashboardPanel::Activity,
            DashboardPanel::Activity => DashboardPanel::Sensors,
        };
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = match self.active_panel {
            DashboardPanel::Sensors => DashboardPanel::Activity,
            DashboardPanel::Voice => DashboardPanel::Sensors,
            DashboardPanel::Navigation => DashboardPanel::Voice,
            DashboardPanel::Activity => DashboardPanel::Navigation,
        };
    }

    /// Primary control of the focused panel
    fn primary_action(&self, snap: &DashboardSnapshot) -> Action {
        match self.active_panel {
            DashboardPanel::Sensors => {
                let next = match snap.navigation_mode {
                    NavigationMode::Indoor => NavigationMode::Outdoor,
                    NavigationMode::Outdoor => NavigationMode::Indoor,
                };
                Action::Control(Control::SetNavigationMode(next))
            }
            DashboardPanel::Voice => Action::Control(Control::VoiceCommand),
            DashboardPanel::Navigation => Action::Control(Control::StartNavigation),
            DashboardPanel::Activity => Action::None,
        }
    }
}

impl Module for Dashboard {
    fn handle_key(&mut self, key: KeyEvent, ctx: &Context) -> Action {
        let snap = &ctx.snapshot;
        match key.code {
            KeyCode::Tab => {
                self.next_panel();
                Action::None
            }
            KeyCode::BackTab => {
                self.prev_panel();
                Action::None
            }
            KeyCode::Enter => self.primary_action(snap),
            KeyCode::Char(':') => Action::OpenCommand,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('p') => Action::Control(Control::TogglePower),
            KeyCode::Char('v') => Action::Control(Control::VoiceCommand),
            KeyCode::Char('n') => Action::Control(Control::StartNavigation),
            KeyCode::Char('m') => Action::Control(Control::SetVoiceEnabled(!snap.voice_enabled)),
            KeyCode::Char('s') => Action::Control(Control::SetSoundEnabled(!snap.sound_enabled)),
            KeyCode::Char('i') => {
                Action::Control(Control::SetNavigationMode(NavigationMode::Indoor))
            }
            KeyCode::Char('o') => {
                Action::Control(Control::SetNavigationMode(NavigationMode::Outdoor))
            }
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        // Split into 4 quadrants (2x2 grid)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let top_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        let bottom_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        self.render_sensors_panel(frame, top_chunks[0], &ctx.snapshot);
        self.render_voice_panel(frame, top_chunks[1], &ctx.snapshot);
        self.render_navigation_panel(frame, bottom_chunks[0], &ctx.snapshot);
        self.render_activity_panel(frame, bottom_chunks[1], ctx);
    }
}

impl Dashboard {
    fn panel_block(&self, panel: DashboardPanel) -> Block<'static> {
        let border_style = if self.active_panel == panel {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Block::default()
            .borders(Borders::ALL)
            .title(panel.title())
            .border_style(border_style)
    }

    fn render_sensors_panel(&self, frame: &mut Frame, area: Rect, snap: &DashboardSnapshot) {
        let mut lines: Vec<Line> = Sensor::ALL
            .iter()
            .map(|sensor| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", format!("{}:", sensor.title())),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        snap.sensor_label(*sensor).to_string(),
                        Style::default().fg(Color::LightGreen),
                    ),
                ])
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Environment:",
            Style::default().fg(Color::Gray),
        )));
        let mut modes = Vec::new();
        for (idx, mode) in NavigationMode::ALL.iter().enumerate() {
            if idx > 0 {
                modes.push(Span::raw("  "));
            }
            let key = match mode {
                NavigationMode::Indoor => 'i',
                NavigationMode::Outdoor => 'o',
            };
            modes.push(button(
                &format!("[{key}] {}", mode.title()),
                snap.navigation_mode == *mode,
                snap.can_change_settings(),
            ));
        }
        lines.push(Line::from(modes));

        let paragraph = Paragraph::new(lines).block(self.panel_block(DashboardPanel::Sensors));
        frame.render_widget(paragraph, area);
    }

    fn render_voice_panel(&self, frame: &mut Frame, area: Rect, snap: &DashboardSnapshot) {
        let mic = if snap.voice_enabled {
            "[m] Microphone on"
        } else {
            "[m] Microphone off"
        };
        let sound = if snap.sound_enabled {
            "[s] Sound on"
        } else {
            "[s] Sound off"
        };

        let mut lines = vec![
            Line::from(button(mic, snap.voice_enabled, snap.can_change_settings())),
            Line::from(button(sound, snap.sound_enabled, snap.can_change_settings())),
            Line::from(button(
                "[v] Give command",
                true,
                snap.can_issue_voice_command(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Available commands:",
                Style::default().fg(Color::Gray),
            )),
        ];
        for phrase in SAMPLE_PHRASES {
            lines.push(Line::from(Span::styled(
                format!("  • {phrase}"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines).block(self.panel_block(DashboardPanel::Voice));
        frame.render_widget(paragraph, area);
    }

    fn render_navigation_panel(&self, frame: &mut Frame, area: Rect, snap: &DashboardSnapshot) {
        let mut lines = vec![
            Line::from(button(
                "[n] Start navigation",
                true,
                snap.can_start_navigation(),
            )),
            Line::from(vec![
                Span::styled("Mode: ", Style::default().fg(Color::Gray)),
                Span::raw(snap.navigation_mode.title()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "AI features:",
                Style::default().fg(Color::Gray),
            )),
        ];
        for feature in AI_FEATURES {
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<22}", feature)),
                Span::styled("ON", Style::default().fg(Color::LightGreen)),
            ]));
        }

        let paragraph =
            Paragraph::new(lines).block(self.panel_block(DashboardPanel::Navigation));
        frame.render_widget(paragraph, area);
    }

    fn render_activity_panel(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let items: Vec<ListItem> = if ctx.activity.is_empty() {
            vec![ListItem::new(Span::styled(
                "No activity yet",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            ctx.activity
                .iter()
                .map(|n| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{} ", n.at.format("%H:%M:%S")),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(n.title.clone(), Style::default().fg(Color::Cyan)),
                        Span::raw(format!("  {}", n.description)),
                    ]))
                })
                .collect()
        };

        let list = List::new(items).block(self.panel_block(DashboardPanel::Activity));
        frame.render_widget(list, area);
    }
}

/// Render a control: highlighted when selected, dimmed when not permitted
fn button(label: &str, selected: bool, enabled: bool) -> Span<'static> {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightBlue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(format!(" {label} "), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_cycles_panels() {
        let mut dashboard = Dashboard::new();
        let ctx = Context::new();
        for expected in [
            DashboardPanel::Voice,
            DashboardPanel::Navigation,
            DashboardPanel::Activity,
            DashboardPanel::Sensors,
        ] {
            assert_eq!(dashboard.handle_key(key(KeyCode::Tab), &ctx), Action::None);
            assert_eq!(dashboard.active_panel(), expected);
        }
        dashboard.handle_key(key(KeyCode::BackTab), &ctx);
        assert_eq!(dashboard.active_panel(), DashboardPanel::Activity);
    }

    #[test]
    fn test_toggle_keys_use_snapshot() {
        let mut dashboard = Dashboard::new();
        let mut ctx = Context::new();
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Char('m')), &ctx),
            Action::Control(Control::SetVoiceEnabled(false))
        );
        ctx.snapshot.sound_enabled = false;
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Char('s')), &ctx),
            Action::Control(Control::SetSoundEnabled(true))
        );
    }

    #[test]
    fn test_app_keys() {
        let mut dashboard = Dashboard::new();
        let ctx = Context::new();
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Char(':')), &ctx),
            Action::OpenCommand
        );
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Char('?')), &ctx),
            Action::ToggleHelp
        );
        assert_eq!(dashboard.handle_key(key(KeyCode::Char('x')), &ctx), Action::None);
    }

    #[test]
    fn test_enter_presses_focused_control() {
        let mut dashboard = Dashboard::new();
        let ctx = Context::new();
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Enter), &ctx),
            Action::Control(Control::SetNavigationMode(NavigationMode::Outdoor))
        );
        dashboard.next_panel();
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Enter), &ctx),
            Action::Control(Control::VoiceCommand)
        );
        dashboard.next_panel();
        assert_eq!(
            dashboard.handle_key(key(KeyCode::Enter), &ctx),
            Action::Control(Control::StartNavigation)
        );
    }
}
