//! TUI module using ratatui.
//!
//! A single-screen form: one topic input, Enter submits, the generated
//! script replaces the form content in place. One request in flight at a
//! time; the screen shows a waiting frame while the model call blocks.

use crate::agent;
use crate::config::Config;
use crate::render;
use crate::script::VideoScript;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Single-line text input with cursor editing
#[derive(Debug, Default)]
struct TopicInput {
    value: String,
    cursor: usize,
}

impl TopicInput {
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                if let Some((idx, _)) = self.value[..self.cursor].char_indices().next_back() {
                    self.value.remove(idx);
                    self.cursor = idx;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Left => {
                if let Some((idx, _)) = self.value[..self.cursor].char_indices().next_back() {
                    self.cursor = idx;
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.value[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => {}
        }
    }

    fn topic(&self) -> &str {
        self.value.trim()
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

enum Screen {
    Input,
    Generating { topic: String },
    Done { script: VideoScript, text: String },
    Failed(String),
}

struct App {
    input: TopicInput,
    screen: Screen,
    scroll: u16,
    notice: Option<String>,
}

enum Action {
    Continue,
    Quit,
}

impl App {
    fn new(config: &Config) -> Self {
        // Surface a missing credential on the form itself, like the
        // original startup check, but still let the user type
        let notice = config
            .api_key()
            .err()
            .map(|e| format!("⚠ {e} (set GEMINI_API_KEY)"));
        Self {
            input: TopicInput::default(),
            screen: Screen::Input,
            scroll: 0,
            notice,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match &self.screen {
            Screen::Input => match key.code {
                KeyCode::Esc => return Action::Quit,
                KeyCode::Enter => {
                    let topic = self.input.topic().to_string();
                    if topic.is_empty() {
                        self.notice = Some("⚠ Enter a topic first".to_string());
                    } else {
                        self.notice = None;
                        self.screen = Screen::Generating { topic };
                    }
                }
                _ => self.input.handle_key(key),
            },
            Screen::Generating { .. } => {}
            Screen::Done { .. } | Screen::Failed(_) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
                KeyCode::Char('n') => {
                    self.input.clear();
                    self.scroll = 0;
                    self.screen = Screen::Input;
                }
                KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
                KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
                KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
                KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
                _ => {}
            },
        }
        Action::Continue
    }

    fn render(&self, f: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

        self.render_banner(f, areas[0]);
        self.render_input(f, areas[1]);
        self.render_body(f, areas[2]);
        self.render_status(f, areas[3]);
    }

    fn render_banner(&self, f: &mut Frame, area: Rect) {
        let banner = Paragraph::new("🎬 manus — YouTube script writer")
            .style(Style::default().bold())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let focused = matches!(self.screen, Screen::Input);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Topic")
            .border_style(if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            });

        let line = if self.input.value.is_empty() && !focused {
            Line::from(Span::styled(
                "e.g. 'The history of the internet in 5 minutes'",
                Style::default().fg(Color::DarkGray),
            ))
        } else if focused {
            let (before, after) = self.input.value.split_at(self.input.cursor);
            Line::from(vec![
                Span::raw(before),
                Span::styled("│", Style::default().fg(Color::Yellow)),
                Span::raw(after),
            ])
        } else {
            Line::from(Span::raw(self.input.value.as_str()))
        };

        f.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_body(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Script");
        let paragraph = match &self.screen {
            Screen::Input => Paragraph::new(Line::from(Span::styled(
                "Type a topic and press Enter to generate a script.",
                Style::default().fg(Color::DarkGray),
            ))),
            Screen::Generating { topic } => {
                Paragraph::new(format!("⏳ Generating script for '{topic}'..."))
            }
            Screen::Done { text, .. } => Paragraph::new(text.as_str())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            Screen::Failed(message) => Paragraph::new(format!("❌ {message}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false }),
        };
        f.render_widget(paragraph.block(block), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let status = if let Some(notice) = &self.notice {
            Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            let hint = match &self.screen {
                Screen::Input => "Enter: generate  Esc: quit".to_string(),
                Screen::Generating { .. } => "waiting for the model...".to_string(),
                Screen::Done { script, .. } => format!(
                    "{} points · {}  |  ↑/↓: scroll  n: new topic  q: quit",
                    script.point_count(),
                    script.estimated_duration
                ),
                Screen::Failed(_) => "n: try again  q: quit".to_string(),
            };
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
        };
        f.render_widget(Paragraph::new(status), area);
    }
}

/// Run the interactive form until the user quits
pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &config).await;
    ratatui::restore();
    result
}

async fn run_app(terminal: &mut ratatui::DefaultTerminal, config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(config);

    loop {
        terminal.draw(|f| app.render(f))?;

        // The request blocks here; the waiting frame is already on screen
        if let Screen::Generating { topic } = &app.screen {
            let topic = topic.clone();
            app.screen = match agent::generate(&topic, config).await {
                Ok(script) => {
                    let text = render::script_to_text(&script);
                    Screen::Done { script, text }
                }
                Err(e) => Screen::Failed(e.to_string()),
            };
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Action::Quit = app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn empty_topic_is_rejected_before_submit() {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "   ");
        app.handle_key(press(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Input));
        assert!(app.notice.as_deref().unwrap_or("").contains("topic"));
    }

    #[test]
    fn submit_moves_to_generating_with_trimmed_topic() {
        let mut app = App::new(&Config::default());
        app.notice = None;
        type_text(&mut app, "  rust in 5 minutes ");
        app.handle_key(press(KeyCode::Enter));
        match &app.screen {
            Screen::Generating { topic } => assert_eq!(topic, "rust in 5 minutes"),
            _ => panic!("expected generating screen"),
        }
    }

    #[test]
    fn input_editing_follows_the_cursor() {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "rst");
        app.handle_key(press(KeyCode::Left));
        app.handle_key(press(KeyCode::Left));
        app.handle_key(press(KeyCode::Char('u')));
        assert_eq!(app.input.value, "rust");
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.input.value, "rst");
    }

    #[test]
    fn new_topic_resets_the_form() {
        let mut app = App::new(&Config::default());
        app.screen = Screen::Failed("boom".to_string());
        app.handle_key(press(KeyCode::Char('n')));
        assert!(matches!(app.screen, Screen::Input));
        assert!(app.input.value.is_empty());
    }
}
