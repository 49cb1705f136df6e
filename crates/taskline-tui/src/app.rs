//! Application state and update logic for the taskline TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::event::Action;
use crate::theme::Theme;
use crate::widgets::{ConversationPane, InputState, KeyHint, StatusBar, TimelinePane};
use taskline_client::{
    Config, Controller, ConversationEvent, OrchestratorClient,
};

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Conversation,
    Timeline,
}

/// How a key event was consumed by the goal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The key was not for the input; run it through the action map.
    NotHandled,
    /// The key mutated the input.
    Handled,
    /// A goal was accepted; the caller dispatches exactly one request.
    Submitted(String),
}

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the quit confirmation is showing.
    pub show_quit_confirm: bool,

    /// Focused pane.
    pub focus: Pane,

    /// The conversation controller.
    pub controller: Controller,

    /// Goal input state.
    pub input: InputState,

    /// Transcript scroll-back from the bottom (0 = follow).
    pub scroll_back: usize,

    /// Timeline scroll offset.
    pub timeline_scroll: u16,

    /// Waiting animation frame.
    pub spinner_frame: u8,

    theme: Theme,
    endpoint: String,
    notices: mpsc::UnboundedReceiver<ConversationEvent>,
}

impl App {
    /// Create the app for the given configuration.
    pub fn new(config: &Config) -> Self {
        let client = OrchestratorClient::new(&config.base_url);
        let endpoint = client.base_url().to_string();
        let mut controller = Controller::new(client);
        let notices = controller.subscribe();

        Self {
            should_quit: false,
            show_quit_confirm: false,
            focus: Pane::default(),
            controller,
            input: InputState::new(),
            scroll_back: 0,
            timeline_scroll: 0,
            spinner_frame: 0,
            theme: Theme::default(),
            endpoint,
            notices,
        }
    }

    /// Handle a non-input action.
    pub fn handle_action(&mut self, action: Action) {
        if self.show_quit_confirm {
            match action {
                Action::Select | Action::Quit => self.should_quit = true,
                Action::Back => self.show_quit_confirm = false,
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit | Action::Back => self.show_quit_confirm = true,
            Action::SwitchPane => {
                self.focus = match self.focus {
                    Pane::Conversation => Pane::Timeline,
                    Pane::Timeline => Pane::Conversation,
                };
            }
            Action::Up => match self.focus {
                Pane::Conversation => self.scroll_back += 1,
                Pane::Timeline => {
                    self.timeline_scroll = self.timeline_scroll.saturating_sub(1);
                }
            },
            Action::Down => match self.focus {
                Pane::Conversation => self.scroll_back = self.scroll_back.saturating_sub(1),
                Pane::Timeline => self.timeline_scroll += 1,
            },
            Action::Select | Action::None => {}
        }
    }

    /// Route a key to the goal input.
    ///
    /// Only applies while the conversation pane is focused and no request is
    /// in flight; everything else falls through to the action map. The
    /// controller rejects overlapping submissions internally as well.
    pub fn handle_input_key(&mut self, key: KeyEvent) -> InputOutcome {
        if self.show_quit_confirm
            || self.focus != Pane::Conversation
            || self.controller.phase().is_in_flight()
        {
            return InputOutcome::NotHandled;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return InputOutcome::NotHandled;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Tab => InputOutcome::NotHandled,

            KeyCode::Enter => match self.controller.begin(self.input.content()) {
                Ok(goal) => {
                    // Accepted: the pending input clears synchronously
                    self.input.submit();
                    self.scroll_back = 0;
                    InputOutcome::Submitted(goal)
                }
                // Empty goal is a no-op; in-flight is unreachable here
                Err(_) => InputOutcome::Handled,
            },

            KeyCode::Char(c) => {
                self.input.insert(c);
                InputOutcome::Handled
            }
            KeyCode::Backspace => {
                self.input.backspace();
                InputOutcome::Handled
            }
            KeyCode::Delete => {
                self.input.delete();
                InputOutcome::Handled
            }
            KeyCode::Left => {
                self.input.move_left();
                InputOutcome::Handled
            }
            KeyCode::Right => {
                self.input.move_right();
                InputOutcome::Handled
            }
            KeyCode::Home => {
                self.input.move_home();
                InputOutcome::Handled
            }
            KeyCode::End => {
                self.input.move_end();
                InputOutcome::Handled
            }
            KeyCode::Up => {
                // History recall on empty input; otherwise scroll
                if self.input.is_empty() {
                    self.input.history_prev();
                    InputOutcome::Handled
                } else {
                    InputOutcome::NotHandled
                }
            }
            KeyCode::Down => {
                if self.input.is_empty() {
                    self.input.history_next();
                    InputOutcome::Handled
                } else {
                    InputOutcome::NotHandled
                }
            }

            _ => InputOutcome::NotHandled,
        }
    }

    /// Advance animations and drain controller notifications.
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.drain_notices();
    }

    /// Consume pending controller notifications.
    ///
    /// A newly appended message snaps the transcript back to the bottom.
    pub fn drain_notices(&mut self) {
        while let Ok(event) = self.notices.try_recv() {
            if matches!(event, ConversationEvent::MessageAppended(_)) {
                self.scroll_back = 0;
            }
        }
    }

    /// Render the full frame.
    pub fn render(&self, frame: &mut Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[0]);

        let conversation = ConversationPane::new(self.controller.history(), &self.input, &self.theme)
            .phase(self.controller.phase())
            .focused(self.focus == Pane::Conversation)
            .scroll_back(self.scroll_back)
            .spinner_frame(self.spinner_frame);
        frame.render_widget(conversation, panes[0]);

        let timeline = TimelinePane::new(self.controller.last_steps(), &self.theme)
            .focused(self.focus == Pane::Timeline)
            .scroll(self.timeline_scroll);
        frame.render_widget(timeline, panes[1]);

        let hints = if self.show_quit_confirm {
            vec![
                KeyHint::new("Enter", "quit"),
                KeyHint::new("Esc", "stay"),
            ]
        } else {
            vec![
                KeyHint::new("Enter", "send"),
                KeyHint::new("Tab", "focus"),
                KeyHint::new("Esc", "quit"),
            ]
        };
        let status = StatusBar::new(self.controller.phase(), &self.endpoint, &self.theme)
            .hints(hints);
        frame.render_widget(status, rows[1]);

        if self.show_quit_confirm {
            self.render_quit_confirm(frame);
        }
    }

    fn render_quit_confirm(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let width = 44.min(area.width);
        let height = 3.min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Quit ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused));
        let text = Paragraph::new("Leave taskline? Enter quits, Esc stays.")
            .style(Style::default().fg(self.theme.text))
            .block(block);
        frame.render_widget(text, popup);
    }
}
