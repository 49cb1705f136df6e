//! Single-line goal input.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Prompt prefix shown before the input text.
const PROMPT: &str = "> ";

/// State for the goal input: content, cursor, and submit history.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Previously submitted goals for Up/Down recall.
    history: Vec<String>,
    /// Current history index (-1 = editing a fresh goal).
    history_index: isize,
    /// Saved in-progress input while navigating history.
    saved_input: String,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Take the content, record it in history, and reset the state.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = -1;
        self.saved_input.clear();
        content
    }

    /// Recall the previous submitted goal.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        if self.history_index == -1 {
            self.saved_input = self.content.clone();
        }
        let next = self.history_index + 1;
        #[allow(clippy::cast_sign_loss)]
        if (next as usize) < self.history.len() {
            self.history_index = next;
            #[allow(clippy::cast_sign_loss)]
            {
                self.content = self.history[self.history.len() - 1 - next as usize].clone();
            }
            self.cursor = self.char_count();
        }
    }

    /// Move back toward the in-progress goal.
    pub fn history_next(&mut self) {
        if self.history_index <= 0 {
            if self.history_index == 0 {
                self.content = std::mem::take(&mut self.saved_input);
                self.cursor = self.char_count();
            }
            self.history_index = -1;
            return;
        }
        self.history_index -= 1;
        #[allow(clippy::cast_sign_loss)]
        {
            self.content =
                self.history[self.history.len() - 1 - self.history_index as usize].clone();
        }
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

/// The goal input row.
pub struct GoalInput<'a> {
    state: &'a InputState,
    theme: &'a Theme,
    focused: bool,
    waiting: bool,
    placeholder: &'a str,
}

impl<'a> GoalInput<'a> {
    /// Create a new input widget over the given state.
    pub fn new(state: &'a InputState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            focused: false,
            waiting: false,
            placeholder: "Describe a goal for the agent team",
        }
    }

    /// Set whether the input has keyboard focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether a request is in flight (input disabled).
    #[must_use]
    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }
}

impl Widget for GoalInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        // While a request is in flight the input is disabled
        if self.waiting {
            let line = Line::from(vec![
                Span::styled(PROMPT, Style::default().fg(self.theme.muted)),
                Span::styled(
                    "waiting for the orchestrator",
                    Style::default().fg(self.theme.muted),
                ),
            ]);
            Paragraph::new(line).render(area, buf);
            return;
        }

        let prompt_style = Style::default().fg(if self.focused {
            self.theme.primary
        } else {
            self.theme.muted
        });

        if self.state.is_empty() {
            let mut spans = vec![Span::styled(PROMPT, prompt_style)];
            if self.focused {
                spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            }
            spans.push(Span::styled(
                self.placeholder,
                Style::default().fg(self.theme.muted),
            ));
            Paragraph::new(Line::from(spans)).render(area, buf);
            return;
        }

        // Horizontal window so the cursor stays visible
        let chars: Vec<char> = self.state.content().chars().collect();
        let visible = (area.width as usize).saturating_sub(PROMPT.len() + 1).max(1);
        let start = self.state.cursor().saturating_sub(visible);

        let mut spans = vec![Span::styled(PROMPT, prompt_style)];
        for (i, ch) in chars.iter().enumerate().skip(start).take(visible) {
            let style = if self.focused && i == self.state.cursor() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(self.theme.text)
            };
            spans.push(Span::styled(ch.to_string(), style));
        }
        // Cursor sits past the last character
        if self.focused && self.state.cursor() >= chars.len() {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_insert_and_delete() {
        let mut state = InputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.move_home();
        state.delete();
        assert!(state.is_empty());
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = InputState::new();
        for ch in "Hello".chars() {
            state.insert(ch);
        }

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor(), 0);
        state.move_end();
        assert_eq!(state.cursor(), 6);
    }

    #[test]
    fn test_multibyte_content() {
        let mut state = InputState::new();
        state.insert('é');
        state.insert('b');
        state.move_left();
        state.move_left();
        state.delete();
        assert_eq!(state.content(), "b");
    }

    #[test]
    fn test_submit_records_history() {
        let mut state = InputState::new();
        for ch in "first".chars() {
            state.insert(ch);
        }
        assert_eq!(state.submit(), "first");
        assert!(state.is_empty());

        for ch in "second".chars() {
            state.insert(ch);
        }
        state.submit();

        state.history_prev();
        assert_eq!(state.content(), "second");
        state.history_prev();
        assert_eq!(state.content(), "first");
        state.history_next();
        assert_eq!(state.content(), "second");
    }

    #[test]
    fn test_render_waiting() {
        let state = InputState::new();
        let theme = Theme::dark();
        let backend = TestBackend::new(50, 1);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                let widget = GoalInput::new(&state, &theme).waiting(true);
                frame.render_widget(widget, frame.area());
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("waiting for the orchestrator"));
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let state = InputState::new();
        let theme = Theme::dark();
        let backend = TestBackend::new(50, 1);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                let widget = GoalInput::new(&state, &theme).focused(true);
                frame.render_widget(widget, frame.area());
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Describe a goal"));
    }
}
