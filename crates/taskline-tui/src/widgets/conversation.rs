//! Conversation pane.
//!
//! The scrollable message transcript with the goal input at the bottom,
//! separated by a divider line. While a request is in flight the transcript
//! shows an animated waiting row and the input is disabled.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::line,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::widgets::input::{GoalInput, InputState};
use taskline_client::{Message, RequestPhase, Role};

/// Fixed height for the input row.
const INPUT_HEIGHT: u16 = 1;

/// Height for the divider line.
const DIVIDER_HEIGHT: u16 = 1;

/// Conversation pane combining the transcript and the goal input.
pub struct ConversationPane<'a> {
    messages: &'a [Message],
    input: &'a InputState,
    phase: RequestPhase,
    theme: &'a Theme,
    focused: bool,
    /// Lines scrolled back from the bottom of the transcript (0 = follow).
    scroll_back: usize,
    /// Animation frame for the waiting indicator.
    spinner_frame: u8,
}

impl<'a> ConversationPane<'a> {
    /// Create a new conversation pane.
    pub fn new(messages: &'a [Message], input: &'a InputState, theme: &'a Theme) -> Self {
        Self {
            messages,
            input,
            phase: RequestPhase::Idle,
            theme,
            focused: false,
            scroll_back: 0,
            spinner_frame: 0,
        }
    }

    /// Set the current request phase.
    #[must_use]
    pub fn phase(mut self, phase: RequestPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Set whether this pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the scroll-back offset in lines.
    #[must_use]
    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// Set the waiting animation frame.
    #[must_use]
    pub fn spinner_frame(mut self, frame: u8) -> Self {
        self.spinner_frame = frame;
        self
    }

    fn role_color(&self, role: Role) -> Color {
        match role {
            Role::User => self.theme.primary,
            Role::Assistant => self.theme.secondary,
            Role::Error => self.theme.error,
        }
    }

    /// Build the transcript lines for the given width.
    fn transcript_lines(&self, width: usize) -> Vec<Line<'static>> {
        let wrap_width = width.saturating_sub(2).max(10);
        let mut lines = Vec::new();

        for message in self.messages {
            let local: DateTime<Local> = message.created_at.into();
            lines.push(Line::from(vec![
                Span::styled(
                    local.format("%H:%M").to_string(),
                    Style::default().fg(self.theme.muted),
                ),
                Span::raw("  "),
                Span::styled(
                    message.role.to_string(),
                    Style::default().fg(self.role_color(message.role)),
                ),
            ]));

            for wrapped in textwrap::wrap(&message.content, wrap_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {wrapped}"),
                    Style::default().fg(self.theme.text),
                )));
            }
            lines.push(Line::default());
        }

        if self.phase.is_in_flight() {
            let dots = ".".repeat(usize::from(self.spinner_frame % 3) + 1);
            lines.push(Line::from(Span::styled(
                format!("running{dots}"),
                Style::default().fg(self.theme.warning),
            )));
        }

        lines
    }

    fn render_divider(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }
        let divider = line::HORIZONTAL.repeat(area.width as usize);
        Paragraph::new(Line::from(Span::styled(
            divider,
            Style::default().fg(self.theme.border),
        )))
        .render(area, buf);
    }
}

impl Widget for ConversationPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = Style::default().fg(if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        });

        let block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let input_widget = GoalInput::new(self.input, self.theme)
            .focused(self.focused)
            .waiting(self.phase.is_in_flight());

        if inner.height < INPUT_HEIGHT + DIVIDER_HEIGHT + 1 {
            // Not enough space for a transcript, just show the input
            input_widget.render(inner, buf);
            return;
        }

        let transcript_height = inner.height - INPUT_HEIGHT - DIVIDER_HEIGHT;
        let transcript_area = Rect::new(inner.x, inner.y, inner.width, transcript_height);
        let divider_area = Rect::new(
            inner.x,
            inner.y + transcript_height,
            inner.width,
            DIVIDER_HEIGHT,
        );
        let input_area = Rect::new(
            inner.x,
            inner.y + transcript_height + DIVIDER_HEIGHT,
            inner.width,
            INPUT_HEIGHT,
        );

        // Follow the bottom of the transcript, backed off by scroll_back
        let lines = self.transcript_lines(transcript_area.width as usize);
        let overflow = lines.len().saturating_sub(transcript_area.height as usize);
        let offset = overflow.saturating_sub(self.scroll_back);

        #[allow(clippy::cast_possible_truncation)]
        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(transcript_area, buf);

        self.render_divider(divider_area, buf);
        input_widget.render(input_area, buf);
    }
}
