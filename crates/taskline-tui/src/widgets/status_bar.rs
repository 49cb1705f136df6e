//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::Theme;
use taskline_client::RequestPhase;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar displayed at the bottom of the screen.
pub struct StatusBar<'a> {
    phase: RequestPhase,
    endpoint: &'a str,
    hints: Vec<KeyHint>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(phase: RequestPhase, endpoint: &'a str, theme: &'a Theme) -> Self {
        Self {
            phase,
            endpoint,
            hints: Vec::new(),
            theme,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    fn phase_color(&self) -> Color {
        match self.phase {
            RequestPhase::Idle => self.theme.muted,
            RequestPhase::Running => self.theme.warning,
            RequestPhase::Completed => self.theme.success,
            RequestPhase::Error => self.theme.error,
        }
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        // Fill background
        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_bg(self.theme.surface);
        }

        // Left side: phase chip + hints
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.phase),
                Style::default().bg(self.phase_color()).fg(self.theme.base),
            ),
            Span::styled(" ", Style::default().bg(self.theme.surface)),
        ];

        for hint in &self.hints {
            spans.push(Span::styled(
                format!(" {} ", hint.key),
                Style::default().bg(self.theme.surface).fg(self.theme.text),
            ));
            spans.push(Span::styled(
                format!("{} ", hint.label),
                Style::default().bg(self.theme.surface).fg(self.theme.subtext),
            ));
        }

        let left_line = Line::from(spans);
        buf.set_line(area.x, area.y, &left_line, area.width);

        // Right-aligned endpoint
        let endpoint_len = self.endpoint.len() as u16;
        if endpoint_len + 1 < area.width {
            let x = area.x + area.width - endpoint_len - 1;
            buf.set_string(
                x,
                area.y,
                self.endpoint,
                Style::default().bg(self.theme.surface).fg(self.theme.muted),
            );
        }
    }
}
