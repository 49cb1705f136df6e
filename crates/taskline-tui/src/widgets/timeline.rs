//! Agent timeline pane.
//!
//! A pure projection of the agent steps the orchestrator reported for the
//! most recent run. The pane owns no state: one row per step, in the order
//! the steps were supplied.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;
use taskline_client::AgentStep;

/// Row text for a single step: agent and action, detail parenthesized when
/// present.
pub fn step_line(step: &AgentStep) -> String {
    match step.detail.as_deref() {
        Some(detail) => format!("{}  {} ({})", step.agent, step.action, detail),
        None => format!("{}  {}", step.agent, step.action),
    }
}

/// Row texts for a sequence of steps, one per step in sequence order.
pub fn rows(steps: &[AgentStep]) -> Vec<String> {
    steps.iter().map(step_line).collect()
}

/// The agent timeline pane.
pub struct TimelinePane<'a> {
    steps: &'a [AgentStep],
    theme: &'a Theme,
    focused: bool,
    scroll: u16,
}

impl<'a> TimelinePane<'a> {
    /// Create a timeline pane over the given steps.
    pub fn new(steps: &'a [AgentStep], theme: &'a Theme) -> Self {
        Self {
            steps,
            theme,
            focused: false,
            scroll: 0,
        }
    }

    /// Set whether this pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the vertical scroll offset (rows).
    #[must_use]
    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    fn step_row(&self, step: &AgentStep, width: usize) -> Line<'static> {
        let mut spans = vec![
            Span::styled(
                step.agent.clone(),
                Style::default().fg(self.theme.agent_color(&step.agent)),
            ),
            Span::raw("  "),
            Span::styled(step.action.clone(), Style::default().fg(self.theme.text)),
        ];
        if let Some(detail) = step.detail.as_deref() {
            // Columns already taken by agent, separator, action, and " ()"
            let used = step.agent.width() + 2 + step.action.width() + 3;
            spans.push(Span::styled(
                format!(" ({})", truncate(detail, width.saturating_sub(used))),
                Style::default().fg(self.theme.muted),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for TimelinePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = Style::default().fg(if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        });

        let block = Block::default()
            .title(" Agent Timeline ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.steps.is_empty() {
            let placeholder = Line::from(Span::styled(
                "No agent activity yet",
                Style::default().fg(self.theme.muted),
            ));
            Paragraph::new(placeholder).render(inner, buf);
            return;
        }

        let lines: Vec<Line<'_>> = self
            .steps
            .iter()
            .map(|step| self.step_row(step, inner.width as usize))
            .collect();

        Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

/// Truncate a string to at most `max` display columns.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if out.width() >= max.saturating_sub(1) {
            out.push('\u{2026}'); // …
            break;
        }
        out.push(ch);
    }
    out
}
