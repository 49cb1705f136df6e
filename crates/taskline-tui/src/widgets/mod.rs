//! Widgets for the taskline TUI.

pub mod conversation;
pub mod input;
pub mod status_bar;
pub mod timeline;

pub use conversation::ConversationPane;
pub use input::{GoalInput, InputState};
pub use status_bar::{KeyHint, StatusBar};
pub use timeline::{step_line, TimelinePane};
