//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`instructions`]: the instruction list with the current step highlighted
//! - [`yard`]: the stack collection drawn as crate columns
//! - [`transcript`]: one line per performed move
//! - [`status`]: status bar with keybindings and replay state
//!
//! Each pane module exports a `render_*` function that only reads replay
//! state; scroll positions are owned by the [`App`](crate::ui::App).

pub mod instructions;
pub mod status;
pub mod transcript;
pub mod yard;

pub use instructions::{render_instruction_pane, InstructionRenderData, InstructionScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use transcript::render_transcript_pane;
pub use yard::{render_yard_pane, yard_rows};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style for a pane, highlighted when focused
fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
