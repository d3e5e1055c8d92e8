//! Main TUI application state and logic

use crate::engine::constants::PLAY_INTERVAL_MS;
use crate::engine::{MoveMode, Replay, SimulationError};
use crate::ui::panes::{self, InstructionRenderData, InstructionScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Instructions,
    Yard,
    Transcript,
}

impl FocusedPane {
    /// Move focus to the next pane (instructions -> yard -> transcript)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Instructions => FocusedPane::Yard,
            FocusedPane::Yard => FocusedPane::Transcript,
            FocusedPane::Transcript => FocusedPane::Instructions,
        }
    }
}

/// Position of `mode` in [`MoveMode::ALL`]
fn slot(mode: MoveMode) -> usize {
    match mode {
        MoveMode::Single => 0,
        MoveMode::Bulk => 1,
    }
}

/// The main application state
pub struct App {
    /// One recorded run per mode, in [`MoveMode::ALL`] order
    replays: [Replay; 2],

    /// Replay on screen
    pub mode: MoveMode,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub instruction_scroll: InstructionScrollState,
    pub yard_scroll: usize,
    pub transcript_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over both replays, showing `mode` first
    pub fn new(replays: [Replay; 2], mode: MoveMode) -> Self {
        let now = Instant::now();
        let status_message = match replays[slot(mode)].failure() {
            Some(_) => String::from("Replay stops early, see transcript"),
            None => String::from("Ready!"),
        };
        App {
            replays,
            mode,
            focused_pane: FocusedPane::Instructions,
            instruction_scroll: InstructionScrollState::default(),
            yard_scroll: 0,
            transcript_scroll: usize::MAX,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Replay currently on screen
    pub fn replay(&self) -> &Replay {
        &self.replays[slot(self.mode)]
    }

    fn replay_mut(&mut self) -> &mut Replay {
        &mut self.replays[slot(self.mode)]
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let play_interval = Duration::from_millis(PLAY_INTERVAL_MS);
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= play_interval {
                if self.replay_mut().step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.transcript_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        // Left: instructions | Right: yard (top), transcript (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[0]);
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let replay = &self.replays[slot(self.mode)];
        let failed_step = match replay.failure() {
            Some(SimulationError::InvalidInstruction { step, .. }) => Some(*step),
            Some(_) => Some(replay.total_snapshots()),
            None => None,
        };
        let at_end = replay.history_position() + 1 >= replay.total_snapshots();

        panes::render_instruction_pane(
            frame,
            columns[0],
            InstructionRenderData {
                instructions: replay.instructions(),
                current_step: replay.history_position(),
                failed_step: failed_step.filter(|_| at_end),
            },
            self.focused_pane == FocusedPane::Instructions,
            &mut self.instruction_scroll,
        );

        if let Some(snapshot) = replay.current() {
            panes::render_yard_pane(
                frame,
                right_rows[0],
                &snapshot.stacks,
                snapshot.last_move,
                self.focused_pane == FocusedPane::Yard,
                &mut self.yard_scroll,
            );
        }

        let failure = replay
            .failure()
            .filter(|_| at_end)
            .map(|err| err.to_string());
        panes::render_transcript_pane(
            frame,
            right_rows[1],
            replay.transcript_lines(),
            failure.as_deref(),
            self.focused_pane == FocusedPane::Transcript,
            &mut self.transcript_scroll,
        );

        let tops = replay.stacks().map(|s| s.tops()).unwrap_or_default();
        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                mode: self.mode,
                current_step: replay.history_position(),
                total_steps: replay.instructions().len(),
                at_end,
                tops: &tops,
                failed: replay.failure().is_some() && at_end,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).map_or(0, |d| d as usize);
                let mut stepped = 0;
                while stepped < n && self.replay_mut().step_forward().is_ok() {
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.transcript_scroll = usize::MAX;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.switch_mode();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Instructions => {
                    // Scrolling up makes the current instruction move down visually
                    if let Some(row) = self.instruction_scroll.target_line_row {
                        self.instruction_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Yard => {
                    self.yard_scroll = self.yard_scroll.saturating_sub(1);
                }
                FocusedPane::Transcript => {
                    self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Instructions => {
                    if let Some(row) = self.instruction_scroll.target_line_row {
                        self.instruction_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Yard => {
                    self.yard_scroll = self.yard_scroll.saturating_add(1);
                }
                FocusedPane::Transcript => {
                    self.transcript_scroll = self.transcript_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        let now = Instant::now();
                        self.last_play_time = now
                            .checked_sub(Duration::from_millis(PLAY_INTERVAL_MS))
                            .unwrap_or(now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.replay_mut().jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.transcript_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.replay_mut().rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.transcript_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    /// Show the other mode's replay at the same step, or its last recorded
    /// step if it stopped earlier
    fn switch_mode(&mut self) {
        let position = self.replay().history_position();
        self.mode = self.mode.toggle();

        let replay = self.replay_mut();
        let target = position.min(replay.total_snapshots().saturating_sub(1));
        self.status_message = match replay.jump_to(target) {
            Ok(()) if target == position => format!("Switched to {} mode", self.mode),
            Ok(()) => format!(
                "Switched to {} mode (stopped at step {})",
                self.mode, target
            ),
            Err(e) => format!("Error: {}", e),
        };
        self.transcript_scroll = usize::MAX;
    }

    /// Step forward in the replay
    fn step_forward(&mut self) {
        match self.replay_mut().step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
                // Auto-scroll transcript to bottom
                self.transcript_scroll = usize::MAX;
            }
            Err(SimulationError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    /// Step backward in the replay
    fn step_backward(&mut self) {
        match self.replay_mut().step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.transcript_scroll = usize::MAX;
            }
            Err(SimulationError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}
