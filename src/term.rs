use std::io::{stdout, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue, style};

use crate::state::{GameState, Phase};
use crate::TermInt;

pub const HELP_LINE: &str = "Arrow keys for -> movement. (Q)uit or (N)ew Game?";

/// Anything a frame can be drawn on.
pub trait Screen {
    fn draw(&mut self, lines: &[String]) -> Result<()>;
}

/// Owns the terminal while the game runs. Raw mode and the hidden cursor are
/// undone by [`TermManager::disable`], which also runs on drop.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn enable() -> Result<Self> {
        let mut term = TermManager { stdout: stdout(), active: false };

        execute!(term.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
            .context("Error clearing the screen")?;
        terminal::enable_raw_mode().context("Error entering raw mode")?;
        // From here on, drop restores the terminal.
        term.active = true;
        execute!(term.stdout, cursor::Hide).context("Error hiding the cursor")?;

        Ok(term)
    }

    pub fn disable(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error leaving raw mode")?;
        execute!(self.stdout, cursor::Show).context("Error showing the cursor")?;
        Ok(())
    }
}

impl Screen for TermManager {
    /// Redraws every line in place starting from the top-left corner.
    fn draw(&mut self, lines: &[String]) -> Result<()> {
        for (y, line) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as TermInt),
                style::Print(line),
                terminal::Clear(ClearType::UntilNewLine)
            )?;
        }
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.disable() {
            tracing::error!(?err, "failed to restore terminal");
        }
    }
}

/// The full screen for one frame: the board, two columns per cell, then the
/// help, score and status lines.
pub fn render_lines(state: &GameState) -> Vec<String> {
    let mut lines: Vec<String> = state
        .board()
        .rows()
        .map(|row| row.iter().map(|cell| format!("{:<2}", cell.symbol())).collect())
        .collect();

    lines.push(HELP_LINE.to_string());
    lines.push(format!("Your Score: {}", state.score()));
    lines.push(status_line(state.phase()).to_string());
    lines.push(String::new());
    lines.push(format!("Last Game Score: {}", state.last_score()));
    lines
}

pub fn status_line(phase: Phase) -> &'static str {
    match phase {
        Phase::NotStarted => "Start (N)ew Game",
        Phase::Moving => "New Game started",
        Phase::GameOver { cleared: false } => "GAME OVER (Q)uit or (N)ew Game?",
        Phase::GameOver { cleared: true } => "BOARD CLEARED (Q)uit or (N)ew Game?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    #[test]
    fn idle_screen_shows_walls_and_prompt() {
        let state = GameState::new(16);
        let lines = render_lines(&state);

        assert_eq!(lines.len(), 16 + 5);
        assert_eq!(lines[0], "X ".repeat(16));
        assert_eq!(lines[1], format!("X {}X ", "  ".repeat(14)));
        assert_eq!(lines[16], HELP_LINE);
        assert_eq!(lines[17], "Your Score: 0");
        assert_eq!(lines[18], "Start (N)ew Game");
        assert_eq!(lines[20], "Last Game Score: 0");
    }

    #[test]
    fn running_game_draws_head_and_food() {
        let mut state = GameState::new(8);
        state.start_at((2, 3), (4, 3), Direction::Right).unwrap();
        let lines = render_lines(&state);

        assert_eq!(lines[3], "X   0   #     X ");
        assert_eq!(lines[10], "New Game started");
    }
}
