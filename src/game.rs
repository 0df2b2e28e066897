use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::Result;
use rand::rngs::StdRng;
use tracing::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::input::{Command, InputSource};
use crate::state::GameState;
use crate::term::{render_lines, Screen};

pub struct SnakeGame {
    state: GameState,
    clock: Clock,
    rng: StdRng,
    frame_sleep: Duration,
    ticks: u64,
}

impl SnakeGame {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        SnakeGame {
            state: GameState::new(config.board_size),
            clock: Clock::new(config.beat, config.difficulty, config.fast_after),
            rng,
            frame_sleep: config.frame_sleep,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs ticks until a quit command arrives. Each tick sleeps, asks the
    /// clock for permission to move, applies at most one input command,
    /// redraws and finally updates the snake.
    pub fn play<I, S>(&mut self, input: &mut I, screen: &mut S) -> Result<()>
    where
        I: InputSource + ?Sized,
        S: Screen + ?Sized,
    {
        let started = Instant::now();

        loop {
            sleep(self.frame_sleep);

            let can_move = self.clock.permits(started.elapsed(), self.state.score());

            match input.poll()? {
                Some(Command::Quit) => {
                    info!(ticks = self.ticks, score = self.state.score(), "quit requested");
                    return Ok(());
                }
                Some(cmd) => self.state.apply(cmd, &mut self.rng),
                None => {}
            }

            screen.draw(&render_lines(&self.state))?;
            self.state.tick(can_move, &mut self.rng);
            self.ticks += 1;
        }
    }
}
