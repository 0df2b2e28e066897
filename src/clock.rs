use std::time::Duration;

/// Edge-triggered rate limiter deciding on which loop iterations the snake
/// may move.
///
/// Elapsed time is cut into beats; every `difficulty` beats form a window
/// whose first beat is the "on" beat. Up to `fast_after` points one move is
/// allowed when an on beat starts. Past that, the first beat after an on
/// beat also allows a move, doubling the pace. With a difficulty of 1 every
/// beat is an on beat.
#[derive(Clone, Debug)]
pub struct Clock {
    beat: Duration,
    difficulty: u64,
    fast_after: u32,
    last_beat: Option<u64>,
}

impl Clock {
    pub fn new(beat: Duration, difficulty: u64, fast_after: u32) -> Self {
        Clock { beat, difficulty: difficulty.max(1), fast_after, last_beat: None }
    }

    pub fn permits(&mut self, elapsed: Duration, score: u32) -> bool {
        let beat_ms = self.beat.as_millis().max(1);
        let now = (elapsed.as_millis() / beat_ms) as u64;
        if self.last_beat == Some(now) {
            return false;
        }

        let was_on_beat = self.last_beat.map_or(false, |beat| self.is_on_beat(beat));
        self.last_beat = Some(now);

        if self.is_on_beat(now) {
            true
        } else {
            // Leaving the on beat.
            score > self.fast_after && was_on_beat
        }
    }

    fn is_on_beat(&self, beat: u64) -> bool {
        beat % self.difficulty == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_moves(clock: &mut Clock, score: u32, until_ms: u64) -> usize {
        (0..until_ms).filter(|ms| clock.permits(Duration::from_millis(*ms), score)).count()
    }

    #[test]
    fn one_move_per_window_at_low_score() {
        let mut clock = Clock::new(Duration::from_millis(100), 4, 8);
        // Windows start at 0, 400, 800 and 1200 ms.
        assert_eq!(count_moves(&mut clock, 0, 1600), 4);
    }

    #[test]
    fn fires_only_on_the_entering_edge() {
        let mut clock = Clock::new(Duration::from_millis(100), 4, 8);
        assert!(clock.permits(Duration::from_millis(0), 3));
        assert!(!clock.permits(Duration::from_millis(50), 3));
        assert!(!clock.permits(Duration::from_millis(150), 3));
        assert!(clock.permits(Duration::from_millis(400), 3));
    }

    #[test]
    fn doubles_pace_past_threshold() {
        let mut clock = Clock::new(Duration::from_millis(100), 4, 8);
        assert_eq!(count_moves(&mut clock, 9, 1600), 8);
    }

    #[test]
    fn difficulty_of_one_moves_every_beat() {
        let mut slow = Clock::new(Duration::from_millis(100), 1, 8);
        assert_eq!(count_moves(&mut slow, 0, 1000), 10);

        let mut fast = Clock::new(Duration::from_millis(100), 1, 8);
        assert_eq!(count_moves(&mut fast, 9, 1000), 10);
    }

    #[test]
    fn skipped_beats_still_count_the_leaving_edge() {
        let mut clock = Clock::new(Duration::from_millis(100), 4, 8);
        assert!(clock.permits(Duration::from_millis(0), 9));
        // The loop stalled through beat 1 and woke up in beat 2.
        assert!(clock.permits(Duration::from_millis(250), 9));
        assert!(!clock.permits(Duration::from_millis(350), 9));
    }
}
