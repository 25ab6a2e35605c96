//! Increment-based chess clock.
//!
//! Parses a `"minutes+increment"` time control and tracks both players'
//! remaining time against a monotonic clock. The clock only ticks when a
//! caller drives it with `update` or `press`; nothing runs in the
//! background.

use std::time::{Duration, Instant};

use crate::errors::ChessError;
use crate::game_state::chess_types::Color;

/// Time control used when the caller has no preference: 3 minutes plus a
/// 2 second increment per move.
pub const DEFAULT_TIME_CONTROL: &str = "3+2";

#[derive(Debug, Clone)]
pub struct ChessClock {
    remaining: [Duration; 2],
    increment: Duration,
    last_update: Option<Instant>,
    running: bool,
    to_move: Color,
    timeout: bool,
}

impl ChessClock {
    /// Build a clock from a time control such as `"3+2"` or `"0.5+0"`:
    /// base time in minutes, increment in seconds.
    pub fn new(time_control: &str) -> Result<Self, ChessError> {
        let invalid = || ChessError::InvalidTimeControl(time_control.to_owned());

        let (base_part, increment_part) = time_control.split_once('+').ok_or_else(invalid)?;
        let base_minutes: f64 = base_part.trim().parse().map_err(|_| invalid())?;
        let increment_seconds: f64 = increment_part.trim().parse().map_err(|_| invalid())?;

        if !base_minutes.is_finite() || base_minutes <= 0.0 {
            return Err(invalid());
        }
        if !increment_seconds.is_finite() || increment_seconds < 0.0 {
            return Err(invalid());
        }

        let per_player = Duration::from_secs_f64(base_minutes * 60.0);
        Ok(ChessClock {
            remaining: [per_player, per_player],
            increment: Duration::from_secs_f64(increment_seconds),
            last_update: None,
            running: false,
            to_move: Color::Light,
            timeout: false,
        })
    }

    /// Start ticking for the player of `to_move`.
    pub fn start(&mut self, to_move: Color) {
        self.last_update = Some(Instant::now());
        self.running = true;
        self.to_move = to_move;
    }

    /// Stop the player on move's clock, grant them the increment, and start
    /// the opponent's clock. Does nothing once a flag has fallen.
    pub fn press(&mut self) {
        if !self.running || self.timeout {
            return;
        }
        self.update();
        if self.timeout {
            return;
        }
        self.remaining[self.to_move.index()] += self.increment;
        self.to_move = self.to_move.opposite();
    }

    /// Charge the time elapsed since the last update to the player on move.
    /// Latches the timeout flag and stops the clock when their time is gone.
    pub fn update(&mut self) {
        if !self.running || self.timeout {
            return;
        }
        let Some(last_update) = self.last_update else {
            return;
        };

        let now = Instant::now();
        let index = self.to_move.index();
        match self.remaining[index].checked_sub(now - last_update) {
            Some(left) if left > Duration::ZERO => {
                self.remaining[index] = left;
                self.last_update = Some(now);
            }
            _ => {
                self.remaining[index] = Duration::ZERO;
                self.timeout = true;
                self.running = false;
            }
        }
    }

    /// Pause the clock without charging anyone for the pause.
    pub fn pause(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn has_timed_out(&self) -> bool {
        self.timeout
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn remaining_time(&self, color: Color) -> Duration {
        self.remaining[color.index()]
    }

    /// Remaining time for `color` formatted for display: `M:SS`, switching
    /// to `0:SS.t` tenths once under ten seconds in the final minute.
    pub fn display_time(&self, color: Color) -> String {
        format_clock_time(self.remaining[color.index()])
    }
}

fn format_clock_time(time: Duration) -> String {
    let total_ms = time.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let tenths = (total_ms % 1_000) / 100;

    if seconds < 10 {
        if minutes == 0 {
            format!("{minutes}:0{seconds}.{tenths}")
        } else {
            format!("{minutes}:0{seconds}")
        }
    } else {
        format!("{minutes}:{seconds}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_clock_time, ChessClock, DEFAULT_TIME_CONTROL};
    use std::time::Duration;

    use crate::game_state::chess_types::Color;

    #[test]
    fn parses_the_default_time_control() {
        let clock = ChessClock::new(DEFAULT_TIME_CONTROL).expect("default control parses");
        assert_eq!(clock.remaining_time(Color::Light), Duration::from_secs(180));
        assert_eq!(clock.remaining_time(Color::Dark), Duration::from_secs(180));
        assert!(!clock.is_running());
        assert!(!clock.has_timed_out());
    }

    #[test]
    fn parses_fractional_minutes() {
        let clock = ChessClock::new("0.5+1").expect("fractional control parses");
        assert_eq!(clock.remaining_time(Color::Light), Duration::from_secs(30));
    }

    #[test]
    fn rejects_malformed_time_controls() {
        assert!(ChessClock::new("3").is_err());
        assert!(ChessClock::new("+2").is_err());
        assert!(ChessClock::new("three+2").is_err());
        assert!(ChessClock::new("0+2").is_err());
        assert!(ChessClock::new("-3+2").is_err());
        assert!(ChessClock::new("3+-1").is_err());
    }

    #[test]
    fn press_grants_the_increment_and_swaps_players() {
        let mut clock = ChessClock::new("3+2").expect("control parses");
        clock.start(Color::Light);
        clock.press();

        assert_eq!(clock.to_move(), Color::Dark);
        // Light got the increment minus a few microseconds of thinking time.
        assert!(clock.remaining_time(Color::Light) > Duration::from_secs(181));
        assert_eq!(clock.remaining_time(Color::Dark), Duration::from_secs(180));
    }

    #[test]
    fn running_out_of_time_latches_the_timeout() {
        let mut clock = ChessClock::new("0.001+0").expect("control parses");
        clock.start(Color::Dark);
        std::thread::sleep(Duration::from_millis(100));
        clock.update();

        assert!(clock.has_timed_out());
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_time(Color::Dark), Duration::ZERO);
        assert_eq!(clock.remaining_time(Color::Light), Duration::from_millis(60));

        // A press after the flag fell changes nothing.
        clock.press();
        assert_eq!(clock.to_move(), Color::Dark);
    }

    #[test]
    fn paused_clock_does_not_charge_time() {
        let mut clock = ChessClock::new("3+2").expect("control parses");
        clock.start(Color::Light);
        clock.pause();
        std::thread::sleep(Duration::from_millis(50));
        clock.update();

        assert_eq!(clock.remaining_time(Color::Light), Duration::from_secs(180));
    }

    #[test]
    fn clock_display_formatting() {
        assert_eq!(format_clock_time(Duration::from_secs(180)), "3:00");
        assert_eq!(format_clock_time(Duration::from_secs(65)), "1:05");
        assert_eq!(format_clock_time(Duration::from_secs(15)), "0:15");
        assert_eq!(format_clock_time(Duration::from_millis(9_500)), "0:09.5");
        assert_eq!(format_clock_time(Duration::ZERO), "0:00.0");
        assert_eq!(format_clock_time(Duration::from_millis(61_234)), "1:01");
    }
}
