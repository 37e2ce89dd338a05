//! Fixed-rate frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps away whatever is left of each frame's time slice
#[derive(Debug)]
pub struct FrameClock {
    /// Target frame duration; `None` runs as fast as possible
    frame: Option<Duration>,
    frame_start: Instant,
    /// Frames that overran their slice
    pub overruns: u64,
}

impl FrameClock {
    /// Pace to `frame_rate` steps per second
    pub fn new(frame_rate: u32) -> Self {
        let frame = (frame_rate > 0).then(|| Duration::from_secs(1) / frame_rate);
        Self {
            frame,
            frame_start: Instant::now(),
            overruns: 0,
        }
    }

    /// No pacing at all (tests, headless batch runs)
    pub fn unpaced() -> Self {
        Self {
            frame: None,
            frame_start: Instant::now(),
            overruns: 0,
        }
    }

    pub fn frame_duration(&self) -> Option<Duration> {
        self.frame
    }

    /// Block until the current frame's slice is used up, then start the next
    pub fn wait_for_next_frame(&mut self) {
        if let Some(frame) = self.frame {
            let elapsed = self.frame_start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            } else {
                self.overruns += 1;
            }
        }
        self.frame_start = Instant::now();
    }

    /// Blocking pause (skipped when unpaced)
    pub fn pause(&self, duration: Duration) {
        if self.frame.is_some() {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration_from_rate() {
        let clock = FrameClock::new(50);
        assert_eq!(clock.frame_duration(), Some(Duration::from_millis(20)));
        assert_eq!(FrameClock::new(0).frame_duration(), None);
    }

    #[test]
    fn test_unpaced_never_sleeps() {
        let mut clock = FrameClock::unpaced();
        let start = Instant::now();
        for _ in 0..1000 {
            clock.wait_for_next_frame();
        }
        clock.pause(Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
