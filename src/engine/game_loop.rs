/// Frame clock for the input-driven render loop
///
/// Each redraw is one input frame: the clock reports the time since the
/// previous frame, keeps a rolling FPS, and stops reporting time while the
/// window is occluded so cooldowns do not run out in the background.
use std::time::{Duration, Instant};

/// Longest delta handed to consumers (a stalled frame counts as this much)
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame timing state
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    /// Whether frames are paused (window hidden)
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Seconds since the previous frame, clamped
    delta_time: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            delta_time: 0.0,
        }
    }

    /// Begin a new frame and return its delta time in seconds
    /// Paused frames report zero.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.delta_time = if self.paused {
            0.0
        } else {
            frame_time.as_secs_f32().min(MAX_FRAME_DELTA)
        };
        self.delta_time
    }

    /// Delta time of the current frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Frame clock paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Time spent hidden is not a frame delta
            self.last_frame_time = Instant::now();
            log::info!("Frame clock resumed");
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.delta_time(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_pause_resume() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert!(clock.is_paused());

        clock.resume();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_paused_frames_report_zero() {
        let mut clock = FrameClock::new();
        clock.pause();
        thread::sleep(Duration::from_millis(20));

        assert_eq!(clock.begin_frame(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_resume_skips_hidden_time() {
        let mut clock = FrameClock::new();
        clock.pause();
        thread::sleep(Duration::from_millis(50));
        clock.resume();

        assert!(clock.begin_frame() < 0.05);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(300));
        assert_eq!(clock.begin_frame(), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_delta_tracks_sleep() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let dt = clock.begin_frame();
        assert!(dt >= 0.01);
        assert_eq!(clock.delta_time(), dt);
    }

    #[test]
    fn test_fps_after_ten_frames() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(2));
            clock.begin_frame();
        }
        assert!(clock.fps() > 0.0);
    }
}
