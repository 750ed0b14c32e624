use std::time::Instant;

/// Playback position of the replay, plus the time under the pointer.
///
/// All times are milliseconds relative to the session start.
#[derive(Debug)]
pub struct PlaybackClock {
    current_ms: f64,
    hover_ms: Option<f64>,
    duration_ms: f64,
    speed: f64,
    playing: bool,
    last_tick: Option<Instant>,
}

impl PlaybackClock {
    pub fn new(duration_ms: f64, speed: f64) -> Self {
        Self {
            current_ms: 0.0,
            hover_ms: None,
            duration_ms: duration_ms.max(0.0),
            speed: if speed > 0.0 { speed } else { 1.0 },
            playing: false,
            last_tick: None,
        }
    }

    pub fn current_ms(&self) -> f64 {
        self.current_ms
    }

    pub fn hover_ms(&self) -> Option<f64> {
        self.hover_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_duration(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms.max(0.0);
        self.current_ms = self.current_ms.min(self.duration_ms);
    }

    /// Progress through the session in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            0.0
        } else {
            (self.current_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    pub fn toggle_play(&mut self, now: Instant) {
        if self.playing {
            self.playing = false;
            self.last_tick = None;
        } else {
            if self.current_ms >= self.duration_ms {
                self.current_ms = 0.0;
            }
            self.playing = true;
            self.last_tick = Some(now);
        }
        tracing::debug!(playing = self.playing, at_ms = self.current_ms, "playback toggled");
    }

    /// Advance while playing. Stops at the end of the session.
    pub fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        if let Some(last) = self.last_tick {
            let elapsed = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
            self.current_ms = (self.current_ms + elapsed * self.speed).min(self.duration_ms);
        }
        self.last_tick = Some(now);
        if self.current_ms >= self.duration_ms {
            self.playing = false;
            self.last_tick = None;
        }
    }

    pub fn seek(&mut self, ms: f64) {
        self.current_ms = ms.clamp(0.0, self.duration_ms);
    }

    pub fn seek_by(&mut self, delta_ms: f64) {
        self.seek(self.current_ms + delta_ms);
    }

    pub fn set_hover(&mut self, ms: Option<f64>) {
        self.hover_ms = ms.map(|t| t.clamp(0.0, self.duration_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_seek_is_clamped() {
        let mut clock = PlaybackClock::new(10_000.0, 1.0);
        clock.seek(-5.0);
        assert_eq!(clock.current_ms(), 0.0);
        clock.seek(20_000.0);
        assert_eq!(clock.current_ms(), 10_000.0);
        clock.seek_by(-2_500.0);
        assert_eq!(clock.current_ms(), 7_500.0);
        assert_eq!(clock.progress(), 0.75);
    }

    #[test]
    fn test_tick_advances_while_playing() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new(10_000.0, 2.0);
        clock.tick(start + Duration::from_secs(1));
        assert_eq!(clock.current_ms(), 0.0);

        clock.toggle_play(start);
        clock.tick(start + Duration::from_millis(500));
        assert!((clock.current_ms() - 1_000.0).abs() < 1e-6);

        clock.toggle_play(start + Duration::from_millis(500));
        clock.tick(start + Duration::from_secs(3));
        assert!((clock.current_ms() - 1_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_playback_stops_at_end() {
        let start = Instant::now();
        let mut clock = PlaybackClock::new(1_000.0, 1.0);
        clock.toggle_play(start);
        clock.tick(start + Duration::from_secs(5));
        assert_eq!(clock.current_ms(), 1_000.0);
        assert!(!clock.is_playing());

        // Playing again from the end restarts
        clock.toggle_play(start + Duration::from_secs(5));
        assert_eq!(clock.current_ms(), 0.0);
    }

    #[test]
    fn test_hover() {
        let mut clock = PlaybackClock::new(1_000.0, 1.0);
        clock.set_hover(Some(2_000.0));
        assert_eq!(clock.hover_ms(), Some(1_000.0));
        clock.set_hover(None);
        assert_eq!(clock.hover_ms(), None);
    }
}
