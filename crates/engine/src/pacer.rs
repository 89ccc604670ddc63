//! Fixed-rate tick pacing for the host loop
//!
//! The pacer ticks whether or not a game is running, so the host can always
//! sleep until the next tick instead of polling with a zero timeout.

#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: u64,
    last_tick_ms: u64,
}

impl FramePacer {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            last_tick_ms: now_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Whether a tick is due; a due tick is consumed
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_tick_ms) >= self.interval_ms {
            self.last_tick_ms = now_ms;
            return true;
        }
        false
    }

    /// Time left until the next tick
    pub fn timeout_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.last_tick_ms);
        self.interval_ms.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_interval() {
        let mut pacer = FramePacer::new(16, 0);
        assert!(!pacer.poll(0));
        assert!(!pacer.poll(15));
        assert!(pacer.poll(16));
        assert!(!pacer.poll(16));
        assert!(!pacer.poll(31));
        assert!(pacer.poll(32));
    }

    #[test]
    fn timeout_counts_down_to_next_tick() {
        let mut pacer = FramePacer::new(16, 100);
        assert_eq!(pacer.timeout_ms(100), 16);
        assert_eq!(pacer.timeout_ms(110), 6);
        assert_eq!(pacer.timeout_ms(130), 0);
        assert!(pacer.poll(130));
        assert_eq!(pacer.timeout_ms(130), 16);
    }

    #[test]
    fn idle_loop_always_waits() {
        // Ticks are consumed even when nothing uses them, so a loop with no
        // game running never sees a zero timeout right after a tick.
        let mut pacer = FramePacer::new(16, 0);
        let mut now = 0;
        for _ in 0..100 {
            now += pacer.timeout_ms(now);
            assert!(pacer.poll(now));
            assert!(pacer.timeout_ms(now) > 0);
        }
        assert_eq!(now, 1600);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut pacer = FramePacer::new(0, 0);
        assert_eq!(pacer.interval_ms(), 1);
        assert_eq!(pacer.timeout_ms(0), 1);
        assert!(pacer.poll(1));
    }
}
