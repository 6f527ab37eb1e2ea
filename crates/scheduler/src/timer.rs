//! Timer module - virtual-clock gravity and line-clear timers
//!
//! Nothing here reads a wall clock. The caller feeds elapsed milliseconds
//! into [`TickScheduler::poll`] and receives due events one at a time, in
//! deadline order, so tests can replay any timeline deterministically.

use puzzle_engines_core::tetris::scoring::gravity_interval_ms;
use puzzle_engines_core::TetrisConfig;

/// Supplies the gravity interval for a level
pub trait IntervalProvider {
    fn interval_ms(&self, level: u32) -> u32;
}

impl<F: Fn(u32) -> u32> IntervalProvider for F {
    fn interval_ms(&self, level: u32) -> u32 {
        self(level)
    }
}

/// Default speed curve: `max(min, base - (level - 1) * step)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCurve {
    config: TetrisConfig,
}

impl LevelCurve {
    pub fn new(config: TetrisConfig) -> Self {
        Self { config }
    }
}

impl IntervalProvider for LevelCurve {
    fn interval_ms(&self, level: u32) -> u32 {
        gravity_interval_ms(level, &self.config)
    }
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Periodic gravity tick
    Gravity,
    /// The line clear with this token may be completed
    ClearDue { seq: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GravityTimer {
    level: u32,
    interval_ms: u32,
    elapsed_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClearTimer {
    seq: u32,
    remaining_ms: u32,
}

/// Gravity plus one-shot clear timer on a virtual timeline
#[derive(Debug, Clone)]
pub struct TickScheduler<P = LevelCurve> {
    provider: P,
    gravity: Option<GravityTimer>,
    clear: Option<ClearTimer>,
    now_ms: u64,
}

impl Default for TickScheduler<LevelCurve> {
    fn default() -> Self {
        Self::new(LevelCurve::default())
    }
}

impl<P: IntervalProvider> TickScheduler<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            gravity: None,
            clear: None,
            now_ms: 0,
        }
    }

    /// Arm (or re-arm) gravity for `level`, restarting the period
    pub fn start(&mut self, level: u32) {
        let interval_ms = self.provider.interval_ms(level).max(1);
        log::debug!("gravity armed: level {} every {}ms", level, interval_ms);
        self.gravity = Some(GravityTimer {
            level,
            interval_ms,
            elapsed_ms: 0,
        });
    }

    /// Disarm gravity; a scheduled clear keeps running
    pub fn stop(&mut self) {
        self.gravity = None;
    }

    /// Disarm everything
    pub fn reset(&mut self) {
        self.gravity = None;
        self.clear = None;
    }

    /// Arm the one-shot clear timer, replacing any earlier one
    pub fn schedule_clear(&mut self, seq: u32, delay_ms: u32) {
        log::debug!("clear #{} due in {}ms", seq, delay_ms);
        self.clear = Some(ClearTimer {
            seq,
            remaining_ms: delay_ms,
        });
    }

    pub fn cancel_clear(&mut self) {
        self.clear = None;
    }

    /// Gravity is armed
    pub fn is_running(&self) -> bool {
        self.gravity.is_some()
    }

    /// Level the gravity timer was armed for
    pub fn armed_level(&self) -> Option<u32> {
        self.gravity.map(|g| g.level)
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.gravity.map(|g| g.interval_ms)
    }

    /// Token of the scheduled clear, if any
    pub fn clear_seq(&self) -> Option<u32> {
        self.clear.map(|c| c.seq)
    }

    /// Virtual time consumed so far
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Milliseconds until the next event, if any timer is armed
    pub fn next_deadline_ms(&self) -> Option<u32> {
        let gravity = self.gravity.map(|g| g.interval_ms.saturating_sub(g.elapsed_ms));
        let clear = self.clear.map(|c| c.remaining_ms);
        match (gravity, clear) {
            (Some(g), Some(c)) => Some(g.min(c)),
            (g, c) => g.or(c),
        }
    }

    /// Advance up to `budget_ms` and return the first event that comes due
    ///
    /// Returns the time actually consumed with the event. If nothing is due
    /// within the budget, the whole budget is consumed and None returned.
    /// A clear due at the same instant as gravity fires first.
    pub fn poll(&mut self, budget_ms: u32) -> Option<(u32, TimerEvent)> {
        let gravity_in = self
            .gravity
            .map(|g| g.interval_ms.saturating_sub(g.elapsed_ms));
        let clear = self.clear;

        let (due_in, event) = match (clear, gravity_in) {
            (Some(c), Some(g)) if g < c.remaining_ms => (g, TimerEvent::Gravity),
            (Some(c), _) => (c.remaining_ms, TimerEvent::ClearDue { seq: c.seq }),
            (None, Some(g)) => (g, TimerEvent::Gravity),
            (None, None) => {
                self.elapse(budget_ms);
                return None;
            }
        };

        if due_in > budget_ms {
            self.elapse(budget_ms);
            return None;
        }

        self.elapse(due_in);
        match event {
            TimerEvent::Gravity => {
                if let Some(g) = self.gravity.as_mut() {
                    g.elapsed_ms = 0;
                }
            }
            TimerEvent::ClearDue { .. } => self.clear = None,
        }
        Some((due_in, event))
    }

    fn elapse(&mut self, ms: u32) {
        self.now_ms += ms as u64;
        if let Some(g) = self.gravity.as_mut() {
            g.elapsed_ms = g.elapsed_ms.saturating_add(ms);
        }
        if let Some(c) = self.clear.as_mut() {
            c.remaining_ms = c.remaining_ms.saturating_sub(ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_scheduler_consumes_budget() {
        let mut s = TickScheduler::default();
        assert_eq!(s.poll(500), None);
        assert_eq!(s.now_ms(), 500);
        assert_eq!(s.next_deadline_ms(), None);
    }

    #[test]
    fn test_gravity_fires_periodically() {
        let mut s = TickScheduler::default();
        s.start(1);
        assert_eq!(s.poll(999), None);
        assert_eq!(s.poll(10), Some((1, TimerEvent::Gravity)));
        assert_eq!(s.next_deadline_ms(), Some(1000));
    }

    #[test]
    fn test_restart_resets_period() {
        let mut s = TickScheduler::default();
        s.start(1);
        assert_eq!(s.poll(600), None);
        s.start(2);
        assert_eq!(s.interval_ms(), Some(900));
        assert_eq!(s.next_deadline_ms(), Some(900));
    }

    #[test]
    fn test_clear_wins_tie_with_gravity() {
        let mut s = TickScheduler::new(|_level: u32| 300);
        s.start(1);
        s.schedule_clear(4, 300);
        assert_eq!(s.poll(1000), Some((300, TimerEvent::ClearDue { seq: 4 })));
        assert_eq!(s.poll(1000), Some((0, TimerEvent::Gravity)));
        assert_eq!(s.clear_seq(), None);
    }

    #[test]
    fn test_stop_keeps_clear() {
        let mut s = TickScheduler::default();
        s.start(1);
        s.schedule_clear(1, 300);
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.poll(1000), Some((300, TimerEvent::ClearDue { seq: 1 })));
        assert_eq!(s.poll(1000), None);
    }

    #[test]
    fn test_reset_disarms_everything() {
        let mut s = TickScheduler::default();
        s.start(3);
        s.schedule_clear(2, 300);
        s.reset();
        assert_eq!(s.next_deadline_ms(), None);
        assert_eq!(s.poll(5000), None);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut s = TickScheduler::new(|_level: u32| 0);
        s.start(1);
        assert_eq!(s.interval_ms(), Some(1));
    }
}
