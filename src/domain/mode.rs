/// Global patrol/pursuit alternation on a tick countdown.
///
/// Advisory only: a frightened ghost ignores the phase until its own
/// fright timer runs out.

use super::entity::GlobalPhase;

#[derive(Clone, Debug)]
pub struct ModeScheduler {
    phase: GlobalPhase,
    remaining: u32,
    patrol_ticks: u32,
    pursuit_ticks: u32,
}

impl ModeScheduler {
    /// Starts in patrol with a full patrol countdown.
    pub fn new(patrol_ticks: u32, pursuit_ticks: u32) -> Self {
        ModeScheduler {
            phase: GlobalPhase::Patrol,
            remaining: patrol_ticks,
            patrol_ticks,
            pursuit_ticks,
        }
    }

    pub fn phase(&self) -> GlobalPhase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Count down one tick. On reaching zero, flip the phase and reload
    /// the countdown with the new phase's duration. Returns the new phase
    /// when a flip happened.
    pub fn tick(&mut self) -> Option<GlobalPhase> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 { return None; }

        let (next, duration) = match self.phase {
            GlobalPhase::Patrol => (GlobalPhase::Pursuit, self.pursuit_ticks),
            GlobalPhase::Pursuit => (GlobalPhase::Patrol, self.patrol_ticks),
        };
        self.phase = next;
        self.remaining = duration;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_with_per_phase_durations() {
        let mut m = ModeScheduler::new(3, 5);
        assert_eq!(m.phase(), GlobalPhase::Patrol);
        assert_eq!(m.tick(), None);
        assert_eq!(m.tick(), None);
        assert_eq!(m.tick(), Some(GlobalPhase::Pursuit));
        assert_eq!(m.remaining(), 5);
        for _ in 0..4 {
            assert_eq!(m.tick(), None);
            assert_eq!(m.phase(), GlobalPhase::Pursuit);
        }
        assert_eq!(m.tick(), Some(GlobalPhase::Patrol));
        assert_eq!(m.remaining(), 3);
    }

    #[test]
    fn default_timings_flip_after_seven_then_twenty_seconds() {
        let hz = 60;
        let mut m = ModeScheduler::new(7 * hz, 20 * hz);
        let flips: Vec<u32> = (1..=(27 * hz + 1))
            .filter(|_| m.tick().is_some())
            .collect();
        assert_eq!(flips, vec![7 * hz, 27 * hz]);
    }

    #[test]
    fn zero_duration_flips_every_tick() {
        let mut m = ModeScheduler::new(0, 0);
        assert_eq!(m.tick(), Some(GlobalPhase::Pursuit));
        assert_eq!(m.tick(), Some(GlobalPhase::Patrol));
    }
}
