//! Welcome -> loading -> portfolio step machine

use std::time::Duration;

/// Percent added to the simulated progress per tick
pub const PROGRESS_STEP: u8 = 2;

/// Interval between simulated progress ticks
pub const TICK: Duration = Duration::from_millis(100);

/// Pause between reaching 100% and handing off to the 3D view
pub const HANDOFF_DELAY: Duration = Duration::from_millis(500);

/// Progress thresholds above which each indicator dot lights up
pub const DOT_THRESHOLDS: [u8; 3] = [20, 50, 80];

/// Interval of the "Preparing 3D Experience..." dot animation
pub const DOTS_INTERVAL: Duration = Duration::from_millis(500);

/// Which screen the site is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Welcome,
    Loading,
    Portfolio,
}

impl Step {
    /// The visitor pressed the explore button
    pub fn explore(self) -> Self {
        match self {
            Step::Welcome => Step::Loading,
            other => other,
        }
    }

    /// The simulated loading screen finished
    pub fn loading_complete(self) -> Self {
        match self {
            Step::Loading => Step::Portfolio,
            other => other,
        }
    }
}

/// Simulated loading progress shown between the welcome screen and the room
#[derive(Debug, Clone, Default)]
pub struct LoadingSimulation {
    progress: u8,
    tick_accum: Duration,
    complete: bool,
    handoff_elapsed: Duration,
    finished: bool,
    reported: bool,
}

impl LoadingSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the simulation by a frame delta
    pub fn advance(&mut self, dt: Duration) {
        if self.finished {
            return;
        }

        if !self.complete {
            self.tick_accum += dt;
            while self.tick_accum >= TICK && self.progress < 100 {
                self.tick_accum -= TICK;
                self.progress = self.progress.saturating_add(PROGRESS_STEP).min(100);
            }
            if self.progress < 100 {
                return;
            }
            self.complete = true;
            // Leftover time in this frame counts toward the hand-off
            self.handoff_elapsed = std::mem::take(&mut self.tick_accum);
        } else {
            self.handoff_elapsed += dt;
        }

        if self.handoff_elapsed >= HANDOFF_DELAY {
            self.finished = true;
        }
    }

    /// Current progress in percent, 0..=100
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn fraction(&self) -> f32 {
        f32::from(self.progress) / 100.0
    }

    /// Progress reached 100%
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The hand-off delay has elapsed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns true once, on the first call after the simulation finished
    pub fn take_finished(&mut self) -> bool {
        if self.finished && !self.reported {
            self.reported = true;
            true
        } else {
            false
        }
    }

    /// Lit state of the three indicator dots
    pub fn dots(&self) -> [bool; 3] {
        DOT_THRESHOLDS.map(|threshold| self.progress > threshold)
    }
}

/// Cycling ellipsis: "", ".", "..", "..."
#[derive(Debug, Clone, Default)]
pub struct LoadingDots {
    elapsed: Duration,
}

impl LoadingDots {
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    pub fn count(&self) -> usize {
        (self.elapsed.as_millis() / DOTS_INTERVAL.as_millis()) as usize % 4
    }

    pub fn text(&self) -> &'static str {
        match self.count() {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_transitions() {
        let step = Step::default();
        assert_eq!(step, Step::Welcome);

        // Loading can only be left through the simulation
        assert_eq!(step.loading_complete(), Step::Welcome);

        let step = step.explore();
        assert_eq!(step, Step::Loading);
        assert_eq!(step.explore(), Step::Loading);

        let step = step.loading_complete();
        assert_eq!(step, Step::Portfolio);
        assert_eq!(step.explore(), Step::Portfolio);
        assert_eq!(step.loading_complete(), Step::Portfolio);
    }

    #[test]
    fn test_progress_ticks() {
        let mut sim = LoadingSimulation::new();
        sim.advance(Duration::from_millis(99));
        assert_eq!(sim.progress(), 0);

        sim.advance(Duration::from_millis(1));
        assert_eq!(sim.progress(), 2);

        // One long frame covers several ticks
        sim.advance(Duration::from_millis(450));
        assert_eq!(sim.progress(), 10);
        assert!(!sim.is_complete());
    }

    #[test]
    fn test_completion_and_handoff() {
        let mut sim = LoadingSimulation::new();
        sim.advance(Duration::from_secs(5));
        assert_eq!(sim.progress(), 100);
        assert!(sim.is_complete());
        assert!(!sim.is_finished());

        sim.advance(Duration::from_millis(499));
        assert!(!sim.take_finished());

        sim.advance(Duration::from_millis(1));
        assert!(sim.take_finished());
        assert!(!sim.take_finished());
    }

    #[test]
    fn test_progress_never_exceeds_100() {
        let mut sim = LoadingSimulation::new();
        sim.advance(Duration::from_secs(60));
        assert_eq!(sim.progress(), 100);
        assert!(sim.is_finished());
        assert!((sim.fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_indicator_dots() {
        let mut sim = LoadingSimulation::new();
        assert_eq!(sim.dots(), [false, false, false]);

        // 20% exactly does not light the first dot
        sim.advance(Duration::from_millis(1000));
        assert_eq!(sim.progress(), 20);
        assert_eq!(sim.dots(), [false, false, false]);

        sim.advance(Duration::from_millis(100));
        assert_eq!(sim.dots(), [true, false, false]);

        sim.advance(Duration::from_millis(1500));
        assert_eq!(sim.progress(), 52);
        assert_eq!(sim.dots(), [true, true, false]);

        sim.advance(Duration::from_millis(1500));
        assert_eq!(sim.dots(), [true, true, true]);
    }

    #[test]
    fn test_loading_dots_cycle() {
        let mut dots = LoadingDots::default();
        assert_eq!(dots.text(), "");
        dots.advance(Duration::from_millis(500));
        assert_eq!(dots.text(), ".");
        dots.advance(Duration::from_millis(500));
        assert_eq!(dots.text(), "..");
        dots.advance(Duration::from_millis(500));
        assert_eq!(dots.text(), "...");
        dots.advance(Duration::from_millis(500));
        assert_eq!(dots.text(), "");
    }
}
