//! Loading screen sequencing: a progress counter, a short flash at 100 %,
//! then the switch to the museum. A safety timeout guarantees the switch.

use crate::constants::{
    LOADING_FLASH_MS, LOADING_INTERVAL_MS, LOADING_PROGRESS_STEP, LOADING_SAFETY_TIMEOUT_MS,
};
use crate::store::AppPhase;
use std::time::Duration;

/// What the loading overlay should draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingView {
    /// Percent, 0..=100.
    pub progress: u8,
    pub flashing: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LoadingSequencer {
    elapsed: Duration,
    since_step: Duration,
    flash: Option<Duration>,
    progress: u8,
    done: bool,
}

impl LoadingSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn view(&self) -> LoadingView {
        LoadingView {
            progress: self.progress,
            flashing: self.flash.is_some() && !self.done,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by wall-clock `dt` and report the phase the app should be in.
    pub fn advance(&mut self, dt: Duration) -> AppPhase {
        if self.done {
            return AppPhase::Museum;
        }
        self.elapsed += dt;

        if let Some(flash) = self.flash.as_mut() {
            *flash += dt;
            if *flash >= Duration::from_millis(LOADING_FLASH_MS) {
                self.finish();
            }
        } else {
            self.since_step += dt;
            let interval = Duration::from_millis(LOADING_INTERVAL_MS);
            while self.since_step >= interval && self.progress < 100 {
                self.since_step -= interval;
                self.progress = (self.progress + LOADING_PROGRESS_STEP).min(100);
            }
            if self.progress >= 100 {
                log::info!("[loading] complete");
                self.flash = Some(Duration::ZERO);
            }
        }

        if !self.done && self.elapsed >= Duration::from_millis(LOADING_SAFETY_TIMEOUT_MS) {
            log::warn!(
                "[loading] safety timeout at {}%, entering museum",
                self.progress
            );
            self.progress = 100;
            self.finish();
        }

        if self.done {
            AppPhase::Museum
        } else {
            AppPhase::Loading
        }
    }

    fn finish(&mut self) {
        self.done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn progress_steps_every_interval() {
        let mut l = LoadingSequencer::new();
        assert_eq!(l.advance(ms(39)), AppPhase::Loading);
        assert_eq!(l.view().progress, 0);
        l.advance(ms(1));
        assert_eq!(l.view().progress, 2);
        l.advance(ms(400));
        assert_eq!(l.view().progress, 22);
    }

    #[test]
    fn flashes_then_enters_museum() {
        let mut l = LoadingSequencer::new();
        // 50 steps of 40 ms reach 100 %.
        for _ in 0..50 {
            assert_eq!(l.advance(ms(40)), AppPhase::Loading);
        }
        assert_eq!(l.view(), LoadingView { progress: 100, flashing: true });
        assert_eq!(l.advance(ms(399)), AppPhase::Loading);
        assert_eq!(l.advance(ms(1)), AppPhase::Museum);
        assert!(l.is_done());
        assert!(!l.view().flashing);
        assert_eq!(l.advance(ms(16)), AppPhase::Museum);
    }

    #[test]
    fn one_huge_step_still_flashes_first() {
        let mut l = LoadingSequencer::new();
        assert_eq!(l.advance(ms(5_000)), AppPhase::Loading);
        assert!(l.view().flashing);
        assert_eq!(l.advance(ms(400)), AppPhase::Museum);
    }

    #[test]
    fn safety_timeout_forces_museum() {
        let mut l = LoadingSequencer::new();
        assert_eq!(l.advance(ms(8_000)), AppPhase::Museum);
        assert_eq!(l.view().progress, 100);
    }
}
