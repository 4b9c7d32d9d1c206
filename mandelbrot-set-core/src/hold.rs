//! Press-and-hold repetition of pan/zoom steps.
//!
//! `HoldRepeat` owns at most one scheduler handle. Dropping the handle must
//! cancel the repetition (as `gloo_timers::callback::Interval` does), so
//! replacing or releasing it is all the cancellation needed.

use crate::controller::Adjustment;

/// Controller interaction state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoldState {
    Idle,
    ContinuousAdjustment(Adjustment),
}

pub struct HoldRepeat<H> {
    active: Option<(Adjustment, H)>,
}

impl<H> Default for HoldRepeat<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H> HoldRepeat<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start repeating `adjustment` with `handle`. A previous handle is
    /// dropped first, so two presses never leave two timers running.
    pub fn press(&mut self, adjustment: Adjustment, handle: H) {
        if let Some((previous, old)) = self.active.take() {
            log::debug!("replacing held adjustment {previous:?}");
            drop(old);
        }
        self.active = Some((adjustment, handle));
    }

    /// Stop repeating. Returns false if nothing was held.
    pub fn release(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn state(&self) -> HoldState {
        match &self.active {
            Some((adjustment, _)) => HoldState::ContinuousAdjustment(*adjustment),
            None => HoldState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SurfaceTarget;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeTimer {
        live: Rc<Cell<usize>>,
    }

    impl FakeTimer {
        fn start(live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self { live: live.clone() }
        }
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn starts_idle() {
        let hold: HoldRepeat<FakeTimer> = HoldRepeat::new();
        assert_eq!(hold.state(), HoldState::Idle);
    }

    #[test]
    fn press_reports_continuous_state() {
        let live = Rc::new(Cell::new(0));
        let mut hold = HoldRepeat::new();
        let up = Adjustment::up(SurfaceTarget::Main);
        hold.press(up, FakeTimer::start(&live));
        assert_eq!(hold.state(), HoldState::ContinuousAdjustment(up));
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn second_press_cancels_first_timer() {
        let live = Rc::new(Cell::new(0));
        let mut hold = HoldRepeat::new();
        hold.press(Adjustment::up(SurfaceTarget::Main), FakeTimer::start(&live));
        hold.press(Adjustment::left(SurfaceTarget::Julia), FakeTimer::start(&live));
        assert_eq!(live.get(), 1);
        assert!(hold.release());
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn release_is_idempotent() {
        let live = Rc::new(Cell::new(0));
        let mut hold = HoldRepeat::new();
        assert!(!hold.release());
        hold.press(Adjustment::zoom_in(SurfaceTarget::Both), FakeTimer::start(&live));
        assert!(hold.release());
        assert!(!hold.release());
        assert_eq!(live.get(), 0);
        assert_eq!(hold.state(), HoldState::Idle);
    }
}
