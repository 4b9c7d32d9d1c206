use mandelbrot_set_core::{
    Adjustment, Application, HoldRepeat, HoldState, ReferenceBackend, SurfaceSize, SurfaceTarget,
};
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in for an interval timer: counts live instances.
struct FakeInterval {
    live: Rc<Cell<usize>>,
}

impl FakeInterval {
    fn start(live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self { live: live.clone() }
    }
}

impl Drop for FakeInterval {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// Fire one interval tick: apply the held adjustment, if any.
fn tick(hold: &HoldRepeat<FakeInterval>, app: &mut Application<ReferenceBackend>) {
    if let HoldState::ContinuousAdjustment(adjustment) = hold.state() {
        app.apply(adjustment);
    }
}

fn press(
    hold: &mut HoldRepeat<FakeInterval>,
    app: &mut Application<ReferenceBackend>,
    live: &Rc<Cell<usize>>,
    adjustment: Adjustment,
) {
    app.apply(adjustment);
    hold.press(adjustment, FakeInterval::start(live));
}

#[test]
fn two_hold_cycles_leave_no_timers_and_bounded_redraws() {
    let size = SurfaceSize::new(16, 16);
    let mut app = Application::new(ReferenceBackend::new(), size, ReferenceBackend::new(), size);
    let mut hold = HoldRepeat::new();
    let live = Rc::new(Cell::new(0));

    for adjustment in [
        Adjustment::zoom_in(SurfaceTarget::Main),
        Adjustment::left(SurfaceTarget::Main),
    ] {
        press(&mut hold, &mut app, &live, adjustment);
        for _ in 0..3 {
            tick(&hold, &mut app);
        }
        assert!(hold.release());
    }

    // Ticks arriving after release do nothing.
    for _ in 0..5 {
        tick(&hold, &mut app);
    }

    assert_eq!(live.get(), 0);
    assert_eq!(hold.state(), HoldState::Idle);
    assert_eq!(app.main_surface().backend().draws(), 8);
    assert_eq!(app.julia_surface().backend().draws(), 0);
}

#[test]
fn pressing_again_without_release_keeps_one_timer() {
    let size = SurfaceSize::new(8, 8);
    let mut app = Application::new(ReferenceBackend::new(), size, ReferenceBackend::new(), size);
    let mut hold = HoldRepeat::new();
    let live = Rc::new(Cell::new(0));

    press(&mut hold, &mut app, &live, Adjustment::up(SurfaceTarget::Julia));
    press(&mut hold, &mut app, &live, Adjustment::down(SurfaceTarget::Julia));
    assert_eq!(live.get(), 1);

    tick(&hold, &mut app);
    // up, down, down: net one step down.
    let offset = app.julia_surface().transform().offset;
    assert!((offset.y + 0.2).abs() < 1e-6);

    hold.release();
    assert_eq!(live.get(), 0);
}
