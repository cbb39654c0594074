use city_drive::camera::{Camera, CameraPose, Mount, SharedCamera};
use city_drive::config::{Destination, Destinations};
use city_drive::core::{CameraModeController, FrameOutcome, Tween, Tweens};
use city_drive::math::Easing;
use city_drive::mode::CameraMode;
use city_drive::traits::{TrackedAgent, TweenDriver, TweenHandle};
use glam::Vec3;
use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

/// Agent whose state the test sets directly
struct StubAgent {
    position: Vec3,
    heading: f32,
    loaded: bool,
}

impl StubAgent {
    fn at(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            heading,
            loaded: true,
        }
    }
}

impl TrackedAgent for StubAgent {
    fn update(&mut self, _delta: f32) {}

    fn position(&self) -> Vec3 {
        self.position
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn has_render_component(&self) -> bool {
        self.loaded
    }
}

/// Tween driver that counts callback ticks per started tween
#[derive(Default)]
struct SpyTweens {
    inner: Tweens,
    ticks: Rc<RefCell<Vec<u32>>>,
    started: Vec<TweenHandle>,
    cancelled: Vec<TweenHandle>,
}

impl SpyTweens {
    fn update(&mut self, delta: f32) {
        self.inner.update(delta);
    }

    fn ticks_of(&self, nth_started: usize) -> u32 {
        self.ticks.borrow()[nth_started]
    }
}

impl TweenDriver for SpyTweens {
    fn start(&mut self, tween: Tween) -> TweenHandle {
        let slot = {
            let mut ticks = self.ticks.borrow_mut();
            ticks.push(0);
            ticks.len() - 1
        };
        let ticks = Rc::clone(&self.ticks);
        let handle = self
            .inner
            .start(tween.inspect(move |_| ticks.borrow_mut()[slot] += 1));
        self.started.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) -> bool {
        self.cancelled.push(handle);
        self.inner.cancel(handle)
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        self.inner.is_active(handle)
    }

    fn active_count(&self) -> usize {
        self.inner.active_count()
    }
}

struct Rig<T: TweenDriver> {
    camera: SharedCamera,
    tweens: Rc<RefCell<T>>,
    agent: Rc<RefCell<StubAgent>>,
    controller: CameraModeController<T, StubAgent>,
}

fn rig_with<T: TweenDriver + Default>(destinations: Destinations) -> Rig<T> {
    let camera = Camera::new(
        CameraPose::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO),
        Vec3::new(6.0, 3.0, -6.0),
    )
    .shared();
    let tweens = Rc::new(RefCell::new(T::default()));
    let agent = Rc::new(RefCell::new(StubAgent::at(Vec3::new(10.0, 0.0, 0.0), 0.0)));
    let controller = CameraModeController::new(
        Rc::clone(&camera),
        Rc::clone(&tweens),
        Rc::clone(&agent),
        destinations,
    );
    Rig {
        camera,
        tweens,
        agent,
        controller,
    }
}

fn linear_destinations() -> Destinations {
    Destinations {
        education: Destination::Orbit {
            center: Vec3::new(100.0, 100.0, 100.0),
            radius: 50.0,
            height: 150.0,
            approach_duration: 1.0,
            period: 4.0,
            easing: Easing::Linear,
        },
        experience: Destination::Fixed {
            position: Vec3::new(20.0, 30.0, 40.0),
            look_at: Vec3::new(0.0, 0.0, 40.0),
            duration: 2.0,
            easing: Easing::Linear,
        },
        projects: Destination::Fixed {
            position: Vec3::new(-50.0, 20.0, 0.0),
            look_at: Vec3::ZERO,
            duration: 1.0,
            easing: Easing::Linear,
        },
    }
}

#[test]
fn at_most_one_transition_after_each_request() {
    let mut rig = rig_with::<SpyTweens>(linear_destinations());
    let sequence = [
        CameraMode::Experience,
        CameraMode::Education,
        CameraMode::Education,
        CameraMode::Home,
        CameraMode::Projects,
        CameraMode::Experience,
        CameraMode::Home,
        CameraMode::Home,
    ];

    for mode in sequence {
        rig.controller.request_mode_change(mode);
        rig.tweens.borrow_mut().update(0.3);

        let tweens = rig.tweens.borrow();
        assert!(tweens.active_count() <= 1, "after {mode}");
        assert_eq!(rig.controller.current_mode(), mode);

        match rig.controller.active_transition() {
            Some(handle) => {
                assert!(!mode.is_tracking());
                assert_eq!(Some(&handle), tweens.started.last());
                assert!(tweens.is_active(handle));
            }
            None => {
                assert!(mode.is_tracking());
                assert_eq!(tweens.active_count(), 0);
            }
        }
    }
}

#[test]
fn cancelled_transition_never_fires_again() {
    let mut rig = rig_with::<SpyTweens>(linear_destinations());

    rig.controller.request_mode_change(CameraMode::Experience);
    rig.tweens.borrow_mut().update(0.1);
    assert_eq!(rig.tweens.borrow().ticks_of(0), 1);

    rig.controller.request_mode_change(CameraMode::Education);
    // Stay inside the one-second approach so each update ticks once
    for _ in 0..5 {
        rig.tweens.borrow_mut().update(0.1);
    }

    let tweens = rig.tweens.borrow();
    assert_eq!(tweens.cancelled, vec![tweens.started[0]]);
    assert_eq!(tweens.ticks_of(0), 1, "cancelled tween kept ticking");
    assert_eq!(tweens.ticks_of(1), 5);
}

#[test]
fn tracking_pose_is_agent_position_looking_ahead() {
    let mut rig = rig_with::<Tweens>(linear_destinations());

    let outcome = rig.controller.on_frame_tick(0.016);

    let expected = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 1.0));
    assert_eq!(outcome, FrameOutcome::Tracked(expected));
    assert_eq!(rig.camera.borrow().pose(), expected);
    assert_eq!(rig.camera.borrow().mount(), Mount::Rig);
}

#[test]
fn tracking_has_no_memory_of_previous_frames() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.controller.on_frame_tick(0.016);

    {
        let mut agent = rig.agent.borrow_mut();
        agent.position = Vec3::new(-5.0, 0.0, 3.0);
        agent.heading = FRAC_PI_2;
    }
    rig.controller.on_frame_tick(0.016);

    let pose = rig.camera.borrow().pose();
    assert_eq!(pose.position, Vec3::new(-5.0, 0.0, 3.0));
    assert!(pose.look_at.distance(Vec3::new(-4.0, 0.0, 3.0)) < 1e-6);
}

#[test]
fn orbit_steady_state_quarter_turn() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.controller.request_mode_change(CameraMode::Education);

    // Approach lasts exactly one second, then a 4 s lap begins
    rig.tweens.borrow_mut().update(1.0);
    let at_start = rig.camera.borrow().pose();
    assert!(at_start.position.distance(Vec3::new(150.0, 150.0, 100.0)) < 1e-3);

    rig.tweens.borrow_mut().update(1.0);
    let pose = rig.camera.borrow().pose();

    assert!((rig.controller.orbit_angle() - FRAC_PI_2).abs() < 1e-5);
    assert!(pose.position.distance(Vec3::new(100.0, 150.0, 150.0)) < 1e-3);
    assert_eq!(pose.look_at, Vec3::new(100.0, 100.0, 100.0));
    assert_eq!(rig.controller.on_frame_tick(1.0), FrameOutcome::Scripted);
}

#[test]
fn orbit_loops_forever() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.controller.request_mode_change(CameraMode::Education);

    rig.tweens.borrow_mut().update(1.0);
    for _ in 0..100 {
        rig.tweens.borrow_mut().update(0.5);
    }

    let handle = rig.controller.active_transition().unwrap();
    assert!(rig.tweens.borrow().is_active(handle));
    let angle = rig.controller.orbit_angle();
    assert!((0.0..std::f32::consts::TAU).contains(&angle));
}

#[test]
fn repeated_request_restarts_with_same_shape() {
    let mut once = rig_with::<Tweens>(linear_destinations());
    let mut twice = rig_with::<Tweens>(linear_destinations());

    once.controller.request_mode_change(CameraMode::Experience);
    twice.controller.request_mode_change(CameraMode::Experience);
    twice.controller.request_mode_change(CameraMode::Experience);

    assert_eq!(once.tweens.borrow().active_count(), 1);
    assert_eq!(twice.tweens.borrow().active_count(), 1);

    let a = once
        .tweens
        .borrow()
        .describe(once.controller.active_transition().unwrap())
        .unwrap();
    let b = twice
        .tweens
        .borrow()
        .describe(twice.controller.active_transition().unwrap())
        .unwrap();

    assert_eq!(a.from, b.from);
    assert_eq!(a.to, b.to);
    assert_eq!(a.duration, b.duration);
    assert_eq!(a.stages_remaining, b.stages_remaining);
}

#[test]
fn skipped_tick_leaves_pose_untouched() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.agent.borrow_mut().loaded = false;

    let before = rig.camera.borrow().pose();
    let writes = rig.camera.borrow().writes();

    assert_eq!(rig.controller.on_frame_tick(0.016), FrameOutcome::Skipped);
    assert_eq!(rig.camera.borrow().pose(), before);
    assert_eq!(rig.camera.borrow().writes(), writes);
}

#[test]
fn fixed_destination_tweens_position_and_look_at_in_parallel() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.controller.request_mode_change(CameraMode::Experience);

    rig.tweens.borrow_mut().update(1.0);
    let halfway = rig.camera.borrow().pose();
    assert!(halfway.position.distance(Vec3::new(10.0, 20.0, 20.0)) < 1e-4);
    assert!(halfway.look_at.distance(Vec3::new(0.0, 0.0, 20.0)) < 1e-4);

    rig.tweens.borrow_mut().update(1.5);
    let arrived = rig.camera.borrow().pose();
    assert_eq!(arrived, CameraPose::new(Vec3::new(20.0, 30.0, 40.0), Vec3::new(0.0, 0.0, 40.0)));
    assert_eq!(rig.tweens.borrow().active_count(), 0);
    assert_eq!(rig.controller.current_mode(), CameraMode::Experience);
}

#[test]
fn transition_starts_from_rig_eye() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.controller.on_frame_tick(0.016);
    let eye = rig.camera.borrow().eye();
    assert_eq!(eye, Vec3::new(16.0, 3.0, -6.0));

    rig.controller.request_mode_change(CameraMode::Projects);
    let info = rig
        .tweens
        .borrow()
        .describe(rig.controller.active_transition().unwrap())
        .unwrap();
    assert_eq!(&info.from[..3], &eye.to_array());
    assert_eq!(&info.from[3..], &[10.0, 0.0, 1.0]);
}

#[test]
fn returning_home_snaps_on_next_tick() {
    let mut rig = rig_with::<Tweens>(linear_destinations());
    rig.controller.request_mode_change(CameraMode::Experience);
    rig.tweens.borrow_mut().update(0.5);

    rig.controller.request_mode_change(CameraMode::Home);
    rig.tweens.borrow_mut().update(0.5);
    let outcome = rig.controller.on_frame_tick(0.5);

    assert!(matches!(outcome, FrameOutcome::Tracked(_)));
    assert_eq!(rig.camera.borrow().pose().position, Vec3::new(10.0, 0.0, 0.0));
}
