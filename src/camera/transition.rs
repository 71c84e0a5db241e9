//! Camera transition state machine.
//!
//! `Idle` is free orbit. `begin` moves to `Transitioning`, where the camera
//! follows a raised arc toward the target. When progress reaches 1 the
//! machine enters `Arrived` and reports [`TransitionEvent::Completed`] once.
//!
//! The update step is a pure function over a `Copy` state so the render
//! layer only ever applies its result.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Phase of the camera state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Transitioning,
    Arrived,
}

/// Timing and shape of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Seconds from start to arrival.
    pub duration_secs: f32,
    /// How far the arc midpoint is raised above the straight path.
    pub arc_height: f32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            // 200 frames at 60 fps.
            duration_secs: 10.0 / 3.0,
            arc_height: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionEvent {
    Completed { target: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Transition progress in `[0, 1]`.
    pub progress: f32,
    /// Dragging one node moves the entire graph.
    pub locked: bool,
    pub phase: TransitionPhase,
    start: Vec3,
    target: Option<Vec3>,
}

impl CameraState {
    pub fn idle(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            look_at,
            progress: 0.0,
            locked: false,
            phase: TransitionPhase::Idle,
            start: position,
            target: None,
        }
    }

    /// Start a transition from the current position toward `target`.
    ///
    /// An active transition is overwritten. A non-finite target is ignored
    /// and the state is left untouched. Returns whether a transition started.
    pub fn begin(&mut self, target: Vec3) -> bool {
        if !target.is_finite() {
            tracing::warn!("Ignoring camera transition toward invalid target {target}");
            return false;
        }
        self.start = self.position;
        self.target = Some(target);
        self.progress = 0.0;
        self.phase = TransitionPhase::Transitioning;
        tracing::debug!("Camera transition {} -> {}", self.start, target);
        true
    }

    /// Return to `Idle`, dropping any pending completion.
    pub fn cancel(&mut self) {
        self.progress = 0.0;
        self.target = None;
        self.phase = TransitionPhase::Idle;
    }

    /// Orbit input is accepted only while idle.
    pub fn orbit_enabled(&self) -> bool {
        self.phase == TransitionPhase::Idle
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }
}

/// Point on the raised arc from `start` to `target` at parameter `t`.
pub fn arc_point(start: Vec3, target: Vec3, arc_height: f32, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let mid = start.lerp(target, 0.5) + Vec3::Y * arc_height;
    start.lerp(mid, t).lerp(mid.lerp(target, t), t)
}

/// Advance the machine by `dt` seconds.
///
/// Progress moves by `dt / duration`. Invalid or negative `dt` counts as
/// zero. Completion is reported exactly once; afterwards `Arrived` is
/// returned unchanged with no event.
pub fn advance(
    state: CameraState,
    dt: f32,
    settings: &TransitionSettings,
) -> (CameraState, Option<TransitionEvent>) {
    let (TransitionPhase::Transitioning, Some(target)) = (state.phase, state.target) else {
        return (state, None);
    };

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let step = if settings.duration_secs > 0.0 {
        dt / settings.duration_secs
    } else {
        1.0
    };

    let mut next = state;
    next.progress = (state.progress + step).min(1.0);
    next.position = arc_point(state.start, target, settings.arc_height, next.progress);
    next.look_at = target;

    if next.progress >= 1.0 {
        next.phase = TransitionPhase::Arrived;
        return (next, Some(TransitionEvent::Completed { target }));
    }
    (next, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Vec3 = Vec3::new(0.0, 3.0, 10.0);
    const TARGET: Vec3 = Vec3::new(5.0, 0.2, 3.0);

    fn started() -> CameraState {
        let mut state = CameraState::idle(START, Vec3::ZERO);
        assert!(state.begin(TARGET));
        state
    }

    #[test]
    fn test_arc_endpoints_and_midpoint_raised() {
        assert_eq!(arc_point(START, TARGET, 2.0, 0.0), START);
        assert!(arc_point(START, TARGET, 2.0, 1.0).distance(TARGET) < 1e-5);
        let halfway = arc_point(START, TARGET, 2.0, 0.5);
        let straight = START.lerp(TARGET, 0.5);
        assert!((halfway.y - (straight.y + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let settings = TransitionSettings::default();
        let mut state = started();
        let mut completions = 0;
        for _ in 0..1000 {
            let (next, event) = advance(state, 1.0 / 60.0, &settings);
            if event.is_some() {
                completions += 1;
            }
            state = next;
        }
        assert_eq!(completions, 1);
        assert_eq!(state.phase, TransitionPhase::Arrived);
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn test_progress_is_frame_rate_independent() {
        let settings = TransitionSettings::default();
        let mut fast = started();
        let mut slow = started();
        for _ in 0..60 {
            fast = advance(fast, 1.0 / 60.0, &settings).0;
        }
        for _ in 0..30 {
            slow = advance(slow, 1.0 / 30.0, &settings).0;
        }
        assert!((fast.progress - slow.progress).abs() < 1e-4);
        assert!(fast.position.distance(slow.position) < 1e-3);
    }

    #[test]
    fn test_invalid_target_stays_idle() {
        let mut state = CameraState::idle(START, Vec3::ZERO);
        assert!(!state.begin(Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!state.begin(Vec3::splat(f32::INFINITY)));
        assert_eq!(state.phase, TransitionPhase::Idle);
        assert!(state.target().is_none());
        let (next, event) = advance(state, 1.0, &TransitionSettings::default());
        assert_eq!(next, state);
        assert!(event.is_none());
    }

    #[test]
    fn test_cancel_drops_pending_completion() {
        let settings = TransitionSettings::default();
        let (mut state, _) = advance(started(), 1.0, &settings);
        assert!(state.progress > 0.0);
        state.cancel();
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.phase, TransitionPhase::Idle);
        assert!(state.orbit_enabled());
        let (_, event) = advance(state, 100.0, &settings);
        assert!(event.is_none());
    }

    #[test]
    fn test_restart_overwrites_active_transition() {
        let settings = TransitionSettings::default();
        let (mut state, _) = advance(started(), 1.0, &settings);
        let midway = state.position;
        let other = Vec3::new(-4.0, 1.0, 0.0);
        state.begin(other);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.target(), Some(other));
        let (state, _) = advance(state, 0.0, &settings);
        assert_eq!(state.position, midway);
    }

    #[test]
    fn test_orbit_disabled_while_transitioning() {
        let state = started();
        assert!(!state.orbit_enabled());
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let settings = TransitionSettings::default();
        let state = started();
        assert_eq!(advance(state, f32::NAN, &settings).0.progress, 0.0);
        assert_eq!(advance(state, -5.0, &settings).0.progress, 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let settings = TransitionSettings {
            duration_secs: 0.0,
            ..Default::default()
        };
        let (state, event) = advance(started(), 0.0, &settings);
        assert_eq!(event, Some(TransitionEvent::Completed { target: TARGET }));
        assert_eq!(state.phase, TransitionPhase::Arrived);
    }
}
