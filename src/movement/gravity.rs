//! Gravity and jumping.
//!
//! Two logical states, `Grounded` and `Airborne`. The collision query's raw
//! grounded flag only drives them through a short grace window, so a single
//! missed ground report (stepping over a seam) does not drop the actor into
//! the air.

use crate::config::{MovementConfig, VerticalContactPolicy};
use crate::physics::ContactFlags;

use super::state::{GroundState, MotionState};

/// A change of logical ground state during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    Landed,
    LeftGround,
}

/// Apply one tick of gravity, capped at terminal speed.
pub fn integrate_gravity(state: &mut MotionState, config: &MovementConfig, dt: f32) {
    state.vertical_speed -= config.effective_gravity() * dt;
    if state.vertical_speed < -config.terminal_speed {
        state.vertical_speed = -config.terminal_speed;
    }
}

/// React to contacts reported by the vertical move.
///
/// Returns the speed that was cancelled, if any.
pub fn resolve_vertical_contact(
    state: &mut MotionState,
    contacts: ContactFlags,
    policy: VerticalContactPolicy,
) -> Option<f32> {
    let cancel = match policy {
        VerticalContactPolicy::ZeroOnAnyContact => contacts.vertical(),
        VerticalContactPolicy::Directional => {
            (contacts.above && state.vertical_speed > 0.0)
                || (contacts.below && state.vertical_speed < 0.0)
        }
    };

    if cancel {
        let cancelled = state.vertical_speed;
        state.vertical_speed = 0.0;
        Some(cancelled)
    } else {
        None
    }
}

/// Fold the resolver's grounded flag into the logical ground state.
pub fn update_ground_state(
    state: &mut MotionState,
    reported_grounded: bool,
    grace_limit: f32,
    dt: f32,
) -> Option<GroundTransition> {
    if reported_grounded {
        state.grace_timer = 0.0;
        if state.ground == GroundState::Airborne {
            state.ground = GroundState::Grounded;
            return Some(GroundTransition::Landed);
        }
        return None;
    }

    if state.ground == GroundState::Grounded {
        state.grace_timer += dt;
        if state.grace_timer > grace_limit {
            state.ground = GroundState::Airborne;
            state.grace_timer = 0.0;
            return Some(GroundTransition::LeftGround);
        }
    }
    None
}

/// Start a jump if standing. Returns whether the jump happened.
pub fn try_jump(state: &mut MotionState, jump_speed: f32) -> bool {
    if state.ground != GroundState::Grounded {
        return false;
    }
    state.vertical_speed = jump_speed;
    state.ground = GroundState::Airborne;
    state.grace_timer = 0.0;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn grounded() -> MotionState {
        MotionState {
            ground: GroundState::Grounded,
            ..MotionState::default()
        }
    }

    #[test]
    fn one_tick_of_gravity_uses_multiplier() {
        let config = MovementConfig::default();
        let mut state = MotionState::default();
        integrate_gravity(&mut state, &config, 0.02);
        assert_abs_diff_eq!(state.vertical_speed, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn gravity_never_exceeds_terminal_speed() {
        let config = MovementConfig {
            gravity: 1_000.0,
            ..MovementConfig::default()
        };
        let mut state = MotionState::default();
        for _ in 0..500 {
            integrate_gravity(&mut state, &config, 0.05);
            assert!(state.vertical_speed >= -config.terminal_speed);
        }
        assert_eq!(state.vertical_speed, -config.terminal_speed);
    }

    #[test]
    fn any_vertical_contact_zeroes_speed() {
        let mut state = MotionState {
            vertical_speed: 6.0,
            ..MotionState::default()
        };
        let ceiling = ContactFlags {
            above: true,
            ..ContactFlags::NONE
        };
        let cancelled =
            resolve_vertical_contact(&mut state, ceiling, VerticalContactPolicy::ZeroOnAnyContact);
        assert_eq!(cancelled, Some(6.0));
        assert_eq!(state.vertical_speed, 0.0);

        let sides = ContactFlags {
            sides: true,
            ..ContactFlags::NONE
        };
        state.vertical_speed = -3.0;
        assert_eq!(
            resolve_vertical_contact(&mut state, sides, VerticalContactPolicy::ZeroOnAnyContact),
            None
        );
        assert_eq!(state.vertical_speed, -3.0);
    }

    #[test]
    fn directional_policy_keeps_falling_speed_on_ceiling() {
        let mut state = MotionState {
            vertical_speed: -2.0,
            ..MotionState::default()
        };
        let ceiling = ContactFlags {
            above: true,
            ..ContactFlags::NONE
        };
        assert_eq!(
            resolve_vertical_contact(&mut state, ceiling, VerticalContactPolicy::Directional),
            None
        );
        assert_eq!(state.vertical_speed, -2.0);

        let floor = ContactFlags {
            below: true,
            ..ContactFlags::NONE
        };
        assert_eq!(
            resolve_vertical_contact(&mut state, floor, VerticalContactPolicy::Directional),
            Some(-2.0)
        );
    }

    #[test]
    fn grace_window_holds_then_releases() {
        let mut state = grounded();
        let dt = 0.01;

        for _ in 0..25 {
            assert_eq!(update_ground_state(&mut state, false, 0.3, dt), None);
        }
        assert_eq!(state.ground, GroundState::Grounded);
        assert!(state.grace_timer <= 0.3);

        let mut left = None;
        for _ in 0..6 {
            left = left.or(update_ground_state(&mut state, false, 0.3, dt));
        }
        assert_eq!(left, Some(GroundTransition::LeftGround));
        assert_eq!(state.ground, GroundState::Airborne);
        assert_eq!(state.grace_timer, 0.0);
    }

    #[test]
    fn ground_report_resets_grace() {
        let mut state = grounded();
        update_ground_state(&mut state, false, 0.3, 0.2);
        assert_abs_diff_eq!(state.grace_timer, 0.2);
        assert_eq!(update_ground_state(&mut state, true, 0.3, 0.2), None);
        assert_eq!(state.grace_timer, 0.0);
        assert_eq!(update_ground_state(&mut state, false, 0.3, 0.2), None);
        assert_eq!(state.ground, GroundState::Grounded);
    }

    #[test]
    fn airborne_does_not_accumulate_grace() {
        let mut state = MotionState::default();
        update_ground_state(&mut state, false, 0.3, 1.0);
        assert_eq!(state.grace_timer, 0.0);
        assert_eq!(
            update_ground_state(&mut state, true, 0.3, 0.01),
            Some(GroundTransition::Landed)
        );
    }

    #[test]
    fn jump_only_from_ground() {
        let mut state = MotionState::default();
        assert!(!try_jump(&mut state, 10.0));
        assert_eq!(state.vertical_speed, 0.0);

        let mut state = grounded();
        state.grace_timer = 0.1;
        assert!(try_jump(&mut state, 10.0));
        assert_eq!(state.vertical_speed, 10.0);
        assert_eq!(state.ground, GroundState::Airborne);
        assert_eq!(state.grace_timer, 0.0);

        assert!(!try_jump(&mut state, 10.0));
    }
}
