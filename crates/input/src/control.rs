/// Minimum joystick force before a direction change is applied.
pub const JOYSTICK_DEADZONE: f32 = 0.2;

/// A high-level intent that any input device can produce.
///
/// Keyboard edges (press = true, release = false) and the virtual joystick
/// both resolve to these; the simulation core consumes intents only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Fire,
}

/// The six boolean intents read once per simulation tick.
///
/// The input layer writes between ticks; the controller and targeting
/// system read during the tick. Fire is the only flag cleared by a
/// consumer (the targeting system), giving it edge-triggered semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a keyboard edge event.
    pub fn set(&mut self, intent: Intent, pressed: bool) {
        match intent {
            Intent::Forward => self.forward = pressed,
            Intent::Backward => self.backward = pressed,
            Intent::Left => self.left = pressed,
            Intent::Right => self.right = pressed,
            Intent::Jump => self.jump = pressed,
            Intent::Fire => self.fire = pressed,
        }
    }

    /// Apply a virtual-joystick reading.
    ///
    /// `angle_deg` is measured counter-clockwise with 0° pointing right;
    /// exactly one directional intent is set per reading:
    /// right [0°, 45°] ∪ [315°, 360°), forward (45°, 135°),
    /// left [135°, 225°], backward (225°, 315°).
    /// Readings at or below the deadzone force change nothing.
    pub fn apply_joystick(&mut self, angle_deg: f32, force: f32) {
        if force <= JOYSTICK_DEADZONE {
            return;
        }
        let angle = angle_deg.rem_euclid(360.0);

        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;

        if angle <= 45.0 || angle >= 315.0 {
            self.right = true;
        } else if angle < 135.0 {
            self.forward = true;
        } else if angle <= 225.0 {
            self.left = true;
        } else {
            self.backward = true;
        }
        tracing::trace!(angle, force, "joystick direction applied");
    }

    /// Clear the fire flag. Called by the targeting system after every
    /// processed fire, hit or miss.
    pub fn clear_fire(&mut self) {
        self.fire = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directions(c: &ControlState) -> [bool; 4] {
        [c.forward, c.backward, c.left, c.right]
    }

    #[test]
    fn keyboard_edges_set_and_release() {
        let mut c = ControlState::new();
        c.set(Intent::Forward, true);
        c.set(Intent::Jump, true);
        assert!(c.forward && c.jump);

        c.set(Intent::Forward, false);
        assert!(!c.forward && c.jump);
    }

    #[test]
    fn joystick_up_maps_to_forward_only() {
        let mut c = ControlState::new();
        c.apply_joystick(90.0, 0.5);
        assert_eq!(directions(&c), [true, false, false, false]);
    }

    #[test]
    fn joystick_quadrants() {
        let cases = [
            (0.0, [false, false, false, true]),
            (45.0, [false, false, false, true]),
            (46.0, [true, false, false, false]),
            (135.0, [false, false, true, false]),
            (225.0, [false, false, true, false]),
            (226.0, [false, true, false, false]),
            (314.0, [false, true, false, false]),
            (315.0, [false, false, false, true]),
            (359.0, [false, false, false, true]),
        ];
        for (angle, expected) in cases {
            let mut c = ControlState::new();
            c.apply_joystick(angle, 1.0);
            assert_eq!(directions(&c), expected, "angle {angle}");
        }
    }

    #[test]
    fn joystick_below_deadzone_changes_nothing() {
        let mut c = ControlState::new();
        c.set(Intent::Backward, true);
        c.apply_joystick(90.0, 0.1);
        assert_eq!(directions(&c), [false, true, false, false]);
    }

    #[test]
    fn joystick_replaces_previous_direction() {
        let mut c = ControlState::new();
        c.apply_joystick(90.0, 1.0);
        c.apply_joystick(180.0, 1.0);
        assert_eq!(directions(&c), [false, false, true, false]);
    }

    #[test]
    fn joystick_leaves_jump_and_fire_alone() {
        let mut c = ControlState::new();
        c.set(Intent::Fire, true);
        c.set(Intent::Jump, true);
        c.apply_joystick(90.0, 1.0);
        assert!(c.fire && c.jump);
    }

    #[test]
    fn clear_fire_only_clears_fire() {
        let mut c = ControlState::new();
        c.set(Intent::Fire, true);
        c.set(Intent::Forward, true);
        c.clear_fire();
        assert!(!c.fire);
        assert!(c.forward);
    }
}
