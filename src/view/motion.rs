use crate::math::{Vector3, TOLERANCE};

use super::{PerspectiveCamera, RayCaster};

/// Keys that drive camera motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

/// Damped keyboard fly-through integrated once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraMotion {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    /// `x` = strafe, `z` = dolly, in the camera's horizontal frame.
    velocity: Vector3,
}

impl CameraMotion {
    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    /// Releases every key and stops the camera.
    pub fn halt(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn velocity(&self) -> &Vector3 {
        &self.velocity
    }

    /// Advances the motion by `dt` seconds and moves the camera.
    pub fn integrate(&mut self, camera: &mut PerspectiveCamera, dt: f64, speed: f64, damping: f64) {
        self.velocity.x -= self.velocity.x * damping * dt;
        self.velocity.z -= self.velocity.z * damping * dt;

        let mut input = Vector3::new(
            f64::from(u8::from(self.right)) - f64::from(u8::from(self.left)),
            0.0,
            f64::from(u8::from(self.forward)) - f64::from(u8::from(self.backward)),
        );
        if input.norm() > TOLERANCE {
            input.normalize_mut();
        }
        if self.forward || self.backward {
            self.velocity.z -= input.z * speed * dt;
        }
        if self.left || self.right {
            self.velocity.x -= input.x * speed * dt;
        }

        let mut forward = camera.view_direction();
        forward.y = 0.0;
        if forward.norm() < TOLERANCE {
            return;
        }
        forward.normalize_mut();
        let right = forward.cross(&camera.up);
        if right.norm() < TOLERANCE {
            return;
        }
        let right = right.normalize();

        let offset = forward * (-self.velocity.z * dt) + right * (-self.velocity.x * dt);
        camera.translate(&offset);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera {
            position: Point3::new(0.0, 2.0, 5.0),
            target: Point3::new(0.0, 2.0, 0.0),
            ..PerspectiveCamera::default()
        }
    }

    #[test]
    fn forward_key_moves_towards_view() {
        let mut cam = camera();
        let mut motion = CameraMotion::default();
        motion.set_key(MoveKey::Forward, true);
        for _ in 0..10 {
            motion.integrate(&mut cam, 1.0 / 60.0, 30.0, 10.0);
        }
        assert!(cam.position.z < 5.0);
        assert!((cam.position.y - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn right_key_strafes_right() {
        let mut cam = camera();
        let mut motion = CameraMotion::default();
        motion.set_key(MoveKey::Right, true);
        for _ in 0..10 {
            motion.integrate(&mut cam, 1.0 / 60.0, 30.0, 10.0);
        }
        assert!(cam.position.x > 0.0);
    }

    #[test]
    fn velocity_decays_after_release() {
        let mut cam = camera();
        let mut motion = CameraMotion::default();
        motion.set_key(MoveKey::Backward, true);
        motion.integrate(&mut cam, 0.05, 30.0, 10.0);
        motion.set_key(MoveKey::Backward, false);
        let before = motion.velocity().norm();
        motion.integrate(&mut cam, 0.05, 30.0, 10.0);
        assert!(motion.velocity().norm() < before);
    }

    #[test]
    fn idle_camera_stays_put() {
        let mut cam = camera();
        let mut motion = CameraMotion::default();
        motion.integrate(&mut cam, 0.1, 30.0, 10.0);
        assert_eq!(cam, camera());
    }
}
