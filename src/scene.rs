//! Background scene: per-frame motion, camera and the renderer seam.

use std::f32::consts::TAU;
use std::rc::Rc;

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::config::{CameraConfig, MotionConfig, SceneConfig};
use crate::pointer::PointerTracker;

/// Rotations of the two decorative objects, as Euler angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub sphere: Vec3,
    pub particles: Vec3,
}

impl Motion {
    /// Advance one frame towards the pointer.
    pub fn step(&mut self, pointer: Vec2, config: &MotionConfig) {
        let target = pointer * config.follow_gain;
        self.sphere.y += config.smoothing * (target.x - self.sphere.y);
        self.sphere.x += config.smoothing * (target.y - self.sphere.x);
        self.sphere.z = (self.sphere.z + config.drift).rem_euclid(TAU);

        self.particles.y = -pointer.x * config.parallax_gain;
        self.particles.x = -pointer.y * config.parallax_gain;
    }
}

fn rotation(euler: Vec3) -> Mat4 {
    Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z))
}

#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,
    aspect: f32,
}

impl Camera {
    pub fn new(config: CameraConfig, width: f32, height: f32) -> Self {
        let mut camera = Self { config, aspect: 1.0 };
        camera.set_viewport(width, height);
        camera
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.config.distance))
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_y_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }
}

/// One frame's worth of transforms handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub view: Mat4,
    pub projection: Mat4,
    pub sphere_model: Mat4,
    pub particles_model: Mat4,
}

/// Whatever actually draws the scene.
pub trait Renderer {
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, frame: &Frame);
}

pub struct SceneDriver<R: Renderer> {
    renderer: R,
    camera: Camera,
    motion: Motion,
    config: MotionConfig,
    pointer: Rc<PointerTracker>,
}

impl<R: Renderer> SceneDriver<R> {
    pub fn new(
        mut renderer: R,
        config: &SceneConfig,
        pointer: Rc<PointerTracker>,
        width: u32,
        height: u32,
    ) -> Self {
        renderer.resize(width, height);
        Self {
            renderer,
            camera: Camera::new(config.camera.clone(), width as f32, height as f32),
            motion: Motion::default(),
            config: config.motion.clone(),
            pointer,
        }
    }

    pub fn frame(&mut self) {
        self.motion.step(self.pointer.offset(), &self.config);
        let frame = Frame {
            view: self.camera.view(),
            projection: self.camera.projection(),
            sphere_model: rotation(self.motion.sphere),
            particles_model: rotation(self.motion.particles),
        };
        self.renderer.render(&frame);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width as f32, height as f32);
        self.renderer.resize(width, height);
        log::debug!("scene resized to {width}x{height}");
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_pointer_settles_to_zero() {
        let config = MotionConfig::default();
        let mut motion = Motion {
            sphere: Vec3::new(0.4, -0.3, 0.0),
            particles: Vec3::ONE,
        };
        let mut last = (motion.sphere.x.abs(), motion.sphere.y.abs());
        for _ in 0..20 {
            motion.step(Vec2::ZERO, &config);
            let now = (motion.sphere.x.abs(), motion.sphere.y.abs());
            assert!(now.0 < last.0 && now.1 < last.1);
            last = now;
        }
        assert!(last.0 < 1e-6 && last.1 < 1e-6);
        assert_eq!(motion.particles.x, 0.0);
        assert_eq!(motion.particles.y, 0.0);
    }

    #[test]
    fn follows_pointer_with_damping() {
        let config = MotionConfig::default();
        let mut motion = Motion::default();
        motion.step(Vec2::new(200.0, -100.0), &config);
        assert!((motion.sphere.y - 0.1).abs() < 1e-6);
        assert!((motion.sphere.x + 0.05).abs() < 1e-6);
        assert!((motion.particles.y + 0.04).abs() < 1e-6);
        assert!((motion.particles.x - 0.02).abs() < 1e-6);
    }

    #[test]
    fn drift_wraps_at_full_turn() {
        let config = MotionConfig::default();
        let mut motion = Motion::default();
        let frames = 10_000;
        for _ in 0..frames {
            motion.step(Vec2::ZERO, &config);
        }
        assert!((0.0..TAU).contains(&motion.sphere.z));
        let expected = (frames as f32 * config.drift).rem_euclid(TAU);
        assert!((motion.sphere.z - expected).abs() < 1e-2);
    }
}
