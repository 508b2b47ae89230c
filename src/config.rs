//! Page tunables. Everything the page reads as a magic number lives here.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Pointer offset → sphere rotation target.
    pub follow_gain: f32,
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f32,
    /// Constant spin around z, radians per frame.
    pub drift: f32,
    /// Pointer offset → particle cloud rotation (applied with inverted sign).
    pub parallax_gain: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            follow_gain: 0.001,
            smoothing: 0.5,
            drift: 0.002,
            parallax_gain: 0.0002,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LookConfig {
    pub sphere_radius: f32,
    pub sphere_color: [f32; 4],
    pub particle_count: usize,
    pub particle_spread: f32,
    pub particle_size: f32,
    pub particle_color: [f32; 4],
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 2.0,
            // #ff4d29
            sphere_color: [1.0, 77.0 / 255.0, 41.0 / 255.0, 0.3],
            particle_count: 700,
            particle_spread: 15.0,
            particle_size: 0.02,
            particle_color: [1.0, 1.0, 1.0, 0.5],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneConfig {
    pub motion: MotionConfig,
    pub camera: CameraConfig,
    pub look: LookConfig,
}

/// Markup contract the page script expects to find.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub mount_id: &'static str,
    pub modal_id: &'static str,
    pub content_id: &'static str,
    pub close_id: &'static str,
    pub nav_selector: &'static str,
    pub card_selector: &'static str,
    pub card_attribute: &'static str,
    pub reveal_selector: &'static str,
    pub reveal_threshold: f64,
    pub close_delay: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            mount_id: "canvas-container",
            modal_id: "project-modal",
            content_id: "modal-project-content",
            close_id: "close-modal",
            nav_selector: "nav",
            card_selector: ".project-card",
            card_attribute: "data-project",
            reveal_selector: ".reveal",
            reveal_threshold: 0.1,
            close_delay: Duration::from_millis(300),
        }
    }
}
