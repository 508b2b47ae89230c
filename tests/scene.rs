use std::rc::Rc;

use glam::Vec3;
use portfolio_wasm::config::SceneConfig;
use portfolio_wasm::pointer::PointerTracker;
use portfolio_wasm::scene::{Camera, Frame, Renderer, SceneDriver};

#[derive(Default)]
struct Recording {
    sizes: Vec<(u32, u32)>,
    frames: Vec<Frame>,
}

impl Renderer for Recording {
    fn resize(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }

    fn render(&mut self, frame: &Frame) {
        self.frames.push(*frame);
    }
}

fn driver(pointer: Rc<PointerTracker>) -> SceneDriver<Recording> {
    SceneDriver::new(Recording::default(), &SceneConfig::default(), pointer, 1920, 1080)
}

#[test]
fn one_render_per_frame() {
    let pointer = Rc::new(PointerTracker::new(1920.0, 1080.0));
    let mut scene = driver(pointer);
    for _ in 0..5 {
        scene.frame();
    }
    assert_eq!(scene.renderer().frames.len(), 5);
    assert_eq!(scene.renderer().sizes, vec![(1920, 1080)]);
}

#[test]
fn resize_updates_camera_and_surface() {
    let pointer = Rc::new(PointerTracker::new(1920.0, 1080.0));
    let mut scene = driver(pointer);
    assert!((scene.camera().aspect() - 1920.0 / 1080.0).abs() < 1e-6);

    scene.resize(1080, 1920);
    assert!((scene.camera().aspect() - 1080.0 / 1920.0).abs() < 1e-6);
    assert_eq!(scene.renderer().sizes.last(), Some(&(1080, 1920)));

    scene.frame();
    let frame = scene.renderer().frames[0];
    assert_eq!(frame.projection, scene.camera().projection());
}

#[test]
fn degenerate_viewport_keeps_previous_aspect() {
    let mut camera = Camera::new(Default::default(), 800.0, 400.0);
    camera.set_viewport(0.0, 400.0);
    assert_eq!(camera.aspect(), 2.0);
}

#[test]
fn pointer_at_centre_settles_sphere() {
    let pointer = Rc::new(PointerTracker::new(1920.0, 1080.0));
    let mut scene = driver(Rc::clone(&pointer));

    pointer.on_move(1920.0, 0.0);
    for _ in 0..10 {
        scene.frame();
    }
    let tilted = scene.motion().sphere;
    assert!(tilted.y > 0.9 && tilted.x < -0.5);
    assert!((scene.motion().particles.y + 960.0 * 0.0002).abs() < 1e-6);

    pointer.on_move(960.0, 540.0);
    let mut last = tilted;
    for _ in 0..30 {
        scene.frame();
        let now = scene.motion().sphere;
        assert!(now.x.abs() < last.x.abs());
        assert!(now.y.abs() < last.y.abs());
        assert!(now.z > last.z);
        last = now;
    }
    assert_eq!(scene.motion().particles.x, 0.0);
    assert_eq!(scene.motion().particles.y, 0.0);
}

#[test]
fn camera_sits_in_front_of_origin() {
    let camera = Camera::new(Default::default(), 1.0, 1.0);
    let origin = camera.view().transform_point3(Vec3::ZERO);
    assert_eq!(origin, Vec3::new(0.0, 0.0, -5.0));
    let clip = camera.projection() * origin.extend(1.0);
    assert!(clip.w > 0.0 && (clip.z / clip.w).abs() < 1.0);
}
