use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Element, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, MouseEvent,
};

use super::dom::DomSurface;
use super::render::{self, js_error, GlRenderer};
use crate::catalog::Catalog;
use crate::config::{PageConfig, SceneConfig};
use crate::error::PageError;
use crate::modal::{Modal, ModalController, ModalElements, Scheduler};
use crate::pointer::PointerTracker;
use crate::reveal::RevealController;
use crate::scene::SceneDriver;
use crate::surface::Surface;

/// Browser timers; dropping the `Timeout` clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Task = Timeout;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback)
    }
}

type PageModal = Modal<DomSurface, GlooScheduler>;

/// Everything wired onto the document. Dropping it unsubscribes the listeners
/// and disconnects the reveal observer; the render loop keeps running.
pub struct Page {
    _listeners: Vec<EventListener>,
    _reveal: Option<RevealObserver>,
    modal: Option<Rc<PageModal>>,
}

impl Page {
    pub fn mount(config: PageConfig, scene: SceneConfig) -> Result<Self, JsValue> {
        let surface = DomSurface::new()?;
        let mut listeners = Vec::new();

        let (width, height) = surface.viewport_size();
        let pointer = Rc::new(PointerTracker::new(width as f32, height as f32));
        listeners.push({
            let pointer = Rc::clone(&pointer);
            EventListener::new(surface.document(), "mousemove", move |event: &Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    pointer.on_move(event.client_x() as f32, event.client_y() as f32);
                }
            })
        });

        match start_scene(&surface, &config, &scene, pointer) {
            Ok(resize) => listeners.push(resize),
            Err(err) => log::error!("background scene disabled: {err}"),
        }

        let reveal = RevealObserver::observe(surface.clone(), &config)
            .map_err(|err| log::error!("scroll reveal disabled: {err}"))
            .ok();

        let modal = Catalog::builtin()
            .map_err(PageError::from)
            .and_then(|catalog| wire_modal(&surface, &config, catalog, &mut listeners))
            .map_err(|err| log::error!("project dialog disabled: {err}"))
            .ok();

        log::info!("portfolio page ready ({} listeners)", listeners.len());
        Ok(Self {
            _listeners: listeners,
            _reveal: reveal,
            modal,
        })
    }

    pub fn modal(&self) -> Option<&Rc<PageModal>> {
        self.modal.as_ref()
    }
}

fn start_scene(
    surface: &DomSurface,
    config: &PageConfig,
    scene: &SceneConfig,
    pointer: Rc<PointerTracker>,
) -> Result<EventListener, PageError> {
    let canvas = render::mount(surface.document(), config.mount_id)?;
    let renderer = GlRenderer::new(canvas, &scene.look).map_err(js_error)?;
    let (width, height) = surface.viewport_size();
    let driver = Rc::new(RefCell::new(SceneDriver::new(
        renderer,
        scene,
        pointer,
        width as u32,
        height as u32,
    )));
    render::start(Rc::clone(&driver)).map_err(js_error)?;

    let viewport = surface.clone();
    Ok(EventListener::new(surface.window(), "resize", move |_| {
        let (width, height) = viewport.viewport_size();
        driver.borrow_mut().resize(width as u32, height as u32);
    }))
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn wire_modal(
    surface: &DomSurface,
    config: &PageConfig,
    catalog: Catalog,
    listeners: &mut Vec<EventListener>,
) -> Result<Rc<PageModal>, PageError> {
    let elements = ModalElements::locate(surface, config)?;
    let close_button = elements.close_button.clone();
    let backdrop = elements.modal.clone();
    let controller = ModalController::new(surface.clone(), Rc::new(catalog), elements);
    let modal = Rc::new(Modal::new(controller, GlooScheduler, config.close_delay));

    let cards = surface.query_all(config.card_selector);
    log::debug!("wiring {} project cards", cards.len());
    for card in cards {
        let modal = Rc::clone(&modal);
        let attribute = config.card_attribute;
        let node = card.clone();
        listeners.push(EventListener::new(&card, "click", move |event: &Event| {
            if let Some(target) = event_element(event) {
                modal.on_card_click(&node, &target, attribute);
            }
        }));
    }

    listeners.push({
        let modal = Rc::clone(&modal);
        EventListener::new(&close_button, "click", move |_| {
            modal.close();
        })
    });
    listeners.push({
        let modal = Rc::clone(&modal);
        EventListener::new(&backdrop, "click", move |event: &Event| {
            if let Some(target) = event_element(event) {
                modal.on_backdrop_click(&target);
            }
        })
    });
    listeners.push({
        let modal = Rc::clone(&modal);
        EventListener::new(surface.document(), "keydown", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                modal.on_key(&event.key());
            }
        })
    });

    Ok(modal)
}

type RevealCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// IntersectionObserver feeding the reveal controller.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: RevealCallback,
}

impl RevealObserver {
    pub fn observe(surface: DomSurface, config: &PageConfig) -> Result<Self, PageError> {
        let controller = RevealController::new(surface);
        let targets = controller.targets(config.reveal_selector);

        let callback: RevealCallback =
            Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    controller.update(&entry.target(), entry.is_intersecting());
                }
            });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(js_error)?;
        for target in &targets {
            observer.observe(target);
        }
        log::debug!("observing {} reveal targets", targets.len());

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
