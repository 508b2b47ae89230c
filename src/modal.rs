//! Project-detail dialog.
//!
//! Lifecycle is `Closed -> Opening -> Open -> Closing -> Closed`. Opening and
//! the switch to `Open` happen in one call; `Closing -> Closed` runs from a
//! scheduled task so the fade-out can play.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::PageConfig;
use crate::error::PageError;
use crate::fragment;
use crate::surface::Surface;

const VISIBLE: &str = "visible";
const ACTIVE: &str = "active";
const CLOSING: &str = "closing";

const OVERFLOW: &str = "overflow";
const PADDING_RIGHT: &str = "padding-right";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Nodes the dialog touches, located once at startup.
#[derive(Clone, Debug)]
pub struct ModalElements<N> {
    pub modal: N,
    pub content: N,
    pub close_button: N,
    pub body: N,
    pub nav: Option<N>,
}

impl<N: Clone + PartialEq> ModalElements<N> {
    pub fn locate<S: Surface<Node = N>>(
        surface: &S,
        config: &PageConfig,
    ) -> Result<Self, PageError> {
        let by_id = |id: &str| {
            surface
                .by_id(id)
                .ok_or_else(|| PageError::MissingElement(format!("#{id}")))
        };
        Ok(Self {
            modal: by_id(config.modal_id)?,
            content: by_id(config.content_id)?,
            close_button: by_id(config.close_id)?,
            body: surface
                .body()
                .ok_or_else(|| PageError::MissingElement("body".into()))?,
            nav: surface.query(config.nav_selector),
        })
    }
}

/// Inline styles as they were before the dialog opened.
#[derive(Clone, Debug, PartialEq)]
struct SavedStyles {
    body_overflow: String,
    body_padding: String,
    nav_padding: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalSession {
    pub project_id: String,
    pub scrollbar_width: f64,
    pub state: ModalState,
    saved: SavedStyles,
}

pub struct ModalController<S: Surface> {
    surface: S,
    catalog: Rc<Catalog>,
    elements: ModalElements<S::Node>,
    session: Option<ModalSession>,
}

impl<S: Surface> ModalController<S> {
    pub fn new(surface: S, catalog: Rc<Catalog>, elements: ModalElements<S::Node>) -> Self {
        Self {
            surface,
            catalog,
            elements,
            session: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.session
            .as_ref()
            .map_or(ModalState::Closed, |session| session.state)
    }

    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn elements(&self) -> &ModalElements<S::Node> {
        &self.elements
    }

    /// Whether `open(id)` would start a new session.
    pub fn can_open(&self, id: &str) -> bool {
        self.catalog.contains(id)
            && matches!(self.state(), ModalState::Closed | ModalState::Closing)
    }

    pub fn is_active(&self) -> bool {
        self.surface.has_class(&self.elements.modal, ACTIVE)
    }

    /// Show the dialog for `id`. Unknown ids and an already open dialog are ignored.
    ///
    /// A close still in flight is completed first.
    pub fn open(&mut self, id: &str) -> bool {
        let catalog = Rc::clone(&self.catalog);
        let Some(entry) = catalog.get(id) else {
            log::debug!("ignoring unknown project `{id}`");
            return false;
        };
        match self.state() {
            ModalState::Closed => {}
            ModalState::Closing => {
                self.finish_close();
            }
            ModalState::Opening | ModalState::Open => {
                log::debug!("dialog already open, ignoring `{id}`");
                return false;
            }
        }

        let surface = &self.surface;
        let ModalElements {
            modal,
            content,
            body,
            nav,
            ..
        } = &self.elements;

        let scrollbar_width = surface.scrollbar_width().max(0.0);
        let saved = SavedStyles {
            body_overflow: surface.style(body, OVERFLOW),
            body_padding: surface.style(body, PADDING_RIGHT),
            nav_padding: nav.as_ref().map(|nav| surface.style(nav, PADDING_RIGHT)),
        };
        let nav_base = nav
            .as_ref()
            .map(|nav| surface.computed_px(nav, PADDING_RIGHT));

        surface.replace_content(content, &fragment::render(entry));
        self.session = Some(ModalSession {
            project_id: id.to_owned(),
            scrollbar_width,
            state: ModalState::Opening,
            saved,
        });

        surface.set_class(modal, VISIBLE, true);
        // Commit the pre-active style so the transition has a start point.
        surface.flush_layout(modal);
        surface.set_class(modal, ACTIVE, true);

        surface.set_style(body, PADDING_RIGHT, &px(scrollbar_width));
        if let (Some(nav), Some(base)) = (nav, nav_base) {
            surface.set_style(nav, PADDING_RIGHT, &px(base + scrollbar_width));
        }
        surface.set_style(body, OVERFLOW, "hidden");

        if let Some(session) = self.session.as_mut() {
            session.state = ModalState::Open;
        }
        log::debug!("opened project `{id}` (scrollbar {scrollbar_width}px)");
        true
    }

    /// Start the fade-out. Returns false when the dialog is not open.
    pub fn begin_close(&mut self) -> bool {
        if !self.is_active() || self.state() != ModalState::Open {
            return false;
        }
        self.surface.set_class(&self.elements.modal, ACTIVE, false);
        self.surface.set_class(&self.elements.content, CLOSING, true);
        if let Some(session) = self.session.as_mut() {
            session.state = ModalState::Closing;
        }
        true
    }

    /// Tear the session down. Only acts while `Closing`.
    pub fn finish_close(&mut self) -> bool {
        let Some(session) = self.session.take_if(|s| s.state == ModalState::Closing) else {
            return false;
        };
        let surface = &self.surface;
        let ModalElements {
            modal,
            content,
            body,
            nav,
            ..
        } = &self.elements;

        surface.set_class(content, CLOSING, false);
        surface.set_class(modal, VISIBLE, false);
        surface.set_style(body, OVERFLOW, &session.saved.body_overflow);
        surface.set_style(body, PADDING_RIGHT, &session.saved.body_padding);
        if let (Some(nav), Some(padding)) = (nav, &session.saved.nav_padding) {
            surface.set_style(nav, PADDING_RIGHT, padding);
        }
        surface.replace_content(content, "");
        log::debug!("closed project `{}`", session.project_id);
        true
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Runs a callback later. Dropping the returned task cancels it.
pub trait Scheduler {
    type Task;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Task;
}

/// The dialog plus its close timer, driven by page events.
pub struct Modal<S: Surface, K: Scheduler> {
    controller: Rc<RefCell<ModalController<S>>>,
    scheduler: K,
    close_delay: Duration,
    pending_close: RefCell<Option<K::Task>>,
}

impl<S: Surface + 'static, K: Scheduler> Modal<S, K> {
    pub fn new(controller: ModalController<S>, scheduler: K, close_delay: Duration) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            scheduler,
            close_delay,
            pending_close: RefCell::new(None),
        }
    }

    pub fn controller(&self) -> &Rc<RefCell<ModalController<S>>> {
        &self.controller
    }

    pub fn state(&self) -> ModalState {
        self.controller.borrow().state()
    }

    pub fn open(&self, id: &str) -> bool {
        let mut controller = self.controller.borrow_mut();
        if controller.can_open(id) {
            // Cancel, then let `open` finish the interrupted close itself.
            self.pending_close.borrow_mut().take();
        }
        controller.open(id)
    }

    pub fn close(&self) -> bool {
        if !self.controller.borrow_mut().begin_close() {
            return false;
        }
        let controller = Rc::downgrade(&self.controller);
        let task = self.scheduler.schedule(
            self.close_delay,
            Box::new(move || {
                if let Some(controller) = controller.upgrade() {
                    controller.borrow_mut().finish_close();
                }
            }),
        );
        *self.pending_close.borrow_mut() = Some(task);
        true
    }

    /// Card click. Clicks on links inside the card are left alone.
    pub fn on_card_click(&self, card: &S::Node, target: &S::Node, attribute: &str) -> bool {
        let id = {
            let controller = self.controller.borrow();
            let surface = controller.surface();
            if surface.within(target, "a") {
                return false;
            }
            surface.attribute(card, attribute)
        };
        match id {
            Some(id) => self.open(&id),
            None => false,
        }
    }

    /// Click on the dialog container; only the backdrop itself closes it.
    pub fn on_backdrop_click(&self, target: &S::Node) -> bool {
        let on_backdrop = *target == self.controller.borrow().elements().modal;
        on_backdrop && self.close()
    }

    pub fn on_key(&self, key: &str) -> bool {
        if key != "Escape" {
            return false;
        }
        let active = self.controller.borrow().is_active();
        active && self.close()
    }
}
