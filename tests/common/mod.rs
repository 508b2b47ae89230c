#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use portfolio_wasm::modal::Scheduler;
use portfolio_wasm::surface::Surface;

#[derive(Debug, Default)]
pub struct FakeNode {
    pub tag: String,
    pub id: Option<String>,
    pub parent: Option<usize>,
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub style: HashMap<String, String>,
    pub computed: HashMap<String, f64>,
    pub html: String,
}

#[derive(Debug, Default)]
pub struct Tree {
    pub nodes: Vec<FakeNode>,
    pub scrollbar: f64,
    pub flushes: usize,
    /// Every mutation, for "nothing happened" checks.
    pub writes: usize,
    /// Class changes and layout flushes in the order they happened.
    pub events: Vec<String>,
}

/// In-memory presentation tree. Nodes are indices.
#[derive(Clone, Debug, Default)]
pub struct FakeSurface(pub Rc<RefCell<Tree>>);

impl FakeSurface {
    pub fn add(&self, tag: &str, id: Option<&str>, parent: Option<usize>) -> usize {
        let mut tree = self.0.borrow_mut();
        tree.nodes.push(FakeNode {
            tag: tag.into(),
            id: id.map(Into::into),
            parent,
            ..Default::default()
        });
        tree.nodes.len() - 1
    }

    pub fn node<T>(&self, node: usize, read: impl FnOnce(&FakeNode) -> T) -> T {
        read(&self.0.borrow().nodes[node])
    }

    pub fn edit(&self, node: usize, write: impl FnOnce(&mut FakeNode)) {
        write(&mut self.0.borrow_mut().nodes[node]);
    }

    pub fn html(&self, node: usize) -> String {
        self.node(node, |n| n.html.clone())
    }

    pub fn inline(&self, node: usize, property: &str) -> Option<String> {
        self.node(node, |n| n.style.get(property).cloned())
    }

    pub fn classes(&self, node: usize) -> Vec<String> {
        self.node(node, |n| n.classes.iter().cloned().collect())
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().events.clone()
    }

    /// Index of the first recorded event equal to `event`.
    pub fn event_index(&self, event: &str) -> Option<usize> {
        self.0.borrow().events.iter().position(|e| e == event)
    }

    fn matches(node: &FakeNode, selector: &str) -> bool {
        match selector.strip_prefix('.') {
            Some(class) => node.classes.contains(class),
            None => match selector.strip_prefix('#') {
                Some(id) => node.id.as_deref() == Some(id),
                None => node.tag == selector,
            },
        }
    }
}

impl Surface for FakeSurface {
    type Node = usize;

    fn by_id(&self, id: &str) -> Option<usize> {
        let tree = self.0.borrow();
        tree.nodes.iter().position(|n| n.id.as_deref() == Some(id))
    }

    fn query(&self, selector: &str) -> Option<usize> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        let tree = self.0.borrow();
        (0..tree.nodes.len())
            .filter(|&i| Self::matches(&tree.nodes[i], selector))
            .collect()
    }

    fn body(&self) -> Option<usize> {
        self.query("body")
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.node(*node, |n| n.attributes.get(name).cloned())
    }

    fn within(&self, node: &usize, selector: &str) -> bool {
        let tree = self.0.borrow();
        let mut current = Some(*node);
        while let Some(i) = current {
            if Self::matches(&tree.nodes[i], selector) {
                return true;
            }
            current = tree.nodes[i].parent;
        }
        false
    }

    fn has_class(&self, node: &usize, class: &str) -> bool {
        self.node(*node, |n| n.classes.contains(class))
    }

    fn set_class(&self, node: &usize, class: &str, on: bool) {
        let mut tree = self.0.borrow_mut();
        let classes = &mut tree.nodes[*node].classes;
        let changed = if on {
            classes.insert(class.to_owned())
        } else {
            classes.remove(class)
        };
        if changed {
            tree.writes += 1;
            let sign = if on { '+' } else { '-' };
            tree.events.push(format!("{node}:{sign}{class}"));
        }
    }

    fn replace_content(&self, node: &usize, html: &str) {
        let mut tree = self.0.borrow_mut();
        tree.nodes[*node].html = html.to_owned();
        tree.writes += 1;
    }

    fn style(&self, node: &usize, property: &str) -> String {
        self.inline(*node, property).unwrap_or_default()
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        let mut tree = self.0.borrow_mut();
        let style = &mut tree.nodes[*node].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_owned(), value.to_owned());
        }
        tree.writes += 1;
    }

    fn computed_px(&self, node: &usize, property: &str) -> f64 {
        self.node(*node, |n| {
            n.style
                .get(property)
                .and_then(|v| v.trim_end_matches("px").parse().ok())
                .or_else(|| n.computed.get(property).copied())
                .unwrap_or(0.0)
        })
    }

    fn scrollbar_width(&self) -> f64 {
        self.0.borrow().scrollbar
    }

    fn flush_layout(&self, node: &usize) {
        let mut tree = self.0.borrow_mut();
        tree.flushes += 1;
        tree.events.push(format!("{node}:flush"));
    }
}

struct Slot {
    delay: Duration,
    cancelled: Rc<Cell<bool>>,
    callback: Box<dyn FnOnce()>,
}

/// Timers that only fire when the test says so.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Vec<Slot>>>,
}

pub struct ManualTask(Rc<Cell<bool>>);

impl Drop for ManualTask {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.queue
            .borrow()
            .iter()
            .filter(|slot| !slot.cancelled.get())
            .count()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.queue.borrow().iter().map(|slot| slot.delay).collect()
    }

    /// Fire every live timer; returns how many ran.
    pub fn fire_all(&self) -> usize {
        let slots: Vec<Slot> = self.queue.borrow_mut().drain(..).collect();
        let mut fired = 0;
        for slot in slots {
            if !slot.cancelled.get() {
                (slot.callback)();
                fired += 1;
            }
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    type Task = ManualTask;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> ManualTask {
        let cancelled = Rc::new(Cell::new(false));
        self.queue.borrow_mut().push(Slot {
            delay,
            cancelled: Rc::clone(&cancelled),
            callback,
        });
        ManualTask(cancelled)
    }
}

/// Node handles of the standard page fixture.
pub struct Fixture {
    pub surface: FakeSurface,
    pub body: usize,
    pub nav: usize,
    pub modal: usize,
    pub content: usize,
    pub close_button: usize,
    pub cards: Vec<usize>,
    pub card_link: usize,
    pub card_heading: usize,
    pub card_link_icon: usize,
    pub reveals: Vec<usize>,
}

impl Fixture {
    pub fn new() -> Self {
        let surface = FakeSurface::default();
        surface.0.borrow_mut().scrollbar = 15.0;

        let body = surface.add("body", None, None);
        let nav = surface.add("nav", None, Some(body));
        surface.edit(nav, |n| {
            n.computed.insert("padding-right".into(), 32.0);
        });

        let mut cards = Vec::new();
        for id in ["raymarching", "vinci-ecodrive", "fire-detection", "nope"] {
            let card = surface.add("div", None, Some(body));
            surface.edit(card, |n| {
                n.classes.insert("project-card".into());
                n.classes.insert("reveal".into());
                n.attributes.insert("data-project".into(), id.into());
            });
            cards.push(card);
        }
        let card_heading = surface.add("h3", None, Some(cards[2]));
        let card_link = surface.add("a", None, Some(cards[2]));
        let card_link_icon = surface.add("i", None, Some(card_link));

        let modal = surface.add("div", Some("project-modal"), Some(body));
        let panel = surface.add("div", None, Some(modal));
        let close_button = surface.add("button", Some("close-modal"), Some(panel));
        let content = surface.add("div", Some("modal-project-content"), Some(panel));

        let about = surface.add("section", None, Some(body));
        surface.edit(about, |n| {
            n.classes.insert("reveal".into());
        });
        let mut reveals = cards.clone();
        reveals.insert(0, about);

        Self {
            surface,
            body,
            nav,
            modal,
            content,
            close_button,
            cards,
            card_link,
            card_heading,
            card_link_icon,
            reveals,
        }
    }
}
