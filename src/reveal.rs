use crate::surface::Surface;

const ACTIVE: &str = "active";

/// Flips the `active` class of observed nodes as they enter or leave the viewport.
pub struct RevealController<S: Surface> {
    surface: S,
}

impl<S: Surface> RevealController<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn targets(&self, selector: &str) -> Vec<S::Node> {
        self.surface.query_all(selector)
    }

    pub fn update(&self, node: &S::Node, intersecting: bool) {
        self.surface.set_class(node, ACTIVE, intersecting);
    }
}
