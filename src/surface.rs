/// The presentation tree as seen by the page logic.
///
/// Style values are CSS strings; setting an empty string removes the inline
/// property.
pub trait Surface {
    type Node: Clone + PartialEq;

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    /// Whether `node` or one of its ancestors matches `selector`.
    fn within(&self, node: &Self::Node, selector: &str) -> bool;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn set_class(&self, node: &Self::Node, class: &str, on: bool);

    fn replace_content(&self, node: &Self::Node, html: &str);

    fn style(&self, node: &Self::Node, property: &str) -> String;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Resolved pixel value of a length property, 0 when it does not parse.
    fn computed_px(&self, node: &Self::Node, property: &str) -> f64;

    /// Viewport width minus document content width.
    fn scrollbar_width(&self) -> f64;
    /// Force the host to commit pending style changes on `node`.
    fn flush_layout(&self, node: &Self::Node);
}
