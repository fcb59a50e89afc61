use crate::models::Item;
use crate::registry::{Facet, FacetValue};

/// Rendering boundary of the engine.
///
/// The engine walks its state and hands each node to the renderer; how a
/// node turns into markup (HTML, terminal lines, widgets) is up to the
/// implementation.
pub trait Renderer {
    /// Called once per facet group, before its values
    fn render_facet(&mut self, _facet: &Facet) {}

    fn render_facet_value(&mut self, facet: &Facet, value: &FacetValue);

    fn render_item(&mut self, item: &Item);
}
