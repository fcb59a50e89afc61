use facetsearch_core::{Facet, FacetValue, Item, Renderer};

use super::formatting::{format_facet_header, format_facet_value, format_item};

/// Renders engine state as indented terminal lines
pub struct TerminalRenderer<'a> {
    facets: &'a [Facet],
    indent: usize,
    lines: Vec<String>,
}

impl<'a> TerminalRenderer<'a> {
    /// `facets` is used to describe items, in the registry's facet order
    pub fn new(facets: &'a [Facet]) -> Self {
        Self {
            facets,
            indent: 0,
            lines: Vec::new(),
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn push_line(&mut self, line: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", "  ".repeat(self.indent), line.as_ref()));
    }

    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn render_facet(&mut self, facet: &Facet) {
        self.push_line(format_facet_header(facet));
    }

    fn render_facet_value(&mut self, _facet: &Facet, value: &FacetValue) {
        self.push_line(format!("  {}", format_facet_value(value)));
    }

    fn render_item(&mut self, item: &Item) {
        let line = format_item(item, self.facets);
        self.push_line(line);
    }
}
