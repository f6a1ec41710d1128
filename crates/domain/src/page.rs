//! Page view model: the rendered state of every display cell.
//!
//! A cell is addressed by its element id (`get-exposure`, `fr1-decoder`, …).
//! Renderers only ever replace whole cells; nothing is merged.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::indicator::Indicator;
use crate::time::Timestamp;

/// Content of a single display cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Indicator(Indicator),
}

impl Cell {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text content, or `""` for empty and indicator cells.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Empty | Self::Indicator(_) => "",
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// HTML fragment for this cell. Text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => escape_html(text),
            Self::Indicator(indicator) => indicator.markup(),
        }
    }
}

/// Every rendered cell, keyed by element id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    cells: BTreeMap<String, Cell>,
    updated_at: Option<Timestamp>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content of `id`.
    pub fn set(&mut self, id: impl Into<String>, cell: Cell) {
        self.cells.insert(id.into(), cell);
    }

    pub fn set_text(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.set(id, Cell::text(text));
    }

    pub fn set_indicator(&mut self, id: impl Into<String>, indicator: Indicator) {
        self.set(id, Cell::Indicator(indicator));
    }

    /// Clear `id` to an empty cell.
    pub fn clear(&mut self, id: impl Into<String>) {
        self.set(id, Cell::Empty);
    }

    /// Drop `id` from the page entirely.
    pub fn remove(&mut self, id: &str) -> Option<Cell> {
        self.cells.remove(id)
    }

    /// Cell for `id`, if it was ever rendered.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Text of `id`; `""` when unrendered, empty, or an indicator.
    #[must_use]
    pub fn text(&self, id: &str) -> &str {
        self.get(id).map_or("", Cell::as_text)
    }

    /// Indicator of `id`, if the cell holds one.
    #[must_use]
    pub fn indicator(&self, id: &str) -> Option<Indicator> {
        match self.get(id) {
            Some(Cell::Indicator(indicator)) => Some(*indicator),
            _ => None,
        }
    }

    /// HTML for `id`; `""` when unrendered.
    #[must_use]
    pub fn html(&self, id: &str) -> String {
        self.get(id).map(Cell::to_html).unwrap_or_default()
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(id, cell)| (id.as_str(), cell))
    }

    /// Record when a response was last applied.
    pub fn touch(&mut self, at: Timestamp) {
        self.updated_at = Some(at);
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
