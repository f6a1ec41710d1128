//! Unit tables: one row per frame receiver / frame processor.
//!
//! Rows are addressed purely by position: the unit at 1-based position `i`
//! renders into row `"<prefix><i>"`, whose cells are `"<row>-<column>"`.
//! Every tick renders a full, fixed-size table so that rows beyond a
//! shrunk unit list are cleared instead of left stale. Rows past the
//! fixed size that a longer list once needed are dropped.

use crate::indicator::Indicator;
use crate::page::{Cell, Page};
use crate::status::{ProcessorDetail, ReceiverDetail, UnitStatus};

/// Column holding the connection indicator of every row.
pub const CONNECTED_COLUMN: &str = "connected";

/// Which pipeline node a table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Frame receiver (`fr`).
    Receiver,
    /// Frame processor (`fp`).
    Processor,
}

impl UnitKind {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Receiver => "fr",
            Self::Processor => "fp",
        }
    }

    /// Detail columns, in display order (excluding [`CONNECTED_COLUMN`]).
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Receiver => &[
                "buffer-manager",
                "rx-thread",
                "decoder",
                "ipc",
                "config-complete",
                "empty-buffers",
                "frames-received",
                "frames-timed-out",
                "frames-released",
            ],
            Self::Processor => &[
                "shared-mem",
                "hdf-processes",
                "hdf-rank",
                "hdf-written",
                "hdf-file-path",
                "writing",
            ],
        }
    }
}

/// Detail of a connected unit that knows how to fill its row.
pub trait UnitRow {
    const KIND: UnitKind;

    /// One `(column, cell)` pair per entry of [`UnitKind::columns`].
    fn cells(&self) -> Vec<(&'static str, Cell)>;
}

impl UnitRow for ReceiverDetail {
    const KIND: UnitKind = UnitKind::Receiver;

    fn cells(&self) -> Vec<(&'static str, Cell)> {
        let flags = &self.status;
        vec![
            ("buffer-manager", led(flags.buffer_manager_configured)),
            ("rx-thread", led(flags.rx_thread_configured)),
            ("decoder", led(flags.decoder_configured)),
            ("ipc", led(flags.ipc_configured)),
            ("config-complete", led(flags.configuration_complete)),
            ("empty-buffers", Cell::text(self.buffers.empty.to_string())),
            ("frames-received", Cell::text(self.frames.received.to_string())),
            ("frames-timed-out", Cell::text(self.frames.timedout.to_string())),
            ("frames-released", Cell::text(self.frames.released.to_string())),
        ]
    }
}

impl UnitRow for ProcessorDetail {
    const KIND: UnitKind = UnitKind::Processor;

    fn cells(&self) -> Vec<(&'static str, Cell)> {
        let hdf = &self.hdf;
        vec![
            ("shared-mem", led(self.shared_memory.configured)),
            ("hdf-processes", Cell::text(hdf.processes.to_string())),
            ("hdf-rank", Cell::text(hdf.rank.to_string())),
            (
                "hdf-written",
                Cell::text(format!("{} / {}", hdf.frames_written, hdf.frames_max)),
            ),
            (
                "hdf-file-path",
                Cell::text(hdf.file_name.clone().unwrap_or_default()),
            ),
            ("writing", led(hdf.writing)),
        ]
    }
}

fn led(flag: crate::status::Flag) -> Cell {
    Cell::Indicator(Indicator::healthy(flag))
}

/// Row key of the unit at zero-based `index`.
#[must_use]
pub fn row_key(kind: UnitKind, index: usize) -> String {
    format!("{}{}", kind.prefix(), index + 1)
}

/// Element id of `column` in `row`.
#[must_use]
pub fn cell_id(row: &str, column: &str) -> String {
    format!("{row}-{column}")
}

/// Render `units` as a table of at least `table_rows` rows.
///
/// Returns the number of rows rendered.
pub fn render_units<D: UnitRow>(
    page: &mut Page,
    units: &[UnitStatus<D>],
    table_rows: usize,
) -> usize {
    let rows = table_rows.max(units.len());
    for index in 0..rows {
        let row = row_key(D::KIND, index);
        let connected_id = cell_id(&row, CONNECTED_COLUMN);
        match units.get(index) {
            Some(unit) => {
                page.set_indicator(connected_id, Indicator::healthy(unit.connected));
                match (unit.connected, &unit.detail) {
                    (true, Some(detail)) => populate_row(page, &row, detail),
                    _ => empty_row(page, &row, D::KIND),
                }
            }
            None => {
                page.clear(connected_id);
                empty_row(page, &row, D::KIND);
            }
        }
    }
    drop_rows_from(page, D::KIND, rows);
    rows
}

/// Number of consecutive rows of `kind` present in `page`.
#[must_use]
pub fn row_count(page: &Page, kind: UnitKind) -> usize {
    (0..)
        .map(|index| cell_id(&row_key(kind, index), CONNECTED_COLUMN))
        .take_while(|id| page.get(id).is_some())
        .count()
}

fn drop_rows_from(page: &mut Page, kind: UnitKind, first: usize) {
    for index in first.. {
        let row = row_key(kind, index);
        if page.remove(&cell_id(&row, CONNECTED_COLUMN)).is_none() {
            break;
        }
        for column in kind.columns() {
            page.remove(&cell_id(&row, column));
        }
    }
}

fn populate_row<D: UnitRow>(page: &mut Page, row: &str, detail: &D) {
    for (column, cell) in detail.cells() {
        page.set(cell_id(row, column), cell);
    }
}

fn empty_row(page: &mut Page, row: &str, kind: UnitKind) {
    for column in kind.columns() {
        page.clear(cell_id(row, column));
    }
}
