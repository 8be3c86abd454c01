//! Typed field tables: each row knows how many positions its control has and how to read
//! the current position off a settings value. Builders compare a configured value against
//! the default value row by row, in display order.

use crate::{
    builder::{PendingAdvance, clicks_toggle, clicks_wrapping},
    error::BuildError,
    stream::CommandStream,
};

pub struct FieldRow<T> {
    pub label: &'static str,
    pub positions: usize,
    pub get: fn(&T) -> usize,
}

impl<T> FieldRow<T> {
    pub const fn toggle(label: &'static str, get: fn(&T) -> usize) -> Self {
        Self {
            label,
            positions: 2,
            get,
        }
    }

    pub const fn cycle(label: &'static str, positions: usize, get: fn(&T) -> usize) -> Self {
        Self {
            label,
            positions,
            get,
        }
    }

    /// Presses needed to move this control from `default`'s position to `current`'s.
    pub fn clicks(&self, default: &T, current: &T) -> Result<usize, BuildError> {
        let (d, c) = ((self.get)(default), (self.get)(current));
        let n = clicks_wrapping(self.label, d, c, self.positions)?;
        Ok(if self.positions == 2 { clicks_toggle(d, c) } else { n })
    }
}

/// Check every row's configured position is in range without emitting anything.
pub fn check_fields<'r, T: 'r>(
    rows: impl IntoIterator<Item = &'r FieldRow<T>>,
    default: &T,
    current: &T,
) -> Result<(), BuildError> {
    for row in rows {
        row.clicks(default, current)?;
    }
    Ok(())
}

/// Walk a cursor-driven list page. Changed rows flush the pending cursor moves and press
/// `change` on `device`; every row queues one move to the next row.
///
/// Returns the number of rows that needed a change.
pub fn walk_fields<T>(
    stream: &mut CommandStream,
    pending: &mut PendingAdvance,
    rows: &[FieldRow<T>],
    default: &T,
    current: &T,
    device: &str,
    change: &str,
) -> Result<usize, BuildError> {
    let mut changed = 0;
    for row in rows {
        let n = row.clicks(default, current)?;
        if n > 0 {
            pending.press_n(stream, device, change, n)?;
            changed += 1;
        }
        pending.queue();
    }
    Ok(changed)
}

/// Rows that each have their own button: press it `clicks` times, no cursor.
pub fn press_direct<T>(
    stream: &mut CommandStream,
    rows: &[(FieldRow<T>, &str)],
    default: &T,
    current: &T,
    device: &str,
) -> Result<usize, BuildError> {
    let mut changed = 0;
    for (row, button) in rows {
        let n = row.clicks(default, current)?;
        if n > 0 {
            stream.add_repeated(device, button, n)?;
            changed += 1;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Device};
    use std::sync::Arc;

    #[derive(Default)]
    struct Panel {
        a: bool,
        b: usize,
        c: usize,
    }

    const ROWS: &[FieldRow<Panel>] = &[
        FieldRow::toggle("a", |p| usize::from(p.a)),
        FieldRow::cycle("b", 3, |p| p.b),
        FieldRow::cycle("c", 4, |p| p.c),
    ];

    fn stream() -> CommandStream {
        let c = Catalog::new("T").with_device(Device::new("MFD", 1).with_actions(&["DN", "CHG", "X"]));
        CommandStream::new(Arc::new(c), 0)
    }

    #[test]
    fn untouched_rows_only_queue_cursor_moves() {
        let mut s = stream();
        let mut p = PendingAdvance::new("MFD", "DN");
        let cur = Panel { c: 1, ..Panel::default() };
        let n = walk_fields(&mut s, &mut p, ROWS, &Panel::default(), &cur, "MFD", "CHG").unwrap();
        assert_eq!(n, 1);
        assert_eq!(s.labels(), ["MFD.DN", "MFD.DN", "MFD.CHG"]);
        assert_eq!(p.queued(), 1);
    }

    #[test]
    fn defaults_emit_nothing() {
        let mut s = stream();
        let mut p = PendingAdvance::new("MFD", "DN");
        let n = walk_fields(&mut s, &mut p, ROWS, &Panel::default(), &Panel::default(), "MFD", "CHG")
            .unwrap();
        assert_eq!(n, 0);
        assert!(s.is_empty());
    }

    #[test]
    fn wrapping_rows_go_the_long_way_round() {
        let mut s = stream();
        let default = Panel { b: 2, ..Panel::default() };
        let cur = Panel { a: true, b: 1, ..Panel::default() };
        let rows = [(FieldRow::toggle("a", |p: &Panel| usize::from(p.a)), "X"), (FieldRow::cycle("b", 3, |p: &Panel| p.b), "CHG")];
        press_direct(&mut s, &rows, &default, &cur, "MFD").unwrap();
        assert_eq!(s.labels(), ["MFD.X", "MFD.CHG", "MFD.CHG"]);
    }

    #[test]
    fn out_of_range_position_is_an_integrity_error() {
        let mut s = stream();
        let mut p = PendingAdvance::new("MFD", "DN");
        let cur = Panel { b: 5, ..Panel::default() };
        let err = walk_fields(&mut s, &mut p, ROWS, &Panel::default(), &cur, "MFD", "CHG").unwrap_err();
        assert_eq!(err, BuildError::OutOfRange { field: "b", value: 5, limit: 3 });
    }

    #[test]
    fn check_reports_the_first_bad_row_without_a_stream() {
        let ok = Panel { a: true, b: 2, c: 3 };
        assert!(check_fields(ROWS, &Panel::default(), &ok).is_ok());
        let bad = Panel { c: 4, ..Panel::default() };
        assert_eq!(
            check_fields(ROWS, &Panel::default(), &bad),
            Err(BuildError::OutOfRange { field: "c", value: 4, limit: 4 })
        );
    }
}
