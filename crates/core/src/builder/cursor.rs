//! Click arithmetic for stateful cockpit controls, and the "next field" cursor.

use crate::{error::BuildError, stream::CommandStream};

/// Forward presses that move an N-position wrapping control from `default` to `configured`.
pub fn clicks_wrapping(
    field: &'static str,
    default: usize,
    configured: usize,
    positions: usize,
) -> Result<usize, BuildError> {
    for value in [default, configured] {
        if value >= positions {
            return Err(BuildError::OutOfRange {
                field,
                value,
                limit: positions,
            });
        }
    }
    let raw = configured as isize - default as isize;
    Ok(if raw < 0 {
        (raw + positions as isize) as usize
    } else {
        raw as usize
    })
}

/// Presses for a two-position control.
#[inline]
pub fn clicks_toggle(default: usize, configured: usize) -> usize {
    default.abs_diff(configured)
}

/// Position reached after `clicks` forward presses.
#[inline]
pub fn advance(from: usize, clicks: usize, positions: usize) -> usize {
    (from + clicks) % positions
}

/// Deferred "move to next field" presses on a multi-field page.
///
/// Skipped fields only `queue()`; the backlog is pressed out right before the next real
/// emission, so untouched trailing fields never cost a click.
#[derive(Debug, Clone)]
pub struct PendingAdvance {
    device: &'static str,
    action: &'static str,
    queued: usize,
}

impl PendingAdvance {
    pub fn new(device: &'static str, action: &'static str) -> Self {
        Self {
            device,
            action,
            queued: 0,
        }
    }

    #[inline]
    pub fn queue(&mut self) {
        self.queued += 1;
    }

    #[inline]
    pub fn queued(&self) -> usize {
        self.queued
    }

    pub fn flush_before(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        let n = std::mem::take(&mut self.queued);
        stream.add_repeated(self.device, self.action, n)
    }

    /// Flush, then press `action` `count` times. `count == 0` emits nothing, not even the flush.
    pub fn press_n(
        &mut self,
        stream: &mut CommandStream,
        device: &str,
        action: &str,
        count: usize,
    ) -> Result<(), BuildError> {
        if count == 0 {
            return Ok(());
        }
        self.flush_before(stream)?;
        stream.add_repeated(device, action, count)
    }

    /// Forget the backlog (page left, cursor resets).
    #[inline]
    pub fn reset(&mut self) {
        self.queued = 0;
    }
}
