//! Fixed-size index windows over an ordered dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Half-open index window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchWindow {
    pub start: usize,
    pub end: usize,
}

impl BatchWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for BatchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `[0, total)` into `ceil(total / batch_size)` contiguous windows.
///
/// Every window holds `batch_size` indices except possibly the last, whose
/// end is clamped to `total`. An empty dataset yields no windows.
pub fn chunks(total: usize, batch_size: NonZeroUsize) -> Vec<BatchWindow> {
    let batch_size = batch_size.get();
    let batch_count = total.div_ceil(batch_size);

    (0..batch_count)
        .map(|i| {
            let start = i * batch_size;
            let end = start.saturating_add(batch_size).min(total);
            BatchWindow::new(start, end)
        })
        .collect()
}
