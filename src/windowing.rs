//! Windowed (virtualized) list math.
//!
//! Given a fixed row height and the current scroll viewport, compute the
//! minimal contiguous index range whose rows cover the viewport plus a small
//! overscan margin, and the absolute vertical offset of each visible row.
//! Rendered row count stays O(viewport/row + overscan) regardless of the
//! total item count; rows outside the range are not emitted at all.

/// Extra rows rendered above and below the viewport to avoid blank flashes
/// during fast scrolls.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Estimated review row height in points, matching the table layout.
pub const REVIEW_ROW_HEIGHT: f32 = 50.0;

/// Geometry of a virtualized list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListWindow {
    pub total_rows: usize,
    pub row_height: f32,
    pub overscan: usize,
}

/// The visible slice computed for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSlice {
    /// Index range `[start, end)` of rows to render.
    pub start: usize,
    pub end: usize,
    /// Full content height; keeps the scrollbar proportional to the whole
    /// list even though only a slice renders.
    pub content_height: f32,
}

impl ListWindow {
    pub fn new(total_rows: usize, row_height: f32) -> Self {
        Self {
            total_rows,
            row_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Compute the covering row range for the given scroll offset and
    /// viewport height. Constant-time for fixed-height rows.
    pub fn slice(&self, scroll_offset: f32, viewport_height: f32) -> WindowSlice {
        let content_height = self.total_rows as f32 * self.row_height;
        if self.total_rows == 0 || self.row_height <= 0.0 {
            return WindowSlice {
                start: 0,
                end: 0,
                content_height: content_height.max(0.0),
            };
        }

        let offset = scroll_offset.max(0.0);
        let first_visible = (offset / self.row_height).floor() as usize;
        let last_visible =
            ((offset + viewport_height.max(0.0)) / self.row_height).ceil() as usize;

        let start = first_visible.saturating_sub(self.overscan);
        let end = (last_visible + self.overscan).min(self.total_rows);
        WindowSlice {
            start: start.min(self.total_rows),
            end,
            content_height,
        }
    }

    /// Full scrollable height of the list.
    pub fn content_height(&self) -> f32 {
        (self.total_rows as f32 * self.row_height).max(0.0)
    }

    /// Absolute top offset of a row: cumulative height of all rows before it.
    pub fn row_offset(&self, row: usize) -> f32 {
        row as f32 * self.row_height
    }
}

impl WindowSlice {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_the_viewport_plus_overscan() {
        let window = ListWindow::new(1_000, 50.0);
        let slice = window.slice(500.0, 600.0);
        // Rows 10..22 are visible; overscan widens by 5 on each side.
        assert_eq!(slice.start, 5);
        assert_eq!(slice.end, 27);
        assert_eq!(slice.content_height, 50_000.0);
    }

    #[test]
    fn clamps_at_both_ends_of_the_list() {
        let window = ListWindow::new(20, 50.0);
        let top = window.slice(0.0, 300.0);
        assert_eq!(top.start, 0);
        assert_eq!(top.end, 11.min(20));

        let bottom = window.slice(10_000.0, 300.0);
        assert!(bottom.end <= 20);
        assert!(bottom.start <= bottom.end);
    }

    #[test]
    fn rendered_count_is_independent_of_total_rows() {
        let viewport = 600.0;
        let mut counts = Vec::new();
        for total in [10usize, 1_000, 100_000] {
            let window = ListWindow::new(total, 50.0);
            let slice = window.slice(0.0, viewport);
            counts.push(slice.len());
        }
        let bound = (viewport / 50.0).ceil() as usize + 2 * DEFAULT_OVERSCAN + 1;
        assert!(counts.iter().all(|&count| count <= bound));
        // Growing the list four orders of magnitude never grows the output.
        assert_eq!(counts[1], counts[2]);
    }

    #[test]
    fn row_offsets_are_cumulative_heights() {
        let window = ListWindow::new(100, 50.0);
        assert_eq!(window.row_offset(0), 0.0);
        assert_eq!(window.row_offset(7), 350.0);
    }

    #[test]
    fn empty_list_renders_nothing() {
        let window = ListWindow::new(0, 50.0);
        let slice = window.slice(120.0, 600.0);
        assert!(slice.is_empty());
        assert_eq!(slice.content_height, 0.0);
    }

    #[test]
    fn mid_scroll_range_is_contiguous_and_minimal() {
        let window = ListWindow::new(100_000, 50.0);
        let slice = window.slice(2_500_000.0, 600.0);
        assert_eq!(slice.start, 50_000 - DEFAULT_OVERSCAN);
        assert_eq!(slice.end, 50_012 + DEFAULT_OVERSCAN);
        assert_eq!(slice.len(), slice.range().len());
    }
}
