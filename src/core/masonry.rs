//! Masonry placement and windowing for the card grid.
//!
//! Items are dropped one by one into the currently shortest column (the
//! leftmost one on ties). Windowing then picks the items whose rectangles
//! intersect the overscanned viewport; because the shortest-column rule can
//! place a later item above an earlier one, the result is a set of indices
//! rather than a contiguous range.

use crate::domain::model::{MasonryOptions, Placement};

#[derive(Debug, Clone)]
pub struct MasonryLayout {
    columns: usize,
    column_width: f64,
    gutter: f64,
    placements: Vec<Placement>,
    column_heights: Vec<f64>,
}

impl MasonryLayout {
    pub fn compute(item_count: usize, options: &MasonryOptions) -> Self {
        let gutter = options.column_gutter.max(0.0);
        let columns = column_count(options.viewport_width, options.column_width, gutter);
        // 欄寬拉伸填滿整個 viewport
        let column_width =
            ((options.viewport_width - gutter * (columns as f64 - 1.0)) / columns as f64).max(0.0);

        // 前 n 個項目最多只會用到前 n 欄
        let lanes = columns.min(item_count.max(1));
        let mut column_heights = vec![0.0_f64; lanes];
        let mut placements = Vec::with_capacity(item_count);

        for _ in 0..item_count {
            let column = find_shortest_column(&column_heights);
            let top = column_heights[column];
            placements.push(Placement {
                column,
                left: column as f64 * (column_width + gutter),
                top,
                width: column_width,
                height: options.item_height,
            });
            column_heights[column] = top + options.item_height + gutter;
        }

        Self {
            columns,
            column_width,
            gutter,
            placements,
            column_heights,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, index: usize) -> Option<Placement> {
        self.placements.get(index).copied()
    }

    pub fn content_height(&self) -> f64 {
        let max = self.column_heights.iter().copied().fold(0.0_f64, f64::max);
        if max == 0.0 {
            0.0
        } else {
            (max - self.gutter).max(0.0)
        }
    }

    /// Indices of items intersecting `[scroll - h*(overscan_by-1), scroll + h*overscan_by]`.
    pub fn visible_indices(
        &self,
        scroll_offset: f64,
        viewport_height: f64,
        overscan_by: f64,
    ) -> Vec<usize> {
        let extra = viewport_height * (overscan_by - 1.0).max(0.0);
        let window_start = (scroll_offset - extra).max(0.0);
        let window_end = scroll_offset + viewport_height * overscan_by.max(1.0);

        self.placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.top < window_end && p.top + p.height > window_start)
            .map(|(index, _)| index)
            .collect()
    }
}

pub fn column_count(viewport_width: f64, column_width: f64, gutter: f64) -> usize {
    let slot = column_width + gutter;
    if slot <= 0.0 {
        return 1;
    }
    (((viewport_width + gutter) / slot).floor() as usize).max(1)
}

fn find_shortest_column(heights: &[f64]) -> usize {
    let mut index = 0;
    let mut best = heights.first().copied().unwrap_or(0.0);
    for (i, height) in heights.iter().enumerate().skip(1) {
        if *height < best {
            best = *height;
            index = i;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(1280.0, 150.0, 0.0), 8);
        assert_eq!(column_count(100.0, 150.0, 0.0), 1);
        assert_eq!(column_count(320.0, 150.0, 10.0), 2);
    }

    #[test]
    fn test_uniform_items_fill_rows() {
        let layout = MasonryLayout::compute(49, &MasonryOptions::default());
        assert_eq!(layout.columns(), 8);
        assert_eq!(layout.column_width(), 160.0);

        let p9 = layout.placement(9).unwrap();
        assert_eq!(p9.column, 1);
        assert_eq!(p9.top, 212.0);
        assert_eq!(p9.left, 160.0);

        // 7 rows, last row has a single item
        assert_eq!(layout.content_height(), 7.0 * 212.0);
        assert_eq!(layout.placement(48).unwrap().column, 0);
    }

    #[test]
    fn test_visible_indices_without_overscan() {
        let layout = MasonryLayout::compute(49, &MasonryOptions::default());
        let visible = layout.visible_indices(0.0, 720.0, 1.0);
        // rows at 0, 212, 424, 636 intersect [0, 720)
        assert_eq!(visible.len(), 32);
        assert_eq!(visible.first(), Some(&0));
        assert_eq!(visible.last(), Some(&31));
    }

    #[test]
    fn test_visible_indices_with_scroll() {
        let layout = MasonryLayout::compute(49, &MasonryOptions::default());
        let visible = layout.visible_indices(1000.0, 300.0, 1.0);
        // window [1000, 1300): rows at 848 and 1060 and 1272
        assert_eq!(visible.first(), Some(&32));
        assert_eq!(visible.last(), Some(&48));
    }

    #[test]
    fn test_default_overscan_covers_small_grid() {
        let layout = MasonryLayout::compute(49, &MasonryOptions::default());
        assert_eq!(layout.visible_indices(0.0, 720.0, 2.0).len(), 49);
    }

    #[test]
    fn test_shortest_column_with_gutter() {
        let options = MasonryOptions {
            viewport_width: 310.0,
            column_width: 150.0,
            column_gutter: 10.0,
            item_height: 100.0,
            ..MasonryOptions::default()
        };
        let layout = MasonryLayout::compute(3, &options);
        assert_eq!(layout.columns(), 2);
        let third = layout.placement(2).unwrap();
        assert_eq!(third.column, 0);
        assert_eq!(third.top, 110.0);
        assert_eq!(layout.placement(1).unwrap().left, 160.0);
        assert_eq!(layout.content_height(), 210.0);
    }

    #[test]
    fn test_hairline_columns_only_track_used_lanes() {
        let options = MasonryOptions {
            column_width: 1e-300,
            ..MasonryOptions::default()
        };
        let layout = MasonryLayout::compute(49, &options);
        assert_eq!(layout.columns(), usize::MAX);
        assert_eq!(layout.placements().len(), 49);
        assert_eq!(layout.placement(48).unwrap().column, 48);
        assert_eq!(layout.placement(48).unwrap().top, 0.0);
        assert_eq!(layout.content_height(), 212.0);
    }

    #[test]
    fn test_empty_layout() {
        let layout = MasonryLayout::compute(0, &MasonryOptions::default());
        assert!(layout.placements().is_empty());
        assert_eq!(layout.content_height(), 0.0);
        assert!(layout.visible_indices(0.0, 720.0, 2.0).is_empty());
    }
}
