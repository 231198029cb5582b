//! Conversion of grid lines into pixel rectangles.

use crate::types::Rect;

use super::GridModel;

/// Compute one rectangle per cell of `grid` for an image of the given size.
pub fn partition(grid: &GridModel, image_w: u32, image_h: u32) -> Vec<Rect> {
    partition_positions(
        grid.row_positions(),
        grid.col_positions(),
        image_w,
        image_h,
        grid.padding_x(),
        grid.padding_y(),
    )
}

/// Compute cell rectangles from sorted line percentages.
///
/// Cells come out row-major: result `k` is row `k / cols`, column
/// `k % cols`. Padding shrinks every cell toward its centre; a cell never
/// shrinks below 1x1.
pub fn partition_positions(
    row_positions: &[f64],
    col_positions: &[f64],
    image_w: u32,
    image_h: u32,
    padding_x: u32,
    padding_y: u32,
) -> Vec<Rect> {
    let rows = row_positions.len().saturating_sub(1);
    let cols = col_positions.len().saturating_sub(1);
    let mut rects = Vec::with_capacity(rows * cols);

    for r in row_positions.windows(2) {
        let (y, h) = span(r[0], r[1], image_h, padding_y);
        for c in col_positions.windows(2) {
            let (x, w) = span(c[0], c[1], image_w, padding_x);
            rects.push(Rect::new(x, y, w, h));
        }
    }

    rects
}

/// Map a percentage pair onto pixels, inset by `padding` on both sides.
///
/// Both edges are rounded so adjacent cells share boundaries exactly.
fn span(start: f64, end: f64, extent: u32, padding: u32) -> (u32, u32) {
    let extent = extent as f64;
    let padding = padding as f64;

    let p1 = start / 100.0 * extent;
    let p2 = end / 100.0 * extent;

    let origin = (p1 + padding).round();
    let far = (p2 - padding).round();
    let length = (far - origin).max(1.0);

    (origin.max(0.0) as u32, length as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Axis;
    use pretty_assertions::assert_eq;

    const HALVES: [f64; 3] = [0.0, 50.0, 100.0];

    #[test]
    fn test_two_by_two() {
        let rects = partition_positions(&HALVES, &HALVES, 100, 100, 0, 0);
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 50, 50),
                Rect::new(50, 0, 50, 50),
                Rect::new(0, 50, 50, 50),
                Rect::new(50, 50, 50, 50),
            ]
        );
    }

    #[test]
    fn test_padding_shrinks_symmetrically() {
        let plain = partition_positions(&HALVES, &HALVES, 100, 100, 0, 0);
        let padded = partition_positions(&HALVES, &HALVES, 100, 100, 10, 0);

        for (a, b) in plain.iter().zip(&padded) {
            assert_eq!(b.w, a.w - 20);
            assert_eq!(b.x, a.x + 10);
            assert_eq!((b.y, b.h), (a.y, a.h));
        }
    }

    #[test]
    fn test_extreme_padding_floors_at_one() {
        let rects = partition_positions(&HALVES, &HALVES, 100, 100, 50, 80);
        assert_eq!(rects.len(), 4);
        for rect in &rects {
            assert_eq!((rect.w, rect.h), (1, 1));
        }
        assert_eq!(rects[1].x, 100);
    }

    #[test]
    fn test_row_major_order() {
        let rows = [0.0, 50.0, 100.0];
        let cols = [0.0, 25.0, 50.0, 100.0];
        let rects = partition_positions(&rows, &cols, 200, 100, 0, 0);

        assert_eq!(rects.len(), 6);
        // k = row * cols + col
        assert_eq!(rects[4], Rect::new(50, 50, 50, 50));
        assert_eq!(rects[2], Rect::new(100, 0, 100, 50));
    }

    #[test]
    fn test_fractional_lines_share_edges() {
        let thirds = [0.0, 33.33, 66.67, 100.0];
        let rects = partition_positions(&[0.0, 100.0], &thirds, 100, 10, 0, 0);

        assert_eq!(rects[0].x + rects[0].w, rects[1].x);
        assert_eq!(rects[1].x + rects[1].w, rects[2].x);
        assert_eq!(rects[2].x + rects[2].w, 100);
    }

    #[test]
    fn test_collapsed_lines_give_one_pixel_cell() {
        let rects = partition_positions(&[0.0, 40.0, 40.0, 100.0], &[0.0, 100.0], 10, 100, 0, 0);
        assert_eq!(rects[1], Rect::new(0, 40, 10, 1));
    }

    #[test]
    fn test_partition_uses_model_padding() {
        let mut grid = GridModel::new(2, 2);
        grid.set_link_padding(false);
        grid.set_padding(Axis::Row, 5);

        let rects = partition(&grid, 100, 100);
        assert_eq!(rects[0], Rect::new(0, 5, 50, 40));
        assert_eq!(rects.len(), grid.cell_count());
    }
}
