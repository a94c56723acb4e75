use ratatui::layout::Rect;

use crate::MAX_PANELS;

/// Regions for `count` panels inside `area`, in panel order.
///
/// 1: whole area. 2: left | right. 3: panel 0 on top, 1 and 2 below.
/// 4: 2x2 grid, row-major. Left columns and top rows take the odd cell.
/// Counts outside 1..=4 are clamped.
pub fn arrange(count: usize, area: Rect) -> Vec<Rect> {
    let count = count.clamp(1, MAX_PANELS);
    let (left, right) = split_columns(area);
    let (top, bottom) = split_rows(area);

    match count {
        1 => vec![area],
        2 => vec![left, right],
        3 => {
            let (bottom_left, bottom_right) = split_columns(bottom);
            vec![top, bottom_left, bottom_right]
        }
        _ => {
            let (top_left, top_right) = split_columns(top);
            let (bottom_left, bottom_right) = split_columns(bottom);
            vec![top_left, top_right, bottom_left, bottom_right]
        }
    }
}

/// Index of the region containing the cell, if any.
pub fn region_at(regions: &[Rect], column: u16, row: u16) -> Option<usize> {
    regions.iter().position(|region| {
        column >= region.x
            && column < region.x.saturating_add(region.width)
            && row >= region.y
            && row < region.y.saturating_add(region.height)
    })
}

fn split_columns(area: Rect) -> (Rect, Rect) {
    let left_width = area.width - area.width / 2;
    let left = Rect::new(area.x, area.y, left_width, area.height);
    let right = Rect::new(area.x + left_width, area.y, area.width - left_width, area.height);
    (left, right)
}

fn split_rows(area: Rect) -> (Rect, Rect) {
    let top_height = area.height - area.height / 2;
    let top = Rect::new(area.x, area.y, area.width, top_height);
    let bottom = Rect::new(area.x, area.y + top_height, area.width, area.height - top_height);
    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(2, 3, 81, 25)
    }

    fn cells(region: &Rect) -> u32 {
        region.width as u32 * region.height as u32
    }

    #[test]
    fn test_single_panel_fills_area() {
        assert_eq!(arrange(1, area()), vec![area()]);
    }

    #[test]
    fn test_two_panels_side_by_side() {
        let regions = arrange(2, area());
        assert_eq!(regions[0], Rect::new(2, 3, 41, 25));
        assert_eq!(regions[1], Rect::new(43, 3, 40, 25));
    }

    #[test]
    fn test_three_panels_primary_on_top() {
        let regions = arrange(3, area());
        assert_eq!(regions[0], Rect::new(2, 3, 81, 13));
        assert_eq!(regions[1], Rect::new(2, 16, 41, 12));
        assert_eq!(regions[2], Rect::new(43, 16, 40, 12));
    }

    #[test]
    fn test_four_panels_grid() {
        let regions = arrange(4, area());
        assert_eq!(regions[0], Rect::new(2, 3, 41, 13));
        assert_eq!(regions[1], Rect::new(43, 3, 40, 13));
        assert_eq!(regions[2], Rect::new(2, 16, 41, 12));
        assert_eq!(regions[3], Rect::new(43, 16, 40, 12));
    }

    #[test]
    fn test_regions_tile_area_exactly() {
        for count in 1..=4 {
            let regions = arrange(count, area());
            assert_eq!(regions.len(), count);

            let total: u32 = regions.iter().map(cells).sum();
            assert_eq!(total, cells(&area()));

            for (i, a) in regions.iter().enumerate() {
                for b in regions.iter().skip(i + 1) {
                    assert!(!a.intersects(*b), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_count_is_clamped() {
        assert_eq!(arrange(0, area()).len(), 1);
        assert_eq!(arrange(9, area()).len(), 4);
    }

    #[test]
    fn test_region_at() {
        let regions = arrange(4, area());
        assert_eq!(region_at(&regions, 2, 3), Some(0));
        assert_eq!(region_at(&regions, 82, 27), Some(3));
        assert_eq!(region_at(&regions, 43, 15), Some(1));
        assert_eq!(region_at(&regions, 0, 0), None);
    }
}
