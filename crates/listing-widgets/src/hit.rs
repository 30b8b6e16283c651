//! Hit regions recorded during render and consumed by mouse handlers.

use ratatui::layout::{Position, Rect};

/// Screen regions tagged with the target they activate.
///
/// Regions pushed later sit on top of earlier ones, so lookups scan from the
/// back. Empty rectangles are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitMap<T> {
    regions: Vec<(Rect, T)>,
}

impl<T> Default for HitMap<T> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<T> HitMap<T> {
    /// Create an empty hit map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every region (called at the start of each render).
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Record a region.
    pub fn push(&mut self, area: Rect, target: T) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Find the topmost target under a cell.
    pub fn hit(&self, x: u16, y: u16) -> Option<&T> {
        let pos = Position::new(x, y);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, target)| target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topmost_wins() {
        let mut hits = HitMap::new();
        hits.push(Rect::new(0, 0, 10, 10), "base");
        hits.push(Rect::new(2, 2, 3, 1), "button");

        assert_eq!(hits.hit(3, 2), Some(&"button"));
        assert_eq!(hits.hit(0, 0), Some(&"base"));
        assert_eq!(hits.hit(10, 0), None);
    }

    #[test]
    fn test_empty_regions_skipped() {
        let mut hits = HitMap::new();
        hits.push(Rect::new(0, 0, 0, 1), 1);
        assert_eq!(hits, HitMap::new());

        hits.push(Rect::new(0, 0, 1, 1), 2);
        assert_eq!(hits.hit(0, 0), Some(&2));

        hits.clear();
        assert_eq!(hits.hit(0, 0), None);
    }
}
