//! Hotspot collision with edge-triggered enter/exit
//!
//! Hotspot rectangles are not stored: they are asked from a `LayoutProvider`
//! every tick so resizes and reflows are picked up immediately.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// From a DOM-style (left, top, width, height) box
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grow by `pad` on every side
    pub fn inflate(&self, pad: f32) -> Self {
        Self::new(
            self.min_x - pad,
            self.min_y - pad,
            self.max_x + pad,
            self.max_y + pad,
        )
    }

    /// A laid-out box: finite coordinates and non-zero area.
    /// Elements that are hidden or not yet laid out report a zero box.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.min_x >= other.max_x
            || other.min_x >= self.max_x
            || self.min_y >= other.max_y
            || other.min_y >= self.max_y)
    }
}

/// Source of live element rectangles
pub trait LayoutProvider {
    /// Current box of the named element, `None` if it is not laid out
    fn rect(&self, element: &str) -> Option<Rect>;
}

/// An interactive region of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Stable identifier, also the modal content key
    pub id: String,
    /// Layout key of the region's element (defaults to `id`)
    #[serde(default)]
    pub element: Option<String>,
    /// Content card highlighted while the avatar stands here
    #[serde(default)]
    pub card: Option<String>,
}

impl Hotspot {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element: None,
            card: None,
        }
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card = Some(card.into());
        self
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn element(&self) -> &str {
        self.element.as_deref().unwrap_or(&self.id)
    }
}

/// Result of one collision pass (indices into the hotspot list)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Hotspot the avatar is standing in this tick
    pub current: Option<usize>,
    /// Set only on the tick a different hotspot becomes current
    pub entered: Option<usize>,
    /// Set on the tick the previous hotspot stops being current
    pub exited: Option<usize>,
}

/// Remembers which hotspot was entered last tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotTracker {
    current: Option<usize>,
}

impl HotspotTracker {
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Test the padded avatar box against every hotspot.
    ///
    /// When several hotspots overlap at once the last one in list order wins.
    pub fn check<L: LayoutProvider + ?Sized>(
        &mut self,
        avatar: Rect,
        hotspots: &[Hotspot],
        layout: &L,
        padding: f32,
    ) -> CollisionOutcome {
        let padded = avatar.inflate(padding);

        let mut hit = None;
        for (i, hotspot) in hotspots.iter().enumerate() {
            let Some(rect) = layout.rect(hotspot.element()).filter(Rect::is_valid) else {
                continue;
            };
            if padded.overlaps(&rect) {
                hit = Some(i);
            }
        }

        let previous = self.current;
        self.current = hit;

        CollisionOutcome {
            current: hit,
            entered: hit.filter(|&i| previous != Some(i)),
            exited: previous.filter(|&i| hit != Some(i)),
        }
    }

    /// Card to highlight for the current hotspot, if it links one
    pub fn highlighted_card<'a>(&self, hotspots: &'a [Hotspot]) -> Option<&'a str> {
        self.current
            .and_then(|i| hotspots.get(i))
            .and_then(|h| h.card.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLayout(HashMap<String, Rect>);

    impl LayoutProvider for MapLayout {
        fn rect(&self, element: &str) -> Option<Rect> {
            self.0.get(element).copied()
        }
    }

    fn layout(entries: &[(&str, Rect)]) -> MapLayout {
        MapLayout(entries.iter().map(|(k, r)| (k.to_string(), *r)).collect())
    }

    fn avatar_at(x: f32) -> Rect {
        Rect::from_xywh(x, 100.0, 20.0, 40.0)
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let below = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!a.overlaps(&below));

        let nudged = Rect::new(9.99, 0.0, 20.0, 10.0);
        assert!(a.overlaps(&nudged));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 15.0, 30.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_zero_gap_hotspot_not_entered_without_padding() {
        let hotspots = vec![Hotspot::new("about")];
        let lay = layout(&[("about", Rect::from_xywh(120.0, 100.0, 50.0, 40.0))]);
        let mut tracker = HotspotTracker::default();

        // Avatar spans 100..120, hotspot starts at 120
        let out = tracker.check(avatar_at(100.0), &hotspots, &lay, 0.0);
        assert_eq!(out.current, None);

        // The same placement counts once padding is applied
        let out = tracker.check(avatar_at(100.0), &hotspots, &lay, 4.0);
        assert_eq!(out.entered, Some(0));
    }

    #[test]
    fn test_enter_once_per_visit() {
        let hotspots = vec![Hotspot::new("projects").with_card("card-projects")];
        let lay = layout(&[("projects", Rect::from_xywh(200.0, 100.0, 60.0, 40.0))]);
        let mut tracker = HotspotTracker::default();

        let mut entries = 0;
        let mut exits = 0;
        let path = std::iter::once(0.0)
            .chain(std::iter::repeat_n(210.0, 11))
            .chain(std::iter::once(0.0))
            .chain(std::iter::once(210.0));
        for x in path {
            let out = tracker.check(avatar_at(x), &hotspots, &lay, 0.0);
            entries += out.entered.is_some() as u32;
            exits += out.exited.is_some() as u32;
        }
        assert_eq!(entries, 2);
        assert_eq!(exits, 1);
        assert_eq!(tracker.highlighted_card(&hotspots), Some("card-projects"));
    }

    #[test]
    fn test_last_overlap_wins() {
        let hotspots = vec![Hotspot::new("a"), Hotspot::new("b")];
        let lay = layout(&[
            ("a", Rect::from_xywh(90.0, 100.0, 40.0, 40.0)),
            ("b", Rect::from_xywh(110.0, 100.0, 40.0, 40.0)),
        ]);
        let mut tracker = HotspotTracker::default();
        let out = tracker.check(avatar_at(100.0), &hotspots, &lay, 0.0);
        assert_eq!(out.current, Some(1));
    }

    #[test]
    fn test_moving_between_hotspots_retriggers() {
        let hotspots = vec![Hotspot::new("a"), Hotspot::new("b")];
        let lay = layout(&[
            ("a", Rect::from_xywh(0.0, 100.0, 50.0, 40.0)),
            ("b", Rect::from_xywh(50.0, 100.0, 50.0, 40.0)),
        ]);
        let mut tracker = HotspotTracker::default();
        tracker.check(Rect::from_xywh(10.0, 100.0, 10.0, 10.0), &hotspots, &lay, 0.0);
        let out = tracker.check(Rect::from_xywh(70.0, 100.0, 10.0, 10.0), &hotspots, &lay, 0.0);
        assert_eq!(out.entered, Some(1));
        assert_eq!(out.exited, Some(0));
    }

    #[test]
    fn test_missing_or_empty_rect_is_no_overlap() {
        let hotspots = vec![
            Hotspot::new("gone"),
            Hotspot::new("collapsed"),
            Hotspot::new("nan"),
        ];
        let lay = layout(&[
            ("collapsed", Rect::new(100.0, 100.0, 100.0, 140.0)),
            ("nan", Rect::new(f32::NAN, 100.0, 130.0, 140.0)),
        ]);
        let mut tracker = HotspotTracker::default();
        let out = tracker.check(avatar_at(100.0), &hotspots, &lay, 10.0);
        assert_eq!(out, CollisionOutcome::default());
    }

    #[test]
    fn test_element_override() {
        let hotspots = vec![Hotspot::new("contact").with_element("contact-door")];
        let lay = layout(&[("contact-door", Rect::from_xywh(100.0, 100.0, 30.0, 30.0))]);
        let mut tracker = HotspotTracker::default();
        let out = tracker.check(avatar_at(100.0), &hotspots, &lay, 0.0);
        assert_eq!(out.entered, Some(0));
        assert_eq!(tracker.highlighted_card(&hotspots), None);
    }
}
