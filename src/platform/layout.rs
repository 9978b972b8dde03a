//! Deterministic layout provider

use std::collections::HashMap;

use crate::sim::{LayoutProvider, Rect};

/// Fixed element boxes keyed by element name
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    rects: HashMap<String, Rect>,
}

impl FixedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, element: impl Into<String>, rect: Rect) -> Self {
        self.set(element, rect);
        self
    }

    pub fn set(&mut self, element: impl Into<String>, rect: Rect) {
        self.rects.insert(element.into(), rect);
    }

    pub fn remove(&mut self, element: &str) {
        self.rects.remove(element);
    }

    /// Place `elements` in a row of equal slots across `width`, each `size` wide,
    /// standing on `baseline`
    pub fn row(elements: &[&str], width: f32, baseline: f32, size: (f32, f32)) -> Self {
        let slot = width / elements.len().max(1) as f32;
        let mut layout = Self::new();
        for (i, element) in elements.iter().enumerate() {
            let center = slot * (i as f32 + 0.5);
            layout.set(
                *element,
                Rect::from_xywh(center - size.0 / 2.0, baseline - size.1, size.0, size.1),
            );
        }
        layout
    }
}

impl LayoutProvider for FixedLayout {
    fn rect(&self, element: &str) -> Option<Rect> {
        self.rects.get(element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout() {
        let layout = FixedLayout::row(&["a", "b"], 400.0, 300.0, (50.0, 100.0));
        let a = layout.rect("a").unwrap();
        assert_eq!(a, Rect::new(75.0, 200.0, 125.0, 300.0));
        assert_eq!(layout.rect("b").unwrap().center().x, 300.0);
        assert_eq!(layout.rect("c"), None);
    }
}
