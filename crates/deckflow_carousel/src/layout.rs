//! Target geometry for each slot
//!
//! Vertical offsets accumulate outward from the expanded card: each tier sits
//! one gap beyond the outer edge of the tier before it, so tiers never
//! overlap whatever their sizes.

use deckflow_core::{Geometry, Size, ViewportMetrics};

use crate::config::{BelowWidth, CarouselConfig, SlotStyles};
use crate::slot::{Side, SlotKind};

/// Resolved slot geometry for one configuration and viewport
#[derive(Clone, Debug, PartialEq)]
pub struct SlotLayout {
    expanded: Size,
    stacked1: Size,
    stacked2: Size,
    below: Size,
    gap: f32,
    overshoot: f32,
    styles: SlotStyles,
}

impl SlotLayout {
    /// Resolve the layout, narrowing widths to fit the viewport
    ///
    /// Heights never depend on the viewport, so neither do vertical offsets.
    pub fn new(config: &CarouselConfig, viewport: ViewportMetrics) -> Self {
        let available = (viewport.width - 2.0 * config.horizontal_padding).max(0.0);
        let fit = |size: Size| Size::new(size.width.min(available), size.height);

        let expanded = fit(config.expanded);
        let stacked1 = fit(config.stacked[0]);
        let stacked2 = fit(config.stacked[1]);
        let below = match config.below_width {
            BelowWidth::Expanded => Size::new(expanded.width, stacked1.height),
            BelowWidth::Stacked => stacked1,
        };

        Self {
            expanded,
            stacked1,
            stacked2,
            below,
            gap: config.gap,
            overshoot: config.hidden_overshoot,
            styles: config.styles,
        }
    }

    pub fn expanded_size(&self) -> Size {
        self.expanded
    }

    pub fn above1_y(&self) -> f32 {
        -(self.expanded.half_height() + self.gap + self.stacked1.half_height())
    }

    pub fn above2_y(&self) -> f32 {
        self.above1_y() - (self.stacked1.half_height() + self.gap + self.stacked2.half_height())
    }

    pub fn below_y(&self) -> f32 {
        self.expanded.half_height() + self.gap + self.below.half_height()
    }

    /// Where hidden cards rest on the given side
    pub fn park_y(&self, side: Side) -> f32 {
        match side {
            Side::Above => self.above2_y() - self.stacked2.half_height() - self.overshoot,
            Side::Below => self.below_y() + self.below.half_height() + self.overshoot,
        }
    }

    /// Resting geometry of a slot
    ///
    /// `park` only matters for [`SlotKind::Hidden`].
    pub fn target(&self, slot: SlotKind, park: Side) -> Geometry {
        let s = &self.styles;
        match slot {
            SlotKind::Expanded => Geometry::new(
                0.0,
                self.expanded,
                s.expanded.opacity,
                s.expanded.stack_depth,
            ),
            SlotKind::StackedAbove1 => Geometry::new(
                self.above1_y(),
                self.stacked1,
                s.above1.opacity,
                s.above1.stack_depth,
            ),
            SlotKind::StackedAbove2 => Geometry::new(
                self.above2_y(),
                self.stacked2,
                s.above2.opacity,
                s.above2.stack_depth,
            ),
            SlotKind::StackedBelow => Geometry::new(
                self.below_y(),
                self.below,
                s.below.opacity,
                s.below.stack_depth,
            ),
            SlotKind::Hidden => Geometry::new(
                self.park_y(park),
                Size::default(),
                s.hidden.opacity,
                s.hidden.stack_depth,
            ),
        }
    }

    /// Off-screen geometry a card snaps to before entering `slot`
    ///
    /// Keeps the slot's width and stacking so only height, opacity and
    /// offset animate in.
    pub fn entry(&self, slot: SlotKind) -> Geometry {
        let target = self.target(slot, slot.entry_side());
        Geometry {
            y_offset: self.park_y(slot.entry_side()),
            height: 0.0,
            opacity: 0.0,
            ..target
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SlotLayout {
        SlotLayout::new(&CarouselConfig::default(), ViewportMetrics::default())
    }

    #[test]
    fn test_cumulative_offsets() {
        let layout = layout();
        // 320/2 + 3 + 48/2
        assert!((layout.above1_y() - -187.0).abs() < 1e-4);
        // -187 - (24 + 3 + 12)
        assert!((layout.above2_y() - -226.0).abs() < 1e-4);
        assert!((layout.below_y() - 187.0).abs() < 1e-4);
    }

    #[test]
    fn test_tiers_do_not_overlap() {
        let layout = layout();
        let expanded = layout.target(SlotKind::Expanded, Side::Above);
        let above1 = layout.target(SlotKind::StackedAbove1, Side::Above);
        let above2 = layout.target(SlotKind::StackedAbove2, Side::Above);
        let below = layout.target(SlotKind::StackedBelow, Side::Above);

        assert!((expanded.top() - above1.bottom() - 3.0).abs() < 1e-4);
        assert!((above1.top() - above2.bottom() - 3.0).abs() < 1e-4);
        assert!((below.top() - expanded.bottom() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_slot_styles() {
        let layout = layout();
        let expanded = layout.target(SlotKind::Expanded, Side::Above);
        assert_eq!(expanded.width, 1024.0);
        assert_eq!(expanded.opacity, 1.0);
        assert_eq!(expanded.stack_depth, 30);

        let below = layout.target(SlotKind::StackedBelow, Side::Above);
        assert_eq!(below.width, 1024.0);
        assert_eq!(below.height, 48.0);

        let hidden = layout.target(SlotKind::Hidden, Side::Below);
        assert!(hidden.is_invisible());
        assert!(hidden.y_offset > below.bottom());
    }

    #[test]
    fn test_below_width_stacked() {
        let config = CarouselConfig {
            below_width: BelowWidth::Stacked,
            ..Default::default()
        };
        let layout = SlotLayout::new(&config, ViewportMetrics::default());
        assert_eq!(
            layout.target(SlotKind::StackedBelow, Side::Above).width,
            768.0
        );
    }

    #[test]
    fn test_narrow_viewport_only_changes_widths() {
        let wide = layout();
        let narrow = SlotLayout::new(
            &CarouselConfig::default(),
            ViewportMetrics::new(700.0, 800.0),
        );

        for slot in [
            SlotKind::Expanded,
            SlotKind::StackedAbove1,
            SlotKind::StackedAbove2,
            SlotKind::StackedBelow,
            SlotKind::Hidden,
        ] {
            let a = wide.target(slot, Side::Above);
            let b = narrow.target(slot, Side::Above);
            assert_eq!(a.y_offset, b.y_offset, "{:?}", slot);
            assert_eq!(a.height, b.height, "{:?}", slot);
            assert!(b.width <= 668.0, "{:?}", slot);
        }
    }

    #[test]
    fn test_entry_geometry_is_off_screen() {
        let layout = layout();
        let entry = layout.entry(SlotKind::StackedBelow);
        assert_eq!(entry.height, 0.0);
        assert_eq!(entry.opacity, 0.0);
        assert_eq!(entry.width, 1024.0);
        assert_eq!(entry.y_offset, layout.park_y(Side::Below));

        let entry = layout.entry(SlotKind::StackedAbove2);
        assert_eq!(entry.y_offset, layout.park_y(Side::Above));
        assert_eq!(entry.width, 640.0);
    }
}
