//! Conversion of page view priorities into sitemap priorities.

use crate::types::DEFAULT_VIEW_PRIORITY;

/// Rules mapping a view priority onto the sitemap `[0.0, 1.0]` scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityRules {
    /// View priority that means "not customized"; such pages get no priority.
    pub default_priority: i32,
    /// View priority that maps to `1.0`.
    pub scale: f64,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_VIEW_PRIORITY,
            scale: 32.0,
        }
    }
}

impl PriorityRules {
    /// Sitemap priority for a view priority, or `None` for the default one.
    ///
    /// The value is `priority / scale` rounded to one decimal (ties to even)
    /// and clamped to `[0.0, 1.0]`.
    ///
    /// ```rust
    /// use locmap_core::PriorityRules;
    ///
    /// let rules = PriorityRules::default();
    /// assert_eq!(rules.sitemap_priority(16), None);
    /// assert_eq!(rules.sitemap_priority(24), Some(0.8));
    /// assert_eq!(rules.sitemap_priority(50), Some(1.0));
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    pub fn sitemap_priority(&self, view_priority: i32) -> Option<f32> {
        if view_priority == self.default_priority {
            return None;
        }
        let ratio = f64::from(view_priority) / self.scale;
        let rounded = (ratio * 10.0).round_ties_even() / 10.0;
        Some(rounded.clamp(0.0, 1.0) as f32)
    }
}
