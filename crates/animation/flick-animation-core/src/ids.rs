//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PresetId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TweenId(pub u32);

/// Monotonic allocator for WidgetId, PresetId, and TweenId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_widget: u32,
    next_preset: u32,
    next_tween: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_widget(&mut self) -> WidgetId {
        let id = WidgetId(self.next_widget);
        self.next_widget = self.next_widget.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_preset(&mut self) -> PresetId {
        let id = PresetId(self.next_preset);
        self.next_preset = self.next_preset.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_tween(&mut self) -> TweenId {
        let id = TweenId(self.next_tween);
        self.next_tween = self.next_tween.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
