#![forbid(unsafe_code)]

//! Presentation options handed to the rendering host with each modal.
//!
//! [`ModalConfig`] is a closed set of named options. The host decides how to
//! honor each one (animation engine, backdrop drawing, gesture detection);
//! the sequencer only carries the value through untouched.
//!
//! All timings are stored in milliseconds so presets stay readable when
//! loaded from JSON (`serde` feature); use the `*_duration` accessors to get
//! a [`Duration`].

use std::time::Duration;

use bitflags::bitflags;

/// Default entrance/exit animation time.
const DEFAULT_ANIMATION_MS: u32 = 300;

/// Default swipe distance, in host units, before a swipe counts as complete.
const DEFAULT_SWIPE_THRESHOLD: u16 = 100;

/// Straight RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Named entrance/exit animations understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModalAnimation {
    #[default]
    SlideInUp,
    SlideOutDown,
    FadeIn,
    FadeOut,
    ZoomIn,
    ZoomOut,
    /// Appear/disappear without animating. The host still reports
    /// hide-completion.
    None,
}

/// Vertical anchoring of the modal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModalPosition {
    #[default]
    Center,
    Top,
    Bottom,
}

bitflags! {
    /// Directions in which a swipe dismisses the modal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SwipeDirection: u8 {
        const UP = 0b0001;
        const DOWN = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

/// Backdrop configuration (color, opacity and fade timings).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackdropConfig {
    pub color: Rgba,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
    pub transition_in_ms: u32,
    pub transition_out_ms: u32,
}

impl BackdropConfig {
    /// Create a new backdrop config with default fade timings.
    pub fn new(color: Rgba, opacity: f32) -> Self {
        Self::default().color(color).opacity(opacity)
    }

    /// Set backdrop color.
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set backdrop opacity, clamped to `[0.0, 1.0]`. NaN becomes 0.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    pub fn transition_in_ms(mut self, ms: u32) -> Self {
        self.transition_in_ms = ms;
        self
    }

    pub fn transition_out_ms(mut self, ms: u32) -> Self {
        self.transition_out_ms = ms;
        self
    }

    pub fn transition_in_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition_in_ms))
    }

    pub fn transition_out_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition_out_ms))
    }
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            opacity: 0.7,
            transition_in_ms: DEFAULT_ANIMATION_MS,
            transition_out_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

/// Modal presentation configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    pub animation_in: ModalAnimation,
    pub animation_out: ModalAnimation,
    pub animation_in_ms: u32,
    pub animation_out_ms: u32,
    pub backdrop: BackdropConfig,
    pub has_backdrop: bool,
    pub cover_screen: bool,
    pub position: ModalPosition,
    /// Serialized as the raw bit set (`UP = 1, DOWN = 2, LEFT = 4, RIGHT = 8`).
    #[cfg_attr(feature = "serde", serde(with = "swipe_bits"))]
    pub swipe_direction: SwipeDirection,
    pub swipe_threshold: u16,
    pub avoid_keyboard: bool,
    pub hide_contents_while_animating: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            animation_in: ModalAnimation::SlideInUp,
            animation_out: ModalAnimation::SlideOutDown,
            animation_in_ms: DEFAULT_ANIMATION_MS,
            animation_out_ms: DEFAULT_ANIMATION_MS,
            backdrop: BackdropConfig::default(),
            has_backdrop: true,
            cover_screen: true,
            position: ModalPosition::Center,
            swipe_direction: SwipeDirection::empty(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            avoid_keyboard: false,
            hide_contents_while_animating: false,
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fade in and out instead of sliding.
    pub fn fade() -> Self {
        Self::default()
            .animation_in(ModalAnimation::FadeIn)
            .animation_out(ModalAnimation::FadeOut)
    }

    /// Bottom sheet that can be swiped down to dismiss.
    pub fn bottom_sheet() -> Self {
        Self::default()
            .position(ModalPosition::Bottom)
            .swipe_direction(SwipeDirection::DOWN)
    }

    pub fn animation_in(mut self, animation: ModalAnimation) -> Self {
        self.animation_in = animation;
        self
    }

    pub fn animation_out(mut self, animation: ModalAnimation) -> Self {
        self.animation_out = animation;
        self
    }

    pub fn animation_in_ms(mut self, ms: u32) -> Self {
        self.animation_in_ms = ms;
        self
    }

    pub fn animation_out_ms(mut self, ms: u32) -> Self {
        self.animation_out_ms = ms;
        self
    }

    pub fn backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn has_backdrop(mut self, has_backdrop: bool) -> Self {
        self.has_backdrop = has_backdrop;
        self
    }

    pub fn cover_screen(mut self, cover_screen: bool) -> Self {
        self.cover_screen = cover_screen;
        self
    }

    pub fn position(mut self, position: ModalPosition) -> Self {
        self.position = position;
        self
    }

    pub fn swipe_direction(mut self, direction: SwipeDirection) -> Self {
        self.swipe_direction = direction;
        self
    }

    pub fn swipe_threshold(mut self, threshold: u16) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    pub fn avoid_keyboard(mut self, avoid: bool) -> Self {
        self.avoid_keyboard = avoid;
        self
    }

    pub fn hide_contents_while_animating(mut self, hide: bool) -> Self {
        self.hide_contents_while_animating = hide;
        self
    }

    pub fn animation_in_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.animation_in_ms))
    }

    pub fn animation_out_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.animation_out_ms))
    }

    /// Whether any swipe gesture may dismiss the modal.
    pub fn is_swipeable(&self) -> bool {
        !self.swipe_direction.is_empty()
    }
}

#[cfg(feature = "serde")]
mod swipe_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SwipeDirection;

    pub(super) fn serialize<S: Serializer>(
        direction: &SwipeDirection,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(direction.bits())
    }

    // Unknown bits are dropped rather than rejected.
    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<SwipeDirection, D::Error> {
        u8::deserialize(deserializer).map(SwipeDirection::from_bits_truncate)
    }
}
