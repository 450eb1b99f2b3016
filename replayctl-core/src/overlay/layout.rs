//! Badge geometry for the caption overlay.
//!
//! Pure layout math: the font size scales with the frame height, the text is
//! anchored to the bottom-left corner, and the badge rectangle surrounds the
//! text with fixed asymmetric padding. None of this is configurable.

use crate::external::VideoDimensions;

/// The font size is the frame height divided by this, floored.
pub const FONT_SCALE_DIVISOR: u32 = 45;

/// Horizontal offset of the text anchor from the left frame edge.
pub const TEXT_MARGIN_LEFT: i32 = 7;
/// Gap between the bottom of the text and the bottom frame edge.
pub const TEXT_MARGIN_BOTTOM: i32 = 5;

// Badge padding around the text anchor, per side.
pub const BADGE_PAD_LEFT: i32 = 10;
pub const BADGE_PAD_TOP: i32 = 12;
pub const BADGE_PAD_RIGHT: i32 = 6;
pub const BADGE_PAD_BOTTOM: i32 = 5;

/// Corner rounding of the badge rectangle, in pixels.
pub const BADGE_CORNER_RADIUS: f32 = 2.0;

/// Measured size of a shaped text run, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Computed placement of the caption text and its badge within the frame.
///
/// Coordinates may be negative (the badge extends further left than the text
/// anchor); the renderer clips to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeLayout {
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub rect_left: i32,
    pub rect_top: i32,
    pub rect_right: i32,
    pub rect_bottom: i32,
}

/// Caption font size for a frame of the given height.
pub fn font_size_for_height(height: u32) -> u32 {
    height / FONT_SCALE_DIVISOR
}

impl BadgeLayout {
    pub fn compute(dims: VideoDimensions, text: TextSize) -> Self {
        let anchor_x = TEXT_MARGIN_LEFT;
        let anchor_y = dims.height as i32 - text.height as i32 - TEXT_MARGIN_BOTTOM;
        Self {
            anchor_x,
            anchor_y,
            rect_left: anchor_x - BADGE_PAD_LEFT,
            rect_top: anchor_y - BADGE_PAD_TOP,
            rect_right: anchor_x + text.width as i32 + BADGE_PAD_RIGHT,
            rect_bottom: anchor_y + text.height as i32 + BADGE_PAD_BOTTOM,
        }
    }
}
