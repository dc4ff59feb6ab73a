//! Input translation
//!
//! Keyboard, touch and on-screen buttons all reduce to an [`Intent`]. Intents
//! only ever write into [`TickInput`]; the simulation reads it.

use crate::consts::{CENTER_LANE, LANE_COUNT};
use crate::sim::TickInput;

/// Touches shorter than this may be swipes
pub const SWIPE_MAX_MS: f64 = 500.0;
/// Minimum horizontal travel for a swipe
pub const SWIPE_MIN_DX: f32 = 40.0;
/// Screen fraction on each side that maps a tap to a lane change
pub const TAP_SIDE_FRACTION: f32 = 0.4;

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// One lane to the left
    LaneLeft,
    /// Straight to the middle lane
    LaneCenter,
    /// One lane to the right
    LaneRight,
    Boost,
}

impl TickInput {
    /// Fold an intent into the pending input, keeping the lane in range
    pub fn apply(&mut self, intent: Intent) {
        let lane = self.lane_target.min(LANE_COUNT - 1);
        match intent {
            Intent::LaneLeft => self.lane_target = lane.saturating_sub(1),
            Intent::LaneCenter => self.lane_target = CENTER_LANE,
            Intent::LaneRight => self.lane_target = (lane + 1).min(LANE_COUNT - 1),
            Intent::Boost => self.boost = true,
        }
    }
}

/// Keyboard mapping (`KeyboardEvent.key` values)
pub fn intent_for_key(key: &str) -> Option<Intent> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Intent::LaneLeft),
        "ArrowRight" | "d" | "D" => Some(Intent::LaneRight),
        "ArrowDown" | "s" | "S" => Some(Intent::LaneCenter),
        "ArrowUp" | "w" | "W" | " " => Some(Intent::Boost),
        _ => None,
    }
}

/// On-screen button mapping (element ids)
pub fn intent_for_button(id: &str) -> Option<Intent> {
    match id {
        "btn-left" => Some(Intent::LaneLeft),
        "btn-center" => Some(Intent::LaneCenter),
        "btn-right" => Some(Intent::LaneRight),
        "btn-boost" => Some(Intent::Boost),
        _ => None,
    }
}

/// A touch sample in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub time_ms: f64,
}

/// Swipe or tap. Short, mostly-horizontal drags past the threshold are
/// swipes; anything else is a tap mapped by where the touch started.
pub fn classify_touch(start: TouchPoint, end: TouchPoint, screen_width: f32) -> Intent {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let duration = end.time_ms - start.time_ms;

    if duration < SWIPE_MAX_MS && dx.abs() > SWIPE_MIN_DX && dx.abs() > dy.abs() {
        return if dx < 0.0 {
            Intent::LaneLeft
        } else {
            Intent::LaneRight
        };
    }

    let width = screen_width.max(1.0);
    if start.x < width * TAP_SIDE_FRACTION {
        Intent::LaneLeft
    } else if start.x > width * (1.0 - TAP_SIDE_FRACTION) {
        Intent::LaneRight
    } else {
        Intent::Boost
    }
}
