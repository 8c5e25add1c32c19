//! Stacked card geometry
//!
//! The current card sits on top. Up to two neighbours on each side recede
//! behind it: smaller, dimmer, further back and tilted toward their side.
//! Anything further away is not drawn.

use crate::navigator::Direction;
use serde::{Deserialize, Serialize};

/// Furthest cyclic distance from the current card that is still drawn
pub const MAX_VISIBLE_DISTANCE: usize = 2;

/// Stack order of the card on top
pub const TOP_STACK_ORDER: i32 = 10;

/// Visual placement of one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardTransform {
    pub offset_x: f32,
    pub offset_y: f32,
    pub depth_z: f32,
    /// Degrees, positive is clockwise
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Higher draws on top
    pub stack_order: i32,
}

impl CardTransform {
    pub const IDENTITY: CardTransform = CardTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        depth_z: 0.0,
        rotation: 0.0,
        scale: 1.0,
        opacity: 1.0,
        stack_order: TOP_STACK_ORDER,
    };

    /// Where the top card goes while it leaves in `direction`
    pub fn fly_away(direction: Direction, index: usize) -> Self {
        let mut t = Self {
            opacity: 0.0,
            ..Self::IDENTITY
        };
        match direction {
            Direction::Next => {
                t.offset_x = -1000.0;
                t.rotation = -10.0;
            }
            Direction::Previous => {
                t.offset_x = 1000.0;
                t.rotation = 10.0;
            }
            Direction::Shuffle => {
                t.offset_y = -200.0;
                t.rotation = if index % 2 == 1 { 120.0 } else { -120.0 };
                t.scale = 0.8;
            }
        }
        t
    }

    /// Receding placement for a card `distance` steps away
    ///
    /// `ahead` tilts the card right, otherwise left.
    pub fn receding(distance: usize, ahead: bool) -> Self {
        let d = distance as f32;
        let side = if ahead { 1.0 } else { -1.0 };
        Self {
            offset_x: 5.0 * side * d,
            offset_y: -10.0 * d,
            depth_z: -20.0 * d,
            rotation: 5.0 * side * d,
            scale: 1.0 - 0.05 * d,
            opacity: 1.0 - 0.2 * d,
            stack_order: TOP_STACK_ORDER - distance as i32,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Minimum of the forward and backward distances between two positions
pub fn cyclic_distance(index: usize, current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let forward = (index + len - current % len) % len;
    let backward = (current + len - index % len) % len;
    forward.min(backward)
}

/// True when `index` is reached sooner by moving forward from `current`
pub fn is_ahead(index: usize, current: usize, len: usize) -> bool {
    if len == 0 {
        return false;
    }
    let forward = (index + len - current % len) % len;
    let backward = (current + len - index % len) % len;
    forward <= backward
}

/// Placement of `index` given the deck position and any direction in flight
///
/// Returns `None` for an empty deck, an out of range index, or a card more
/// than [`MAX_VISIBLE_DISTANCE`] away from the current one.
pub fn transform_for(
    index: usize,
    current: usize,
    len: usize,
    direction: Option<Direction>,
) -> Option<CardTransform> {
    if len == 0 || index >= len || current >= len {
        return None;
    }

    let distance = cyclic_distance(index, current, len);
    if distance > MAX_VISIBLE_DISTANCE {
        return None;
    }

    if distance == 0 {
        return Some(match direction {
            Some(dir) => CardTransform::fly_away(dir, index),
            None => CardTransform::IDENTITY,
        });
    }

    Some(CardTransform::receding(
        distance,
        is_ahead(index, current, len),
    ))
}
