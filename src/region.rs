use serde::Deserialize;
use serde::Serialize;

use crate::prelude::Float;
use crate::prelude::MVec;

pub const NUM_QUADRANTS: usize = 4;

/// An axis-aligned rectangle given by its origin (the corner with the
/// smallest coordinates) and its side lengths.
#[derive(Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: Float,
    pub y: Float,
    pub width: Float,
    pub height: Float,
}

impl Region {
    pub fn new(x: Float, y: Float, width: Float, height: Float) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: Float, height: Float) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn min(&self) -> MVec {
        MVec::new(self.x, self.y)
    }

    pub fn max(&self) -> MVec {
        MVec::new(self.x + self.width, self.y + self.height)
    }

    /// Inclusive on all four edges. A position exactly on the line
    /// between two sibling quadrants is contained in both of them.
    /// Evaluates to false for NaN coordinates and for regions with
    /// negative side lengths.
    pub fn contains(&self, pos: &MVec) -> bool {
        self.x <= pos.x
            && pos.x <= self.x + self.width
            && self.y <= pos.y
            && pos.y <= self.y + self.height
    }

    /// Returns the four quadrants in the order
    /// top left, top right, bottom left, bottom right
    /// (with y pointing downwards, as in screen coordinates).
    pub fn get_quadrants(&self) -> [Self; NUM_QUADRANTS] {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let center_x = self.x + half_width;
        let center_y = self.y + half_height;
        [
            Self::new(self.x, self.y, half_width, half_height),
            Self::new(center_x, self.y, half_width, half_height),
            Self::new(self.x, center_y, half_width, half_height),
            Self::new(center_x, center_y, half_width, half_height),
        ]
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Region({:.3?} {:.3?})",
            self.min().to_array(),
            self.max().to_array()
        )
    }
}
