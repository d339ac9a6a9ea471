//! Pointer-device input as sent by the host.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// Pointer position normalized to `[0,1]²` plus a button bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub pos: Vec2,
    pub buttons: u8,
}

impl PointerState {
    pub const PRIMARY: u8 = 1;
    pub const MIDDLE: u8 = 2;
    pub const SECONDARY: u8 = 4;

    pub fn new(pos: Vec2, buttons: u8) -> Self {
        Self { pos, buttons }
    }

    pub fn primary(&self) -> bool {
        self.buttons & Self::PRIMARY != 0
    }

    pub fn any_button(&self) -> bool {
        self.buttons != 0
    }
}
