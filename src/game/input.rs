use std::ops::{BitOr, BitOrAssign};

/// One tick's worth of pressed controls, packed so the engine can compare
/// whole masks for edge detection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Keys(u8);

impl Keys {
    pub const NONE: Keys = Keys(0);
    pub const LEFT: Keys = Keys(0x01);
    pub const RIGHT: Keys = Keys(0x02);
    pub const UP: Keys = Keys(0x04);
    pub const DOWN: Keys = Keys(0x08);
    pub const FIRE: Keys = Keys(0x10);

    /// True when every bit of `keys` is set in `self`.
    pub fn contains(self, keys: Keys) -> bool {
        self.0 & keys.0 == keys.0
    }

    /// True when any bit of `keys` is set in `self`.
    pub fn intersects(self, keys: Keys) -> bool {
        self.0 & keys.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Keys {
    type Output = Keys;

    fn bitor(self, rhs: Keys) -> Keys {
        Keys(self.0 | rhs.0)
    }
}

impl BitOrAssign for Keys {
    fn bitor_assign(&mut self, rhs: Keys) {
        self.0 |= rhs.0;
    }
}
