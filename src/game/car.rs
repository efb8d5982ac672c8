use super::pos::Pos;

/// The launcher riding above the field. Moves only horizontally, snapped to
/// the hole spacing.
#[derive(Clone, Copy, Debug)]
pub struct Car {
    pub pos: Pos,
}

impl Car {
    pub fn new(pos: Pos) -> Self {
        Self { pos }
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }
}
