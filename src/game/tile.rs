/// One grid cell. Tiles are plain data; the grid position is their only
/// identity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Background,
    Wall(WallShape),
    Gate,
    Hole,
}

/// Render orientation of a wall cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WallShape {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    HoleLeft,
    HoleRight,
    Mid,
}

const TYPE_SHIFT: u32 = 6;

impl Tile {
    /// Boundary byte form: `(type << 6) | variant`. Only the rendering
    /// boundary deals in packed bytes; everything inside the core matches
    /// on the enum.
    pub fn pack(self) -> u8 {
        match self {
            Tile::Background => 0,
            Tile::Wall(shape) => (1 << TYPE_SHIFT) | shape as u8,
            Tile::Gate => 2 << TYPE_SHIFT,
            Tile::Hole => 3 << TYPE_SHIFT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_byte_layout() {
        assert_eq!(Tile::Background.pack(), 0x00);
        assert_eq!(Tile::Wall(WallShape::Top).pack(), 0x40);
        assert_eq!(Tile::Wall(WallShape::HoleLeft).pack(), 0x48);
        assert_eq!(Tile::Wall(WallShape::Mid).pack(), 0x4A);
        assert_eq!(Tile::Gate.pack(), 0x80);
        assert_eq!(Tile::Hole.pack(), 0xC0);
    }
}
