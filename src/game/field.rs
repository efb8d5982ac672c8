use rand::Rng;

use super::pos::Pos;
use super::tile::{Tile, WallShape};

// Field geometry, top to bottom: car margin rows, the gated top wall, the
// scrollable wall section, and the hole area.
const MARGIN_TOP: usize = 3; // rows reserved for the car
const WALL_WIDTH: usize = 1; // left and right boundary walls
const HOLE_AREA_HEIGHT: usize = 4; // brim, two shaft rows, bottom wall
const TOP_HOLE_HEIGHT: usize = 2; // gate brim plus one blank row

/// Lateral spacing of hole slots; also the car's movement step.
pub const HOLE_DIST: usize = 3;

const SCROLL_LINE_HEIGHT: usize = 3; // two mirrored wall rows, one blank row

/// A goal slot in the bottom wall. Holds at most one ball, by roster index.
#[derive(Clone, Copy, Debug)]
pub struct Hole {
    pub pos: Pos,
    pub ball: Option<usize>,
}

/// The tile grid plus the cyclic scroll buffer windowed into it.
pub struct Field {
    width: usize,
    height: usize,
    top: usize,
    map: Vec<Tile>,
    scroll_width: usize,
    scroll_height: usize,
    scroll_lines: usize,
    scroll_pos: usize,
    scroll_map: Vec<Tile>,
    holes: Vec<Hole>,
}

impl Field {
    pub fn new(width: usize, height: usize) -> Self {
        let mut field = Field {
            width: 0,
            height: 0,
            top: 0,
            map: Vec::new(),
            scroll_width: 0,
            scroll_height: 0,
            scroll_lines: 0,
            scroll_pos: 0,
            scroll_map: Vec::new(),
            holes: Vec::new(),
        };
        field.resize(width, height);
        field
    }

    /// Reallocates both grids and derives the scroll-section geometry: the
    /// scroll area is whatever remains after the car margin, the gated top
    /// wall and the hole area, floored to a whole number of scroll lines;
    /// `top` absorbs the remainder so the rows still sum to `height`.
    pub fn resize(&mut self, width: usize, height: usize) {
        assert!(
            width > 2 * WALL_WIDTH + HOLE_DIST,
            "field too narrow for a hole slot"
        );
        assert!(
            height >= MARGIN_TOP + TOP_HOLE_HEIGHT + SCROLL_LINE_HEIGHT + HOLE_AREA_HEIGHT,
            "field too short for a scroll line"
        );

        let scroll_width = width - 2 * WALL_WIDTH;
        let scroll_lines =
            (height - HOLE_AREA_HEIGHT - MARGIN_TOP - TOP_HOLE_HEIGHT) / SCROLL_LINE_HEIGHT;
        let scroll_height = scroll_lines * SCROLL_LINE_HEIGHT;

        self.width = width;
        self.height = height;
        self.top = height - HOLE_AREA_HEIGHT - scroll_height - TOP_HOLE_HEIGHT;
        self.map = vec![Tile::Background; width * height];
        self.scroll_width = scroll_width;
        self.scroll_lines = scroll_lines;
        self.scroll_height = scroll_height;
        self.scroll_map = vec![Tile::Background; scroll_width * scroll_height];
        self.scroll_pos = 0;
        self.holes.clear();
    }

    /// Car start cell: one row above the top wall, centered on the middle
    /// hole slot.
    pub fn start_pos(&self) -> Pos {
        let holes = (self.width - 2) / HOLE_DIST;
        Pos::new((2 + (holes / 2) * HOLE_DIST) as i32, self.top as i32 - 1)
    }

    /// Tile at `p`, or `Background` anywhere outside the grid. Total; never
    /// errors.
    pub fn tile(&self, p: Pos) -> Tile {
        if p.x < 0 || p.y < 0 {
            return Tile::Background;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= self.width || y >= self.height {
            return Tile::Background;
        }
        self.map[y * self.width + x]
    }

    pub fn scroll_up(&mut self) {
        self.scroll_pos = (self.scroll_pos + SCROLL_LINE_HEIGHT) % self.scroll_height;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_pos =
            (self.scroll_pos + self.scroll_height - SCROLL_LINE_HEIGHT) % self.scroll_height;
    }

    /// Regenerates the scroll buffer: each line gets wall segments 2..=9
    /// tiles wide separated by single-tile gaps and clipped at the right
    /// edge, mirrored into the line's top and bottom rows. `level` is
    /// accepted for interface stability; generation does not scale with it.
    pub fn init_scroll_field(&mut self, _level: u32, rng: &mut impl Rng) {
        for line in 0..self.scroll_lines {
            let base = line * SCROLL_LINE_HEIGHT * self.scroll_width;
            self.scroll_map[base..base + SCROLL_LINE_HEIGHT * self.scroll_width]
                .fill(Tile::Background);

            let mut x = 0;
            while x < self.scroll_width {
                let mut w = rng.gen_range(2..=9);
                if x + w > self.scroll_width {
                    w = self.scroll_width - x;
                }
                for i in 0..w {
                    let col = x + i;
                    // Corner variants on segment ends, straight elsewhere;
                    // ends flush with the buffer edge stay straight.
                    let (top, bottom) = if i == 0 && x > 0 {
                        (WallShape::TopLeft, WallShape::BottomLeft)
                    } else if i < w - 1 || col == self.scroll_width - 1 {
                        (WallShape::Top, WallShape::Bottom)
                    } else {
                        (WallShape::TopRight, WallShape::BottomRight)
                    };
                    self.scroll_map[base + col] = Tile::Wall(top);
                    self.scroll_map[base + self.scroll_width + col] = Tile::Wall(bottom);
                }
                x += w + 1;
            }
        }
    }

    /// Windows the scroll buffer into the main grid below the top wall,
    /// reading rows circularly from `scroll_pos`.
    pub fn copy_scroll_field(&mut self) {
        let mut src_row = self.scroll_pos;
        for row in 0..self.scroll_height {
            if src_row >= self.scroll_height {
                src_row = 0;
            }
            let dst = (self.top + TOP_HOLE_HEIGHT + row) * self.width + WALL_WIDTH;
            let src = src_row * self.scroll_width;
            self.map[dst..dst + self.scroll_width]
                .copy_from_slice(&self.scroll_map[src..src + self.scroll_width]);
            src_row += 1;
        }
    }

    /// Builds a complete level: boundary walls, the bottom hole area with
    /// one registered [`Hole`] per slot, the gated top wall, then a freshly
    /// generated scroll section windowed in at offset zero.
    pub fn init_random(&mut self, level: u32, rng: &mut impl Rng) {
        let w = self.width;
        let h = self.height;

        self.map.fill(Tile::Background);
        self.holes.clear();

        // Side walls, inner faces toward the play area.
        for y in self.top..h - 1 {
            self.map[y * w] = Tile::Wall(WallShape::Right);
            self.map[y * w + w - 1] = Tile::Wall(WallShape::Left);
        }

        // Bottom boundary wall.
        self.map[(h - 1) * w..h * w].fill(Tile::Wall(WallShape::Top));
        self.map[(h - 1) * w] = Tile::Wall(WallShape::Mid);
        self.map[(h - 1) * w + w - 1] = Tile::Wall(WallShape::Mid);

        // Hole area: a brim row and two shaft rows, one slot every
        // HOLE_DIST columns; the lower shaft row carries the Hole tile.
        const SLOT: [[Tile; 3]; 3] = [
            [
                Tile::Wall(WallShape::TopRight),
                Tile::Background,
                Tile::Wall(WallShape::TopLeft),
            ],
            [
                Tile::Wall(WallShape::HoleLeft),
                Tile::Background,
                Tile::Wall(WallShape::HoleRight),
            ],
            [
                Tile::Wall(WallShape::HoleLeft),
                Tile::Hole,
                Tile::Wall(WallShape::HoleRight),
            ],
        ];
        let holes = (w - 2) / HOLE_DIST;
        let y = h - HOLE_AREA_HEIGHT;
        for i in 0..HOLE_AREA_HEIGHT - 1 {
            let row = (y + i) * w;
            self.map[row + 1..row + w - 1].fill(Tile::Wall(WallShape::Mid));
            for slot in 0..holes {
                let cell = row + slot * HOLE_DIST + 1;
                self.map[cell..cell + 3].copy_from_slice(&SLOT[i]);
                if i == HOLE_AREA_HEIGHT - 2 {
                    self.holes.push(Hole {
                        pos: Pos::new((slot * HOLE_DIST + 2) as i32, (y + i) as i32),
                        ball: None,
                    });
                }
            }
        }

        // Top wall with one gate opening over every hole slot.
        let row = self.top * w;
        self.map[row..row + w].fill(Tile::Wall(WallShape::Mid));
        for slot in 0..holes {
            let cell = row + slot * HOLE_DIST + 1;
            self.map[cell] = Tile::Wall(WallShape::BottomLeft);
            self.map[cell + 1] = Tile::Gate;
            self.map[cell + 2] = Tile::Wall(WallShape::BottomRight);
        }

        self.scroll_pos = 0;
        self.init_scroll_field(level, rng);
        self.copy_scroll_field();
    }

    /// Two-state latch keyed by hole position. An empty hole claims the
    /// ball and reports no match; an occupied hole releases its occupant,
    /// reopens, and reports who was evicted (the bust case). Positions not
    /// in the registry report no match and change nothing.
    pub fn fill_hole(&mut self, pos: Pos, ball: usize) -> Option<usize> {
        for hole in &mut self.holes {
            if hole.pos == pos {
                return match hole.ball.take() {
                    None => {
                        hole.ball = Some(ball);
                        None
                    }
                    Some(prev) => Some(prev),
                };
            }
        }
        None
    }

    /// True when every hole holds a ball: the level-complete condition.
    pub fn holes_filled(&self) -> bool {
        self.holes.iter().all(|h| h.ball.is_some())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row index of the gated top wall; the scroll section starts below it.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Row-major tile buffer.
    pub fn tiles(&self) -> &[Tile] {
        &self.map
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    pub fn scroll_pos(&self) -> usize {
        self.scroll_pos
    }
}
