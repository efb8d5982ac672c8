use super::pos::{Dir, Pos};

/// `Fresh -> Latched -> Active -> {Goal | Bust}`; the last two are terminal
/// for the remainder of the level.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BallState {
    Fresh,
    Latched,
    Active,
    Goal,
    Bust,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BallKind {
    Normal,
}

#[derive(Clone, Copy, Debug)]
pub struct Ball {
    pub pos: Pos,
    pub kind: BallKind,
    pub state: BallState,
    pub dir: Dir,
    /// Ticks accumulated toward the next full-cell move.
    pub sub_pos: u32,
}

impl Ball {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            kind: BallKind::Normal,
            state: BallState::Fresh,
            dir: Dir::Down,
            sub_pos: 0,
        }
    }

    /// Not yet terminal this level.
    pub fn in_play(&self) -> bool {
        matches!(
            self.state,
            BallState::Fresh | BallState::Latched | BallState::Active
        )
    }
}
