use super::ball::{Ball, BallState};
use super::car::Car;
use super::field::{Field, HOLE_DIST};
use super::input::Keys;
use super::pos::Dir;
use super::tile::Tile;

pub const FIELD_WIDTH: usize = 29;
pub const FIELD_HEIGHT: usize = 24;

/// Balls granted per level.
pub const ROSTER_SIZE: usize = 20;

const BALL_SPEED: u32 = 4; // ticks per one-cell move
const GOAL_POINTS: u32 = 10;

/// The per-tick game driver. One [`poll`](Engine::poll) call advances ball
/// physics, checks level progression, and applies that tick's keymask, in
/// that order; everything it mutates is observable through the read
/// accessors afterwards.
pub struct Engine {
    field: Field,
    car: Car,
    balls: [Ball; ROSTER_SIZE],
    next_ball: usize,
    last_keys: Keys,
    level: u32,
    points: u32,
}

impl Engine {
    pub fn new() -> Self {
        let field = Field::new(FIELD_WIDTH, FIELD_HEIGHT);
        let start = field.start_pos();
        let mut engine = Engine {
            field,
            car: Car::new(start),
            balls: [Ball::new(start); ROSTER_SIZE],
            next_ball: 0,
            last_keys: Keys::NONE,
            level: 0,
            points: 0,
        };
        engine.init_level(0);
        engine
    }

    /// One simulation tick. Progression checks run on the state as the
    /// balls left it, before this tick's input is applied, so a completed
    /// level cannot be masked by a key press in the same tick.
    pub fn poll(&mut self, keys: Keys) {
        self.handle_balls();
        if self.field.holes_filled() {
            self.init_level(self.level + 1);
        } else if self.roster_spent() {
            self.init_level(0);
        }
        self.handle_keys(keys);
    }

    /// Resets everything except the score: new field layout, fresh roster,
    /// car back on the start slot.
    pub fn init_level(&mut self, level: u32) {
        self.level = level;
        self.next_ball = 0;
        self.field.init_random(level, &mut rand::thread_rng());
        let start = self.field.start_pos();
        self.balls = [Ball::new(start); ROSTER_SIZE];
        self.car = Car::new(start);
    }

    /// The next ball to fire rides the car while latched; everything else
    /// is edge-triggered, acting only when the mask differs from the
    /// previous tick's, so a held key does not repeat.
    fn handle_keys(&mut self, keys: Keys) {
        if let Some(ball) = self.balls.get_mut(self.next_ball) {
            ball.pos = self.car.pos;
            ball.state = BallState::Latched;
        }

        if keys == self.last_keys {
            return;
        }

        if keys.intersects(Keys::LEFT) && self.car.x() > (1 + HOLE_DIST) as i32 {
            self.car.pos.x -= HOLE_DIST as i32;
        }
        if keys.intersects(Keys::RIGHT)
            && self.car.x() < (self.field.width() - 2 - HOLE_DIST) as i32
        {
            self.car.pos.x += HOLE_DIST as i32;
        }

        if keys.intersects(Keys::FIRE) {
            if let Some(ball) = self.balls.get_mut(self.next_ball) {
                ball.pos = self.car.pos;
                ball.state = BallState::Active;
                ball.dir = Dir::Down;
                self.next_ball += 1;
            }
        }

        // The obstacle layout never shifts under a falling ball.
        if keys.intersects(Keys::UP | Keys::DOWN) && !self.any_ball_active() {
            if keys.intersects(Keys::UP) {
                self.field.scroll_up();
            }
            if keys.intersects(Keys::DOWN) {
                self.field.scroll_down();
            }
            self.field.copy_scroll_field();
        }

        self.last_keys = keys;
    }

    /// Active balls move one cell per BALL_SPEED ticks. Only a Hole tile
    /// reacts to the landing; walls and gates let the ball pass.
    fn handle_balls(&mut self) {
        for i in 0..self.balls.len() {
            if self.balls[i].state != BallState::Active {
                continue;
            }
            self.balls[i].sub_pos += 1;
            if self.balls[i].sub_pos < BALL_SPEED {
                continue;
            }
            self.balls[i].sub_pos = 0;
            let pos = self.balls[i].pos.step(self.balls[i].dir);
            self.balls[i].pos = pos;
            if self.field.tile(pos) == Tile::Hole {
                match self.field.fill_hole(pos, i) {
                    None => {
                        self.balls[i].state = BallState::Goal;
                        self.points += GOAL_POINTS;
                    }
                    Some(other) => {
                        self.balls[i].state = BallState::Bust;
                        self.balls[other].state = BallState::Bust;
                    }
                }
            }
        }
    }

    fn any_ball_active(&self) -> bool {
        self.balls.iter().any(|b| b.state == BallState::Active)
    }

    fn roster_spent(&self) -> bool {
        self.balls.iter().all(|b| !b.in_play())
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Balls not yet fired this level, the latched one included.
    pub fn balls_left(&self) -> usize {
        self.balls.len() - self.next_ball
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::pos::Pos;

    // One full descent: the car starts at (14, 2) on a 29x24 field and the
    // hole row sits at y = 22, twenty cells down.
    const DROP_TICKS: u32 = 20 * BALL_SPEED;

    fn drop_ball(engine: &mut Engine) {
        engine.poll(Keys::FIRE);
        for _ in 0..DROP_TICKS {
            engine.poll(Keys::NONE);
        }
    }

    #[test]
    fn fire_edge_promotes_latched_ball() {
        let mut engine = Engine::new();
        assert_eq!(engine.balls()[0].state, BallState::Fresh);
        assert_eq!(engine.balls_left(), ROSTER_SIZE);

        engine.poll(Keys::NONE);
        assert_eq!(engine.balls()[0].state, BallState::Latched);
        assert_eq!(engine.balls()[0].pos, engine.car().pos);

        engine.poll(Keys::FIRE);
        assert_eq!(engine.balls()[0].state, BallState::Active);
        assert_eq!(engine.balls()[0].dir, Dir::Down);
        assert_eq!(engine.balls_left(), ROSTER_SIZE - 1);

        // The next ball takes the latch on the following tick.
        assert_eq!(engine.balls()[1].state, BallState::Fresh);
        engine.poll(Keys::NONE);
        assert_eq!(engine.balls()[1].state, BallState::Latched);
    }

    #[test]
    fn ball_scores_in_empty_hole() {
        let mut engine = Engine::new();
        engine.poll(Keys::FIRE);

        // Halfway down the ball has crossed the gate and several wall rows
        // without reacting to any of them.
        for _ in 0..DROP_TICKS / 2 {
            engine.poll(Keys::NONE);
        }
        assert_eq!(engine.balls()[0].state, BallState::Active);
        assert_eq!(engine.balls()[0].pos, Pos::new(14, 12));

        for _ in 0..DROP_TICKS / 2 {
            engine.poll(Keys::NONE);
        }
        assert_eq!(engine.balls()[0].state, BallState::Goal);
        assert_eq!(engine.balls()[0].pos, Pos::new(14, 22));
        assert_eq!(engine.points(), 10);
        assert_eq!(engine.field().holes()[4].ball, Some(0));
    }

    #[test]
    fn contended_hole_busts_both() {
        let mut engine = Engine::new();
        drop_ball(&mut engine);
        assert_eq!(engine.balls()[0].state, BallState::Goal);
        assert_eq!(engine.points(), 10);

        // Second ball into the same hole: both bust, the hole reopens and
        // no further points are awarded.
        drop_ball(&mut engine);
        assert_eq!(engine.balls()[0].state, BallState::Bust);
        assert_eq!(engine.balls()[1].state, BallState::Bust);
        assert_eq!(engine.points(), 10);
        assert_eq!(engine.field().holes()[4].ball, None);
    }

    #[test]
    fn held_mask_acts_once() {
        let mut engine = Engine::new();
        let start_x = engine.car().x();

        engine.poll(Keys::LEFT);
        assert_eq!(engine.car().x(), start_x - 3);
        for _ in 0..5 {
            engine.poll(Keys::LEFT);
        }
        assert_eq!(engine.car().x(), start_x - 3);

        // Release then press again: a fresh edge.
        engine.poll(Keys::NONE);
        engine.poll(Keys::LEFT);
        assert_eq!(engine.car().x(), start_x - 6);

        let active = |engine: &Engine| {
            engine
                .balls()
                .iter()
                .filter(|b| b.state == BallState::Active)
                .count()
        };
        engine.poll(Keys::FIRE);
        assert_eq!(active(&engine), 1);
        engine.poll(Keys::FIRE);
        assert_eq!(active(&engine), 1);
    }

    #[test]
    fn car_clamps_at_rails() {
        let mut engine = Engine::new();
        assert_eq!(engine.car().pos, Pos::new(14, 2));

        for _ in 0..8 {
            engine.poll(Keys::LEFT);
            engine.poll(Keys::NONE);
        }
        assert_eq!(engine.car().x(), 2);

        for _ in 0..10 {
            engine.poll(Keys::RIGHT);
            engine.poll(Keys::NONE);
        }
        assert_eq!(engine.car().x(), 26);
        assert_eq!(engine.car().pos.y, 2);
    }

    #[test]
    fn scroll_locked_while_ball_falls() {
        let mut engine = Engine::new();
        engine.poll(Keys::UP);
        assert_eq!(engine.field().scroll_pos(), 3);

        engine.poll(Keys::NONE);
        engine.poll(Keys::FIRE);
        engine.poll(Keys::UP);
        assert_eq!(engine.field().scroll_pos(), 3);

        // Once the ball settles the lock lifts.
        for _ in 0..DROP_TICKS {
            engine.poll(Keys::NONE);
        }
        assert_eq!(engine.balls()[0].state, BallState::Goal);
        engine.poll(Keys::UP);
        assert_eq!(engine.field().scroll_pos(), 6);
    }

    #[test]
    fn filled_holes_advance_level() {
        let mut engine = Engine::new();
        engine.points = 90;
        let positions: Vec<Pos> = engine.field().holes().iter().map(|h| h.pos).collect();
        for (ball, pos) in positions.into_iter().enumerate() {
            engine.field.fill_hole(pos, ball);
        }

        engine.poll(Keys::NONE);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.points(), 90);
        assert!(!engine.field().holes_filled());
        assert_eq!(engine.balls_left(), ROSTER_SIZE);
    }

    #[test]
    fn game_over_resets_level_not_points() {
        let mut engine = Engine::new();
        engine.level = 3;
        engine.points = 70;
        for ball in &mut engine.balls {
            ball.state = BallState::Bust;
        }

        engine.poll(Keys::NONE);
        assert_eq!(engine.level(), 0);
        assert_eq!(engine.points(), 70);
        assert!(engine
            .balls()
            .iter()
            .all(|b| matches!(b.state, BallState::Fresh | BallState::Latched)));
    }

    #[test]
    fn fire_with_spent_roster_is_noop() {
        let mut engine = Engine::new();
        engine.next_ball = ROSTER_SIZE;
        engine.balls[ROSTER_SIZE - 1].state = BallState::Active;
        engine.balls[ROSTER_SIZE - 1].pos = Pos::new(14, 5);

        engine.poll(Keys::FIRE);
        assert_eq!(engine.balls_left(), 0);
        assert_eq!(engine.points(), 0);
        assert_eq!(engine.level(), 0);
    }
}
