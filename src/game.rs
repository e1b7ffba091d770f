//! Core snake simulation: one `tick()` per move, no rendering or audio.
//!
//! The grid is derived from the window size and a fixed block size. The two
//! modes share the integration loop and differ in boundary handling, growth
//! progression and speed scaling.

use macroquad::rand::gen_range;

/// Side of one grid cell in pixels.
pub const BLOCK: i32 = 10;
/// Ticks per second at the start of a run, both modes.
pub const INITIAL_SPEED: f32 = 5.0;
/// Border crossings a Classic Easy snake survives.
pub const MAX_HEARTS: u32 = 3;
/// Every this many foods a bonus pickup appears.
const BONUS_THRESHOLD: u32 = 5;
/// Bonus pickup radius in pixels (1.25 blocks).
const BONUS_RADIUS: f32 = BLOCK as f32 * 1.25;
/// Food and bonuses keep this many cells away from the edges.
const SPAWN_MARGIN: i32 = 6;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mode {
    ClassicEasy,
    ModernHard,
}

impl Mode {
    /// Ticks-per-second ceiling for the mode.
    pub fn speed_cap(self) -> f32 {
        match self {
            Mode::ClassicEasy => 60.0,
            Mode::ModernHard => 600.0,
        }
    }

    fn speed_gain(self) -> f32 {
        match self {
            Mode::ClassicEasy => 0.75,
            Mode::ModernHard => 2.0,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// What happened during a tick, so the app layer can play sounds and
/// persist records without the simulation knowing about either.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    AteFood,
    AteBonus,
    NewHighScore(u32),
    Died,
}

pub struct SnakeGame {
    pub mode: Mode,
    grid_w: i32,
    grid_h: i32,
    /// Head first, tail last.
    pub snake: Vec<Cell>,
    target_len: usize,
    direction: Option<Direction>,
    next_direction: Option<Direction>,
    pub food: Cell,
    pub bonus: Option<Cell>,
    foods_until_bonus: u32,
    growth_step: u32,
    pub score: u32,
    pub high_score: u32,
    /// True once this run has beaten the stored high score.
    pub record: bool,
    pub speed: f32,
    pub hearts: u32,
    pub alive: bool,
}

impl SnakeGame {
    pub fn new(mode: Mode, grid_w: i32, grid_h: i32, high_score: u32) -> Self {
        let start = Cell {
            x: grid_w / 2,
            y: grid_h / 2,
        };
        let snake = vec![start];
        let food = spawn_pickup(grid_w, grid_h, &snake, None);
        Self {
            mode,
            grid_w,
            grid_h,
            snake,
            target_len: 1,
            direction: None,
            next_direction: None,
            food,
            bonus: None,
            foods_until_bonus: BONUS_THRESHOLD,
            growth_step: 1,
            score: 0,
            high_score,
            record: false,
            speed: INITIAL_SPEED,
            hearts: MAX_HEARTS,
            alive: true,
        }
    }

    pub fn grid_size(&self) -> (i32, i32) {
        (self.grid_w, self.grid_h)
    }

    /// Seconds between ticks at the current speed.
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.speed as f64
    }

    /// Buffer a direction change for the next tick. Reversing onto the
    /// snake's own neck is ignored, matching classic arcade behavior.
    pub fn steer(&mut self, dir: Direction) {
        if self.direction == Some(dir.opposite()) {
            return;
        }
        self.next_direction = Some(dir);
    }

    /// Advance the simulation by one move. The snake stays put until the
    /// first steer of the run.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.alive {
            return events;
        }
        if let Some(next) = self.next_direction.take() {
            self.direction = Some(next);
        }
        let Some(dir) = self.direction else {
            return events;
        };

        let head = self.snake[0];
        let (dx, dy) = dir.delta();
        let mut new_head = Cell {
            x: head.x + dx,
            y: head.y + dy,
        };

        if self.out_of_bounds(new_head) {
            match self.mode {
                Mode::ClassicEasy => {
                    // Crossing the border wraps around but costs a heart.
                    self.hearts -= 1;
                    if self.hearts == 0 {
                        self.die(&mut events);
                        return events;
                    }
                    new_head = self.wrap(new_head);
                }
                Mode::ModernHard => {
                    self.die(&mut events);
                    return events;
                }
            }
        }

        if self.snake.contains(&new_head) {
            self.die(&mut events);
            return events;
        }

        self.snake.insert(0, new_head);

        if new_head == self.food {
            self.eat_food(&mut events);
        }

        if let Some(bonus) = self.bonus {
            if bonus_overlaps(new_head, bonus) {
                self.bonus = None;
                self.shrink();
                events.push(GameEvent::AteBonus);
            }
        }

        while self.snake.len() > self.target_len {
            self.snake.pop();
        }

        events
    }

    fn eat_food(&mut self, events: &mut Vec<GameEvent>) {
        self.score += self.growth_step;
        self.target_len += self.growth_step as usize;

        if self.mode == Mode::ModernHard {
            // Score advances in an arithmetic progression: 1, 3, 5, ...
            self.growth_step += 2;
        }

        self.speed = (self.speed + self.mode.speed_gain()).min(self.mode.speed_cap());

        // The counter saturates at zero while a bonus sits uncollected, so
        // the first food after collecting one spawns the next.
        self.foods_until_bonus = self.foods_until_bonus.saturating_sub(1);
        if self.foods_until_bonus == 0 && self.bonus.is_none() {
            self.bonus =
                Some(spawn_pickup(self.grid_w, self.grid_h, &self.snake, Some(self.food)));
            self.foods_until_bonus = BONUS_THRESHOLD;
        }

        self.food = spawn_pickup(self.grid_w, self.grid_h, &self.snake, self.bonus);
        events.push(GameEvent::AteFood);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.record = true;
            events.push(GameEvent::NewHighScore(self.score));
        }
    }

    /// Bonus pickups trade length for maneuverability: Classic Easy drops
    /// three segments, Modern Hard halves the snake. Length never goes
    /// below one.
    fn shrink(&mut self) {
        self.target_len = match self.mode {
            Mode::ClassicEasy => self.target_len.saturating_sub(3).max(1),
            Mode::ModernHard => (self.target_len / 2).max(1),
        };
        self.snake.truncate(self.target_len);
    }

    fn die(&mut self, events: &mut Vec<GameEvent>) {
        self.alive = false;
        events.push(GameEvent::Died);
    }

    fn out_of_bounds(&self, c: Cell) -> bool {
        c.x < 0 || c.y < 0 || c.x >= self.grid_w || c.y >= self.grid_h
    }

    fn wrap(&self, c: Cell) -> Cell {
        Cell {
            x: c.x.rem_euclid(self.grid_w),
            y: c.y.rem_euclid(self.grid_h),
        }
    }
}

/// Pick a free cell inside the spawn margin, avoiding the snake and the
/// other pickup.
fn spawn_pickup(grid_w: i32, grid_h: i32, occupied: &[Cell], avoid: Option<Cell>) -> Cell {
    let mx = SPAWN_MARGIN.min((grid_w - 2) / 2);
    let my = SPAWN_MARGIN.min((grid_h - 2) / 2);
    loop {
        let cell = Cell {
            x: gen_range(mx, grid_w - mx),
            y: gen_range(my, grid_h - my),
        };
        if occupied.contains(&cell) || avoid == Some(cell) {
            continue;
        }
        return cell;
    }
}

/// Circle-vs-head overlap in pixel space, matching the rendered sizes.
fn bonus_overlaps(head: Cell, bonus: Cell) -> bool {
    let half = BLOCK as f32 / 2.0;
    let dx = (head.x - bonus.x) as f32 * BLOCK as f32;
    let dy = (head.y - bonus.y) as f32 * BLOCK as f32;
    dx.hypot(dy) < BONUS_RADIUS + half
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn game(mode: Mode) -> SnakeGame {
        macroquad::rand::srand(7);
        SnakeGame::new(mode, 40, 30, 0)
    }

    /// Park the food somewhere the snake is not about to visit.
    fn move_food_away(g: &mut SnakeGame) {
        g.food = Cell { x: 1, y: 1 };
        g.bonus = None;
    }

    #[test]
    #[serial]
    fn snake_waits_for_first_steer() {
        let mut g = game(Mode::ClassicEasy);
        let head = g.snake[0];
        assert!(g.tick().is_empty());
        assert_eq!(g.snake[0], head);
    }

    #[test]
    #[serial]
    fn score_increments_on_food_contact() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        g.food = Cell {
            x: g.snake[0].x + 1,
            y: g.snake[0].y,
        };
        g.steer(Direction::Right);
        let events = g.tick();
        assert!(events.contains(&GameEvent::AteFood));
        assert_eq!(g.score, 1);
        assert_eq!(g.target_len, 2);
    }

    #[test]
    #[serial]
    fn modern_growth_step_is_arithmetic() {
        let mut g = game(Mode::ModernHard);
        g.steer(Direction::Right);
        for expected in [1, 4, 9] {
            g.food = Cell {
                x: g.snake[0].x + 1,
                y: g.snake[0].y,
            };
            g.tick();
            assert_eq!(g.score, expected);
        }
        // 1 + 3 + 5: perfect squares.
        assert_eq!(g.growth_step, 7);
    }

    #[test]
    #[serial]
    fn classic_growth_step_stays_one() {
        let mut g = game(Mode::ClassicEasy);
        g.steer(Direction::Right);
        for expected in [1, 2, 3] {
            g.food = Cell {
                x: g.snake[0].x + 1,
                y: g.snake[0].y,
            };
            g.tick();
            assert_eq!(g.score, expected);
        }
    }

    #[test]
    #[serial]
    fn speed_caps_at_mode_maximum() {
        let mut g = game(Mode::ClassicEasy);
        g.steer(Direction::Right);
        for _ in 0..200 {
            g.food = Cell {
                x: g.snake[0].x + 1,
                y: g.snake[0].y,
            };
            g.tick();
            if !g.alive {
                break;
            }
        }
        assert!(g.speed <= Mode::ClassicEasy.speed_cap());
        assert!(g.speed > INITIAL_SPEED);
    }

    #[test]
    #[serial]
    fn classic_border_wraps_and_costs_a_heart() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        g.snake = vec![Cell { x: 39, y: 15 }];
        g.steer(Direction::Right);
        g.tick();
        assert!(g.alive);
        assert_eq!(g.hearts, MAX_HEARTS - 1);
        assert_eq!(g.snake[0], Cell { x: 0, y: 15 });
    }

    #[test]
    #[serial]
    fn classic_third_crossing_is_fatal() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        g.snake = vec![Cell { x: 39, y: 15 }];
        g.steer(Direction::Right);
        let mut died = false;
        for _ in 0..200 {
            if g.tick().contains(&GameEvent::Died) {
                died = true;
                break;
            }
        }
        assert!(died);
        assert_eq!(g.hearts, 0);
        assert!(!g.alive);
    }

    #[test]
    #[serial]
    fn modern_border_is_fatal() {
        let mut g = game(Mode::ModernHard);
        move_food_away(&mut g);
        g.snake = vec![Cell { x: 39, y: 15 }];
        g.steer(Direction::Right);
        assert!(g.tick().contains(&GameEvent::Died));
        assert!(!g.alive);
    }

    #[test]
    #[serial]
    fn self_collision_is_fatal() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        // A hook shape: moving up from the head runs into the body.
        g.snake = vec![
            Cell { x: 10, y: 10 },
            Cell { x: 10, y: 9 },
            Cell { x: 11, y: 9 },
            Cell { x: 11, y: 10 },
        ];
        g.target_len = 4;
        g.direction = Some(Direction::Left);
        g.steer(Direction::Up);
        assert!(g.tick().contains(&GameEvent::Died));
    }

    #[test]
    #[serial]
    fn reversal_is_rejected() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        g.steer(Direction::Right);
        g.tick();
        g.steer(Direction::Left);
        let head = g.snake[0];
        g.tick();
        // Still moving right.
        assert_eq!(g.snake[0], Cell { x: head.x + 1, y: head.y });
    }

    #[test]
    #[serial]
    fn bonus_spawns_after_five_foods() {
        let mut g = game(Mode::ClassicEasy);
        g.steer(Direction::Right);
        let mut last_events = Vec::new();
        for i in 0..5 {
            assert!(g.bonus.is_none(), "no bonus after {i} foods");
            g.food = Cell {
                x: g.snake[0].x + 1,
                y: g.snake[0].y,
            };
            last_events = g.tick();
        }
        // The 5th food spawns the bonus; a spawn right next to the head
        // counts as collected in the same tick.
        assert!(g.bonus.is_some() || last_events.contains(&GameEvent::AteBonus));
        assert_eq!(g.foods_until_bonus, BONUS_THRESHOLD);
    }

    #[test]
    #[serial]
    fn classic_bonus_removes_three_segments() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        g.snake = (0..10)
            .map(|i| Cell { x: 20 - i, y: 15 })
            .collect();
        g.target_len = 10;
        g.direction = Some(Direction::Right);
        g.bonus = Some(Cell { x: 21, y: 15 });
        let events = g.tick();
        assert!(events.contains(&GameEvent::AteBonus));
        assert_eq!(g.snake.len(), 7);
    }

    #[test]
    #[serial]
    fn modern_bonus_halves_length() {
        let mut g = game(Mode::ModernHard);
        move_food_away(&mut g);
        g.snake = (0..9)
            .map(|i| Cell { x: 20 - i, y: 15 })
            .collect();
        g.target_len = 9;
        g.direction = Some(Direction::Right);
        g.bonus = Some(Cell { x: 21, y: 15 });
        g.tick();
        assert_eq!(g.snake.len(), 4);
    }

    #[test]
    #[serial]
    fn bonus_never_shrinks_below_one() {
        let mut g = game(Mode::ClassicEasy);
        move_food_away(&mut g);
        g.direction = Some(Direction::Right);
        g.bonus = Some(Cell {
            x: g.snake[0].x + 1,
            y: g.snake[0].y,
        });
        g.tick();
        assert_eq!(g.snake.len(), 1);
    }

    #[test]
    #[serial]
    fn beating_high_score_emits_event_once_per_food() {
        let mut g = game(Mode::ClassicEasy);
        g.high_score = 2;
        g.steer(Direction::Right);
        for _ in 0..3 {
            g.food = Cell {
                x: g.snake[0].x + 1,
                y: g.snake[0].y,
            };
            let events = g.tick();
            let is_record = events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_)));
            assert_eq!(is_record, g.score > 2);
        }
        assert!(g.record);
        assert_eq!(g.high_score, 3);
    }

    #[test]
    #[serial]
    fn pickups_spawn_inside_margin_and_off_the_snake() {
        macroquad::rand::srand(42);
        for _ in 0..50 {
            let snake = vec![Cell { x: 20, y: 15 }];
            let c = spawn_pickup(40, 30, &snake, None);
            assert!(c.x >= 6 && c.x < 34);
            assert!(c.y >= 6 && c.y < 24);
            assert_ne!(c, snake[0]);
        }
    }

    #[test]
    #[serial]
    fn bonus_respawns_on_first_food_after_collection() {
        let mut g = game(Mode::ClassicEasy);
        // A bonus already sits on the field, away from the snake's path;
        // further foods must not schedule a second one.
        let parked = Cell { x: 35, y: 25 };
        g.bonus = Some(parked);
        g.steer(Direction::Right);
        for _ in 0..7 {
            g.food = Cell {
                x: g.snake[0].x + 1,
                y: g.snake[0].y,
            };
            g.tick();
            assert_eq!(g.bonus, Some(parked));
        }
        assert_eq!(g.foods_until_bonus, 0);
        // Collect it, then a single food restocks the bonus.
        g.bonus = Some(Cell {
            x: g.snake[0].x + 1,
            y: g.snake[0].y,
        });
        g.food = Cell { x: 1, y: 1 };
        assert!(g.tick().contains(&GameEvent::AteBonus));
        assert!(g.bonus.is_none());
        g.food = Cell {
            x: g.snake[0].x + 1,
            y: g.snake[0].y,
        };
        let events = g.tick();
        assert!(events.contains(&GameEvent::AteFood));
        // Counter reset proves a fresh bonus spawned on that food.
        assert_eq!(g.foods_until_bonus, BONUS_THRESHOLD);
    }

    #[test]
    #[serial]
    fn spawn_sequence_follows_the_seed() {
        macroquad::rand::srand(11);
        let a: Vec<Cell> = (0..8).map(|_| spawn_pickup(40, 30, &[], None)).collect();
        macroquad::rand::srand(12);
        let b: Vec<Cell> = (0..8).map(|_| spawn_pickup(40, 30, &[], None)).collect();
        macroquad::rand::srand(11);
        let c: Vec<Cell> = (0..8).map(|_| spawn_pickup(40, 30, &[], None)).collect();
        assert_eq!(a, c);
        assert_ne!(a, b);
    }

    #[test]
    #[serial]
    fn tick_interval_follows_speed() {
        let mut g = game(Mode::ModernHard);
        let before = g.tick_interval();
        g.speed = 10.0;
        assert!(g.tick_interval() < before);
        assert!((g.tick_interval() - 0.1).abs() < 1e-9);
    }
}
