use serde::{Deserialize, Serialize};

/// Board width/height in tiles.
pub const GRID_TILES: i32 = 20;

/// Points awarded per food eaten.
pub const FOOD_SCORE: u32 = 10;

/// One tile on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn on_board(self) -> bool {
        self.x >= 0 && self.x < GRID_TILES && self.y >= 0 && self.y < GRID_TILES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Game speed tiers; the tick interval is the loop period in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Hardcore,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Hardcore];

    pub fn tick_ms(self) -> u32 {
        match self {
            Self::Easy => 150,
            Self::Normal => 100,
            Self::Hard => 75,
            Self::Hardcore => 50,
        }
    }

    /// Display label, also the value stored with submitted scores.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Normal => "Normal",
            Self::Hard => "Difícil",
            Self::Hardcore => "Hardcore",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Normal
    }
}

/// Leaderboard row as served by the score API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: i64,
    pub difficulty: String,
}

/// What a single tick of the game loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Died,
}

/// Snake game state. Rendering and randomness stay outside: each tick the
/// caller drives [`SnakeGame::step`] with a candidate-tile spawner, and the
/// game re-rolls candidates that land on the snake's body.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    snake: Vec<Point>,
    food: Point,
    direction: Direction,
    score: u32,
    game_over: bool,
}

impl SnakeGame {
    pub fn new() -> Self {
        Self {
            snake: vec![Point::new(GRID_TILES / 2, GRID_TILES / 2)],
            food: Point::new(15, 15),
            direction: Direction::Up,
            score: 0,
            game_over: false,
        }
    }

    /// Head-first body segments.
    pub fn snake(&self) -> &[Point] {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Steer the snake. Turns onto the current travel axis are ignored, so a
    /// reversal into the own neck is impossible.
    pub fn turn(&mut self, direction: Direction) {
        if direction.is_horizontal() != self.direction.is_horizontal() {
            self.direction = direction;
        }
    }

    /// Advance one tick. Hitting a wall or the body ends the game; landing on
    /// food grows the snake, scores, and respawns food on a free tile drawn
    /// from `spawn_candidate`.
    pub fn step(&mut self, spawn_candidate: impl FnMut() -> Point) -> StepOutcome {
        if self.game_over {
            return StepOutcome::Died;
        }

        let (dx, dy) = self.direction.delta();
        let head = Point::new(self.snake[0].x + dx, self.snake[0].y + dy);

        if !head.on_board() || self.snake.contains(&head) {
            self.game_over = true;
            return StepOutcome::Died;
        }

        self.snake.insert(0, head);
        if head == self.food {
            self.score += FOOD_SCORE;
            self.food = self.spawn_food(spawn_candidate);
            StepOutcome::Ate
        } else {
            self.snake.pop();
            StepOutcome::Moved
        }
    }

    fn spawn_food(&self, mut spawn_candidate: impl FnMut() -> Point) -> Point {
        // Board effectively full: keep the previous tile rather than spin.
        if self.snake.len() >= (GRID_TILES * GRID_TILES) as usize {
            return self.food;
        }
        loop {
            let candidate = spawn_candidate();
            if candidate.on_board() && !self.snake.contains(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_spawner(points: Vec<Point>) -> impl FnMut() -> Point {
        let mut queue = points.into_iter();
        move || queue.next().expect("spawner exhausted")
    }

    #[test]
    fn fresh_game_starts_centered_moving_up() {
        let game = SnakeGame::new();
        assert_eq!(game.snake(), &[Point::new(10, 10)]);
        assert_eq!(game.food(), Point::new(15, 15));
        assert_eq!(game.score(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn turns_onto_the_same_axis_are_ignored() {
        let mut game = SnakeGame::new();
        game.turn(Direction::Down); // reversal of Up
        let outcome = game.step(fixed_spawner(vec![]));
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(game.snake()[0], Point::new(10, 9));
    }

    #[test]
    fn perpendicular_turn_changes_course() {
        let mut game = SnakeGame::new();
        game.turn(Direction::Left);
        game.step(fixed_spawner(vec![]));
        assert_eq!(game.snake()[0], Point::new(9, 10));
    }

    #[test]
    fn moving_keeps_length_constant() {
        let mut game = SnakeGame::new();
        game.step(fixed_spawner(vec![]));
        game.step(fixed_spawner(vec![]));
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn eating_grows_scores_and_respawns_off_snake() {
        let mut game = SnakeGame::new();
        game.food = Point::new(10, 9); // directly in the path
        let on_snake = Point::new(10, 9); // next head position after the bite
        let free = Point::new(3, 3);
        let outcome = game.step(fixed_spawner(vec![on_snake, free]));
        assert_eq!(outcome, StepOutcome::Ate);
        assert_eq!(game.score(), FOOD_SCORE);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.food(), free);
    }

    #[test]
    fn wall_collision_ends_the_game() {
        let mut game = SnakeGame::new();
        for _ in 0..10 {
            assert_eq!(game.step(fixed_spawner(vec![])), StepOutcome::Moved);
        }
        // Head now at y = 0; the next step leaves the board.
        assert_eq!(game.step(fixed_spawner(vec![])), StepOutcome::Died);
        assert!(game.is_game_over());
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut game = SnakeGame::new();
        game.snake = vec![
            Point::new(10, 10),
            Point::new(10, 9),
            Point::new(11, 9),
            Point::new(11, 10),
            Point::new(11, 11),
        ];
        game.direction = Direction::Right; // head moves into (11, 10)
        assert_eq!(game.step(fixed_spawner(vec![])), StepOutcome::Died);
        assert!(game.is_game_over());
    }

    #[test]
    fn stepping_a_finished_game_changes_nothing() {
        let mut game = SnakeGame::new();
        game.game_over = true;
        let before = game.snake().to_vec();
        assert_eq!(game.step(fixed_spawner(vec![])), StepOutcome::Died);
        assert_eq!(game.snake(), before.as_slice());
    }

    #[test]
    fn difficulty_labels_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_label(difficulty.label()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_label("unknown"), None);
    }

    #[test]
    fn faster_tiers_tick_faster() {
        assert!(Difficulty::Easy.tick_ms() > Difficulty::Normal.tick_ms());
        assert!(Difficulty::Normal.tick_ms() > Difficulty::Hard.tick_ms());
        assert!(Difficulty::Hard.tick_ms() > Difficulty::Hardcore.tick_ms());
    }
}
