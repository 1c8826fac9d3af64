use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Up, Left, Down, Right: the order used to break ties between equally good moves.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const TOP_LEFT: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    pub fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    pub fn above(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    pub fn below(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Up => self.above(),
            Direction::Down => self.below(),
            Direction::Left => self.left(),
            Direction::Right => self.right(),
        }
    }

    pub fn offset(self, dir: Direction, cells: i32) -> Self {
        match dir {
            Direction::Up => Self::new(self.x, self.y - cells),
            Direction::Down => Self::new(self.x, self.y + cells),
            Direction::Left => Self::new(self.x - cells, self.y),
            Direction::Right => Self::new(self.x + cells, self.y),
        }
    }

    pub fn distance_squared(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Initial,
    AttractMode,
    Alive,
    Dying,
    Respawning,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlivePhase {
    Scatter,
    Chase,
}

impl AlivePhase {
    pub fn flipped(self) -> Self {
        match self {
            Self::Scatter => Self::Chase,
            Self::Chase => Self::Scatter,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostStatus {
    Alive,
    Edible,
    Score,
    RunningHome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameNotification {
    PreTick,
    EatCoin,
    EatPowerPill,
    EatGhost,
    EatFruit,
    ExtraLife,
    PacManDying,
    Respawning,
    GameOver,
}

impl GameNotification {
    pub const ALL: [GameNotification; 9] = [
        Self::PreTick,
        Self::EatCoin,
        Self::EatPowerPill,
        Self::EatGhost,
        Self::EatFruit,
        Self::ExtraLife,
        Self::PacManDying,
        Self::Respawning,
        Self::GameOver,
    ];
}

#[derive(Clone, Debug, Serialize)]
pub struct PacManView {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub status: GhostStatus,
    pub edible: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub tick: u64,
    #[serde(rename = "lastTick")]
    pub last_tick: Option<DateTime<Utc>>,
    pub status: GameStatus,
    pub phase: Option<AlivePhase>,
    pub score: u32,
    pub lives: u32,
    pub width: i32,
    pub height: i32,
    pub pacman: PacManView,
    #[serde(rename = "ghostsVisible")]
    pub ghosts_visible: bool,
    pub ghosts: Vec<GhostView>,
    pub coins: Vec<Cell>,
    #[serde(rename = "powerPills")]
    pub power_pills: Vec<Cell>,
    pub fruit: Option<Cell>,
}
