use crate::ghost::Ghost;
use crate::maze::Maze;
use crate::pacman::PacMan;
use crate::rng::Rng;
use crate::types::{Cell, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    PacMan,
    /// A cell the given number of steps ahead of Pac-Man's heading.
    AheadOfPacMan(i32),
    Cell(Cell),
}

impl Target {
    pub fn resolve(&self, pacman: &PacMan) -> Cell {
        match self {
            Self::PacMan => pacman.location,
            Self::AheadOfPacMan(cells) => pacman.location.offset(pacman.direction, *cells),
            Self::Cell(cell) => *cell,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostStrategy {
    StandStill,
    Fixed(Direction),
    DirectTo(Target),
}

pub struct StrategyContext<'a> {
    pub maze: &'a Maze,
    pub pacman: &'a PacMan,
}

impl GhostStrategy {
    pub fn scatter_to(cell: Cell) -> Self {
        Self::DirectTo(Target::Cell(cell))
    }

    pub fn next_direction(&self, ghost: &Ghost, ctx: &StrategyContext<'_>) -> Option<Direction> {
        match self {
            Self::StandStill => None,
            Self::Fixed(dir) => ctx.maze.advance(ghost.location, *dir).map(|_| *dir),
            Self::DirectTo(target) => {
                direction_towards(ctx.maze, ghost.location, target.resolve(ctx.pacman))
            }
        }
    }
}

/// Legal move whose landing cell is closest to `target`; ties keep priority order.
pub fn direction_towards(maze: &Maze, from: Cell, target: Cell) -> Option<Direction> {
    let mut best: Option<(i64, Direction)> = None;
    for dir in maze.legal_moves(from) {
        let distance = maze.destination(from, dir).distance_squared(target);
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, dir)),
        }
    }
    best.map(|(_, dir)| dir)
}

/// Chooses a heading for a frightened ghost from the moves on offer.
pub trait DirectionPicker: Send {
    fn pick(&mut self, available: &[Direction]) -> Option<Direction>;
}

#[derive(Clone, Debug)]
pub struct RandomDirectionPicker {
    rng: Rng,
}

impl RandomDirectionPicker {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
        }
    }
}

impl DirectionPicker for RandomDirectionPicker {
    fn pick(&mut self, available: &[Direction]) -> Option<Direction> {
        self.rng.pick(available)
    }
}
