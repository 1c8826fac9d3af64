use std::collections::{BTreeMap, BTreeSet, HashSet};

use thiserror::Error;

use crate::constants::{
    CHASE_SECONDS, FRIGHTENED_SECONDS, FRUIT_APPEARS_AFTER_COINS, FRUIT_VISIBLE_SECONDS,
    INITIAL_LIVES, INITIAL_SCATTER_SECONDS, POINTS_FOR_BONUS_LIFE,
};
use crate::ghost::Ghost;
use crate::pacman::PacMan;
use crate::strategy::{DirectionPicker, RandomDirectionPicker};
use crate::types::{Cell, Direction, GameStatus};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("board must have positive dimensions, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },
    #[error("ghost name {0:?} is used more than once")]
    DuplicateGhostName(String),
    #[error("pac-man starts inside a wall at {0}")]
    PacManInWall(Cell),
    #[error("ghost {name:?} starts inside a wall at {location}")]
    GhostInWall { name: String, location: Cell },
    #[error("portal at {0} leads to itself")]
    PortalLoop(Cell),
    #[error("portal at {entrance} exits into a wall at {exit}")]
    PortalExitBlocked { entrance: Cell, exit: Cell },
    #[error("portal at {entrance} exits onto another portal entrance at {exit}")]
    ChainedPortal { entrance: Cell, exit: Cell },
}

/// Immutable board, actor and timing configuration for one game.
pub struct GameSettings {
    pub width: i32,
    pub height: i32,
    pub pacman: PacMan,
    pub walls: BTreeSet<Cell>,
    pub doors: BTreeSet<Cell>,
    pub ghost_house: BTreeSet<Cell>,
    pub coins: BTreeSet<Cell>,
    pub power_pills: BTreeSet<Cell>,
    pub portals: BTreeMap<Cell, Cell>,
    pub ghosts: Vec<Ghost>,
    pub fruit: Cell,
    pub initial_game_status: GameStatus,
    pub initial_lives: u32,
    pub initial_scatter_time_in_seconds: u32,
    pub chase_time_in_seconds: u32,
    pub frightened_time_in_seconds: u32,
    pub fruit_appears_after_coins_eaten: Vec<u32>,
    pub fruit_visible_for_seconds: u32,
    /// Zero disables the bonus life.
    pub points_needed_for_bonus_life: u32,
    pub direction_picker: Box<dyn DirectionPicker>,
    pub frightened_default_direction: Direction,
}

impl GameSettings {
    pub fn new(width: i32, height: i32, pacman: PacMan) -> Self {
        Self {
            width,
            height,
            pacman,
            walls: BTreeSet::new(),
            doors: BTreeSet::new(),
            ghost_house: BTreeSet::new(),
            coins: BTreeSet::new(),
            power_pills: BTreeSet::new(),
            portals: BTreeMap::new(),
            ghosts: Vec::new(),
            fruit: pacman.location,
            initial_game_status: GameStatus::Alive,
            initial_lives: INITIAL_LIVES,
            initial_scatter_time_in_seconds: INITIAL_SCATTER_SECONDS,
            chase_time_in_seconds: CHASE_SECONDS,
            frightened_time_in_seconds: FRIGHTENED_SECONDS,
            fruit_appears_after_coins_eaten: FRUIT_APPEARS_AFTER_COINS.to_vec(),
            fruit_visible_for_seconds: FRUIT_VISIBLE_SECONDS,
            points_needed_for_bonus_life: POINTS_FOR_BONUS_LIFE,
            direction_picker: Box::new(RandomDirectionPicker::new(0)),
            frightened_default_direction: Direction::Up,
        }
    }

    pub fn with_ghost(mut self, ghost: Ghost) -> Self {
        self.ghosts.push(ghost);
        self
    }

    pub fn with_direction_picker(mut self, picker: impl DirectionPicker + 'static) -> Self {
        self.direction_picker = Box::new(picker);
        self
    }

    fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell) || self.doors.contains(&cell)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SettingsError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }

        if self.is_wall(self.pacman.location) {
            return Err(SettingsError::PacManInWall(self.pacman.location));
        }

        let mut names = HashSet::new();
        for ghost in &self.ghosts {
            if !names.insert(ghost.name.as_str()) {
                return Err(SettingsError::DuplicateGhostName(ghost.name.clone()));
            }
            if self.walls.contains(&ghost.location) {
                return Err(SettingsError::GhostInWall {
                    name: ghost.name.clone(),
                    location: ghost.location,
                });
            }
        }

        for (entrance, exit) in &self.portals {
            if entrance == exit {
                return Err(SettingsError::PortalLoop(*entrance));
            }
            if self.is_wall(*exit) {
                return Err(SettingsError::PortalExitBlocked {
                    entrance: *entrance,
                    exit: *exit,
                });
            }
            if self.portals.contains_key(exit) {
                return Err(SettingsError::ChainedPortal {
                    entrance: *entrance,
                    exit: *exit,
                });
            }
        }
        Ok(())
    }
}
