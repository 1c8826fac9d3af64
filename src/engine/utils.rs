use std::collections::BTreeMap;

use crate::ghost::Ghost;
use crate::maze::Maze;
use crate::types::{Cell, GhostStatus};

pub(super) fn ghost_locations(ghosts: &BTreeMap<String, Ghost>) -> BTreeMap<String, Cell> {
    ghosts
        .values()
        .map(|ghost| (ghost.name.clone(), ghost.location))
        .collect()
}

/// A ghost waiting in the house until enough coins are gone.
pub(super) fn is_held(maze: &Maze, ghost: &Ghost, coins_eaten: u32) -> bool {
    ghost.status == GhostStatus::Alive
        && maze.is_house(ghost.location)
        && coins_eaten < ghost.coins_required_to_exit_house
}

pub(super) fn is_house_or_door(maze: &Maze, cell: Cell) -> bool {
    maze.is_house(cell) || maze.is_door(cell)
}
