use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::sync::Arc;

use crate::settings::GameSettings;
use crate::types::{Cell, Direction};

#[derive(Clone, Debug)]
pub struct Maze {
    pub width: i32,
    pub height: i32,
    walls: Arc<BTreeSet<Cell>>,
    doors: Arc<BTreeSet<Cell>>,
    house: Arc<BTreeSet<Cell>>,
    portals: Arc<BTreeMap<Cell, Cell>>,
}

impl Maze {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(
            settings.width,
            settings.height,
            settings.walls.iter().copied(),
            settings.doors.iter().copied(),
            settings.ghost_house.iter().copied(),
            settings.portals.iter().map(|(from, to)| (*from, *to)),
        )
    }

    pub fn new(
        width: i32,
        height: i32,
        walls: impl IntoIterator<Item = Cell>,
        doors: impl IntoIterator<Item = Cell>,
        house: impl IntoIterator<Item = Cell>,
        portals: impl IntoIterator<Item = (Cell, Cell)>,
    ) -> Self {
        let doors: BTreeSet<Cell> = doors.into_iter().collect();
        let mut walls: BTreeSet<Cell> = walls.into_iter().collect();
        walls.extend(doors.iter().copied());
        Self {
            width,
            height,
            walls: Arc::new(walls),
            doors: Arc::new(doors),
            house: Arc::new(house.into_iter().collect()),
            portals: Arc::new(portals.into_iter().collect()),
        }
    }

    /// Walls including door cells.
    pub fn walls(&self) -> Arc<BTreeSet<Cell>> {
        Arc::clone(&self.walls)
    }

    pub fn doors(&self) -> Arc<BTreeSet<Cell>> {
        Arc::clone(&self.doors)
    }

    pub fn house(&self) -> Arc<BTreeSet<Cell>> {
        Arc::clone(&self.house)
    }

    pub fn portals(&self) -> Arc<BTreeMap<Cell, Cell>> {
        Arc::clone(&self.portals)
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    pub fn is_door(&self, cell: Cell) -> bool {
        self.doors.contains(&cell)
    }

    pub fn is_house(&self, cell: Cell) -> bool {
        self.house.contains(&cell)
    }

    /// Where one step from `from` lands. A portal entrance lands one cell past its exit,
    /// or on the exit itself when that cell is a wall.
    pub fn destination(&self, from: Cell, dir: Direction) -> Cell {
        let next = from.step(dir);
        match self.portals.get(&next) {
            Some(exit) if self.is_wall(exit.step(dir)) => *exit,
            Some(exit) => exit.step(dir),
            None => next,
        }
    }

    pub fn advance(&self, from: Cell, dir: Direction) -> Option<Cell> {
        if self.is_wall(from.step(dir)) {
            return None;
        }
        Some(self.destination(from, dir))
    }

    fn advance_through_doors(&self, from: Cell, dir: Direction) -> Option<Cell> {
        let next = from.step(dir);
        if self.is_wall(next) && !self.is_door(next) {
            return None;
        }
        Some(self.destination(from, dir))
    }

    pub fn legal_moves(&self, from: Cell) -> Vec<Direction> {
        Direction::PRIORITY
            .into_iter()
            .filter(|dir| !self.is_wall(from.step(*dir)))
            .collect()
    }

    pub fn nearest_door(&self, from: Cell) -> Option<Cell> {
        self.doors
            .iter()
            .copied()
            .min_by_key(|door| (door.manhattan(from), *door))
    }

    /// First step of a shortest route into the ghost house. Doors are passable.
    pub fn route_home(&self, from: Cell) -> Option<Direction> {
        if self.house.is_empty() || self.is_house(from) {
            return None;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        for dir in Direction::PRIORITY {
            let Some(next) = self.advance_through_doors(from, dir) else {
                continue;
            };
            if self.is_house(next) {
                return Some(dir);
            }
            if self.in_search_bounds(next) && visited.insert(next) {
                queue.push_back((next, dir));
            }
        }

        while let Some((cell, first)) = queue.pop_front() {
            for dir in Direction::PRIORITY {
                let Some(next) = self.advance_through_doors(cell, dir) else {
                    continue;
                };
                if self.is_house(next) {
                    return Some(first);
                }
                if self.in_search_bounds(next) && visited.insert(next) {
                    queue.push_back((next, first));
                }
            }
        }
        None
    }

    fn in_search_bounds(&self, cell: Cell) -> bool {
        cell.x >= -1 && cell.y >= -1 && cell.x <= self.width && cell.y <= self.height
    }
}
