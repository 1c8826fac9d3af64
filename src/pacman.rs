use crate::types::{Cell, Direction, PacManView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacMan {
    pub location: Cell,
    pub direction: Direction,
    home: Cell,
    home_direction: Direction,
}

impl PacMan {
    pub fn new(location: Cell, direction: Direction) -> Self {
        Self {
            location,
            direction,
            home: location,
            home_direction: direction,
        }
    }

    pub fn with_new_location(self, location: Cell) -> Self {
        Self { location, ..self }
    }

    pub fn with_new_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }

    pub fn set_to_home(self) -> Self {
        Self {
            location: self.home,
            direction: self.home_direction,
            ..self
        }
    }

    pub fn view(&self) -> PacManView {
        PacManView {
            x: self.location.x,
            y: self.location.y,
            dir: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PacMan;
    use crate::types::{Cell, Direction};

    #[test]
    fn set_to_home_restores_start_location_and_heading() {
        let pacman = PacMan::new(Cell::new(5, 5), Direction::Left)
            .with_new_location(Cell::new(9, 2))
            .with_new_direction(Direction::Up);
        assert_eq!(pacman.location, Cell::new(9, 2));

        let home = pacman.set_to_home();
        assert_eq!(home.location, Cell::new(5, 5));
        assert_eq!(home.direction, Direction::Left);
    }
}
