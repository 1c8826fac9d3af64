use crate::strategy::GhostStrategy;
use crate::types::{Cell, Direction, GhostStatus, GhostView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub name: String,
    pub location: Cell,
    pub direction: Direction,
    pub scatter_target: Cell,
    pub chase_strategy: GhostStrategy,
    pub status: GhostStatus,
    pub coins_required_to_exit_house: u32,
    home: Cell,
    home_direction: Direction,
}

impl Ghost {
    pub fn new(
        name: impl Into<String>,
        location: Cell,
        direction: Direction,
        scatter_target: Cell,
        chase_strategy: GhostStrategy,
        coins_required_to_exit_house: u32,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            direction,
            scatter_target,
            chase_strategy,
            status: GhostStatus::Alive,
            coins_required_to_exit_house,
            home: location,
            home_direction: direction,
        }
    }

    pub fn edible(&self) -> bool {
        self.status == GhostStatus::Edible
    }

    pub fn moved_to(mut self, location: Cell, direction: Direction) -> Self {
        self.location = location;
        self.direction = direction;
        self
    }

    /// Frightened ghosts turn around on the spot.
    pub fn set_to_edible(mut self) -> Self {
        if self.status == GhostStatus::Alive {
            self.direction = self.direction.opposite();
        }
        self.status = GhostStatus::Edible;
        self
    }

    pub fn set_to_alive(mut self) -> Self {
        self.status = GhostStatus::Alive;
        self
    }

    pub fn set_to_score(mut self) -> Self {
        self.status = GhostStatus::Score;
        self
    }

    pub fn set_to_running_home(mut self) -> Self {
        self.status = GhostStatus::RunningHome;
        self
    }

    pub fn set_to_home(mut self) -> Self {
        self.location = self.home;
        self.direction = self.home_direction;
        self.status = GhostStatus::Alive;
        self
    }

    pub fn view(&self) -> GhostView {
        GhostView {
            name: self.name.clone(),
            x: self.location.x,
            y: self.location.y,
            dir: self.direction,
            status: self.status,
            edible: self.edible(),
        }
    }
}
