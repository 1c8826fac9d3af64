use super::*;

impl Game {
    pub(super) fn move_ghosts(&mut self, coins_eaten: u32) {
        let ghosts = self.state.ghosts();
        let frightened_step = if ghosts.values().any(Ghost::edible) {
            self.state.frightened_ticks += 1;
            self.state.frightened_ticks % 2 == 0
        } else {
            false
        };

        let mut moved = BTreeMap::new();
        for ghost in ghosts.values() {
            let next = self.move_ghost(ghost.clone(), coins_eaten, frightened_step);
            moved.insert(next.name.clone(), next);
        }
        self.state.replace_ghosts(moved);
    }

    fn move_ghost(&mut self, ghost: Ghost, coins_eaten: u32, frightened_step: bool) -> Ghost {
        match ghost.status {
            GhostStatus::Score => ghost,
            GhostStatus::RunningHome => self.run_home(ghost),
            _ if is_house_or_door(&self.maze, ghost.location) => {
                if is_held(&self.maze, &ghost, coins_eaten) || (ghost.edible() && !frightened_step)
                {
                    ghost
                } else {
                    self.leave_house(ghost)
                }
            }
            GhostStatus::Edible if frightened_step => self.wander(ghost),
            GhostStatus::Edible => ghost,
            GhostStatus::Alive => self.follow_strategy(ghost),
        }
    }

    fn follow_strategy(&self, ghost: Ghost) -> Ghost {
        let strategy = match self.state.node().phase() {
            Some(AlivePhase::Scatter) => GhostStrategy::scatter_to(ghost.scatter_target),
            _ => ghost.chase_strategy,
        };
        let ctx = StrategyContext {
            maze: &self.maze,
            pacman: self.state.pacman(),
        };
        let Some(dir) = strategy.next_direction(&ghost, &ctx) else {
            return ghost;
        };
        match self.maze.advance(ghost.location, dir) {
            Some(next) => ghost.moved_to(next, dir),
            None => ghost,
        }
    }

    fn wander(&mut self, ghost: Ghost) -> Ghost {
        let legal = self.maze.legal_moves(ghost.location);
        let reverse = ghost.direction.opposite();
        let mut available: Vec<Direction> =
            legal.iter().copied().filter(|dir| *dir != reverse).collect();
        if available.is_empty() {
            available = legal;
        }

        let dir = self
            .settings
            .direction_picker
            .pick(&available)
            .unwrap_or(self.settings.frightened_default_direction);
        match self.maze.advance(ghost.location, dir) {
            Some(next) => ghost.moved_to(next, dir),
            None => ghost,
        }
    }

    /// Sideways to the door column, up or down onto the door, then straight on.
    fn leave_house(&self, ghost: Ghost) -> Ghost {
        let location = ghost.location;
        if self.maze.is_door(location) {
            let dir = [ghost.direction]
                .into_iter()
                .chain(Direction::PRIORITY)
                .find(|dir| {
                    let next = location.step(*dir);
                    let passable = !self.maze.is_wall(next) || self.maze.is_door(next);
                    passable && !self.maze.is_house(next)
                });
            return match dir {
                Some(dir) => ghost.moved_to(location.step(dir), dir),
                None => ghost,
            };
        }

        let Some(door) = self.maze.nearest_door(location) else {
            return ghost;
        };
        let dir = if location.x != door.x {
            if door.x < location.x {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if door.y < location.y {
            Direction::Up
        } else {
            Direction::Down
        };
        ghost.moved_to(location.step(dir), dir)
    }

    fn run_home(&self, ghost: Ghost) -> Ghost {
        let Some(dir) = self.maze.route_home(ghost.location) else {
            return ghost.set_to_alive();
        };
        let next = self.maze.destination(ghost.location, dir);
        let ghost = ghost.moved_to(next, dir);
        if self.maze.is_house(next) {
            debug!("{} is back in the house", ghost.name);
            ghost.set_to_alive()
        } else {
            ghost
        }
    }

    pub(super) fn frighten_ghosts(&mut self, now: DateTime<Utc>) {
        if self.state.frightened_until.is_none() {
            self.state.frightened_ticks = 0;
        }
        let until = now + seconds(self.settings.frightened_time_in_seconds);
        self.state.frightened_until = Some(until);
        self.state.ghosts_eaten_on_pill = 0;

        let coins_eaten = self.state.coins_eaten();
        let maze = &self.maze;
        self.state.apply_to_ghosts(|ghost| match ghost.status {
            GhostStatus::Alive if !is_held(maze, &ghost, coins_eaten) => ghost.set_to_edible(),
            _ => ghost,
        });
        debug!("ghosts frightened until {until}");
    }

    pub(super) fn expire_frightened(&mut self, now: DateTime<Utc>) {
        let Some(until) = self.state.frightened_until else {
            return;
        };
        if now < until {
            return;
        }
        self.state.frightened_until = None;
        self.state.apply_to_ghosts(|ghost| match ghost.status {
            GhostStatus::Edible => ghost.set_to_alive(),
            _ => ghost,
        });
        debug!("ghosts no longer frightened");
    }
}
