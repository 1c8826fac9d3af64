use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::constants::{
    attract_mode_delay, dying_delay, ghost_eaten_pause, ghost_points, respawn_delay, seconds,
    COIN_POINTS, FRUIT_POINTS, POWER_PILL_POINTS,
};
use crate::ghost::Ghost;
use crate::maze::Maze;
use crate::notifications::Notifications;
use crate::pacman::PacMan;
use crate::settings::{GameSettings, SettingsError};
use crate::state::{GameState, StateNode};
use crate::strategy::{GhostStrategy, StrategyContext};
use crate::types::{
    AlivePhase, Cell, Direction, GameNotification, GameSnapshot, GameStatus, GhostStatus,
};

mod ghost_system;
mod pickup_system;
mod utils;

#[cfg(test)]
mod tests;

use self::utils::{ghost_locations, is_held, is_house_or_door};

pub struct Game {
    settings: GameSettings,
    maze: Maze,
    state: GameState,
    notifications: Notifications,
    started: bool,
}

impl Game {
    pub fn new(settings: GameSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let maze = Maze::from_settings(&settings);
        let state = GameState::new(&settings);
        Ok(Self {
            settings,
            maze,
            state,
            notifications: Notifications::new(),
            started: false,
        })
    }

    /// Starts accepting clock ticks. Ticks delivered earlier are dropped.
    pub fn start_game(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        match self.state.node() {
            StateNode::Initial => self.state.change_state_in(attract_mode_delay()),
            StateNode::Dying => self.state.change_state_in(dying_delay()),
            StateNode::Respawning => self.state.change_state_in(respawn_delay()),
            StateNode::AttractMode | StateNode::Alive(_) | StateNode::Dead => {}
        }
    }

    pub fn subscribe(&mut self, kind: GameNotification, callback: impl FnMut() + Send + 'static) {
        self.notifications.subscribe(kind, callback);
    }

    pub fn press_start(&mut self) {
        if !matches!(
            self.state.node(),
            StateNode::Initial | StateNode::AttractMode
        ) {
            return;
        }
        self.state.set_node(StateNode::Alive(AlivePhase::Scatter));
        self.state
            .change_state_in(seconds(self.settings.initial_scatter_time_in_seconds));
        info!("game started, scattering");
    }

    pub fn change_direction(&mut self, direction: Direction) {
        if self.state.status() == GameStatus::Dead {
            return;
        }
        let pacman = self.state.pacman();
        if self.maze.is_wall(pacman.location.step(direction)) {
            return;
        }
        self.state.set_pacman_direction(direction);
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        if !self.started {
            return;
        }
        self.notifications.fire(GameNotification::PreTick);
        self.state.anchor_pending_state_change(now);

        match self.state.node() {
            StateNode::Initial => self.tick_initial(now),
            StateNode::AttractMode | StateNode::Dead => {}
            StateNode::Alive(_) => self.tick_alive(now),
            StateNode::Dying => self.tick_dying(now),
            StateNode::Respawning => self.tick_respawning(now),
        }

        self.state.record_last_tick(now);
    }

    fn tick_initial(&mut self, now: DateTime<Utc>) {
        if self.state.state_change_due(now) {
            self.state.clear_state_change();
            self.state.set_node(StateNode::AttractMode);
            debug!("entering attract mode");
        }
    }

    fn tick_dying(&mut self, now: DateTime<Utc>) {
        if !self.state.state_change_due(now) {
            return;
        }
        let died_at = self.state.time_to_change_state().unwrap_or(now);
        self.state.hide_ghosts();

        if self.state.lives() == 0 {
            self.state.clear_state_change();
            self.state.set_node(StateNode::Dead);
            self.notifications.fire(GameNotification::GameOver);
            info!("game over with score {}", self.state.score());
            return;
        }

        self.state.set_node(StateNode::Respawning);
        self.state.change_state_at(died_at + respawn_delay());
        self.notifications.fire(GameNotification::Respawning);
        debug!("respawning, {} lives left", self.state.lives());
    }

    fn tick_respawning(&mut self, now: DateTime<Utc>) {
        if !self.state.state_change_due(now) {
            return;
        }
        self.state.move_pacman_home();
        self.state.apply_to_ghosts(Ghost::set_to_home);
        self.state.show_ghosts();
        self.state.frightened_until = None;
        self.state.frightened_ticks = 0;
        self.state.paused_until = None;
        self.state.fruit_visible_until = None;
        self.state.set_node(StateNode::Alive(AlivePhase::Scatter));
        self.state
            .change_state_at(now + seconds(self.settings.initial_scatter_time_in_seconds));
        info!("pac-man respawned");
    }

    fn tick_alive(&mut self, now: DateTime<Utc>) {
        if let Some(paused_until) = self.state.paused_until {
            if now < paused_until {
                return;
            }
            self.state.paused_until = None;
            self.state.apply_to_ghosts(|ghost| match ghost.status {
                GhostStatus::Score => ghost.set_to_running_home(),
                _ => ghost,
            });
        }

        self.expire_frightened(now);
        self.update_phase(now);
        self.expire_fruit(now);

        let coins_eaten = self.state.coins_eaten();
        let pacman_before = self.state.pacman().location;
        let ghosts_before = ghost_locations(&self.state.ghosts());

        self.move_pacman();
        let pill_eaten = self.apply_pickups(now);
        self.move_ghosts(coins_eaten);
        if pill_eaten {
            self.frighten_ghosts(now);
        }
        self.resolve_ghost_collisions(now, pacman_before, &ghosts_before);
    }

    fn update_phase(&mut self, now: DateTime<Utc>) {
        let StateNode::Alive(phase) = self.state.node() else {
            return;
        };
        if !self.state.state_change_due(now) {
            return;
        }
        let next = phase.flipped();
        let duration = match next {
            AlivePhase::Scatter => self.settings.initial_scatter_time_in_seconds,
            AlivePhase::Chase => self.settings.chase_time_in_seconds,
        };
        self.state.set_node(StateNode::Alive(next));
        self.state.change_state_at(now + seconds(duration));
        debug!("ghosts switch to {next:?} for {duration}s");
    }

    fn move_pacman(&mut self) {
        let pacman = *self.state.pacman();
        if let Some(next) = self.maze.advance(pacman.location, pacman.direction) {
            self.state.move_pacman_to(next);
        }
    }

    fn resolve_ghost_collisions(
        &mut self,
        now: DateTime<Utc>,
        pacman_before: Cell,
        ghosts_before: &BTreeMap<String, Cell>,
    ) {
        let pacman = self.state.pacman().location;
        let ghosts = self.state.ghosts();
        for ghost in ghosts.values() {
            let overlap = ghost.location == pacman;
            let swapped = ghost.location == pacman_before
                && ghosts_before.get(&ghost.name) == Some(&pacman);
            if !overlap && !swapped {
                continue;
            }

            match ghost.status {
                GhostStatus::Alive => {
                    self.catch_pacman(now, &ghost.name);
                    return;
                }
                GhostStatus::Edible => self.eat_ghost(now, &ghost.name),
                GhostStatus::Score | GhostStatus::RunningHome => {}
            }
        }
    }

    fn catch_pacman(&mut self, now: DateTime<Utc>, ghost_name: &str) {
        self.state.decrease_lives();
        self.state.set_node(StateNode::Dying);
        self.state.change_state_at(now + dying_delay());
        self.notifications.fire(GameNotification::PacManDying);
        info!(
            "pac-man caught by {ghost_name}, {} lives left",
            self.state.lives()
        );
    }

    fn eat_ghost(&mut self, now: DateTime<Utc>, ghost_name: &str) {
        let points = ghost_points(self.state.ghosts_eaten_on_pill);
        self.state.ghosts_eaten_on_pill += 1;
        self.state.apply_to_ghosts(|ghost| {
            if ghost.name == ghost_name {
                ghost.set_to_score()
            } else {
                ghost
            }
        });
        self.award(points);
        self.state.paused_until = Some(now + ghost_eaten_pause());
        self.notifications.fire(GameNotification::EatGhost);
        debug!("{ghost_name} eaten for {points} points");
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn phase(&self) -> Option<AlivePhase> {
        self.state.node().phase()
    }

    pub fn is_over(&self) -> bool {
        self.state.status() == GameStatus::Dead
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn lives(&self) -> u32 {
        self.state.lives()
    }

    pub fn pacman(&self) -> PacMan {
        *self.state.pacman()
    }

    /// Ghosts keyed by name; empty while they are hidden.
    pub fn ghosts(&self) -> Arc<BTreeMap<String, Ghost>> {
        if self.state.ghosts_visible() {
            self.state.ghosts()
        } else {
            Arc::new(BTreeMap::new())
        }
    }

    pub fn ghosts_visible(&self) -> bool {
        self.state.ghosts_visible()
    }

    pub fn coins(&self) -> Arc<BTreeSet<Cell>> {
        self.state.remaining_coins()
    }

    pub fn coins_eaten(&self) -> u32 {
        self.state.coins_eaten()
    }

    pub fn power_pills(&self) -> Arc<BTreeSet<Cell>> {
        self.state.remaining_power_pills()
    }

    pub fn fruit(&self) -> Option<Cell> {
        self.state
            .fruit_visible_until
            .map(|_| self.settings.fruit)
    }

    pub fn walls(&self) -> Arc<BTreeSet<Cell>> {
        self.maze.walls()
    }

    pub fn doors(&self) -> Arc<BTreeSet<Cell>> {
        self.maze.doors()
    }

    pub fn ghost_house(&self) -> Arc<BTreeSet<Cell>> {
        self.maze.house()
    }

    pub fn portals(&self) -> Arc<BTreeMap<Cell, Cell>> {
        self.maze.portals()
    }

    pub fn width(&self) -> i32 {
        self.maze.width
    }

    pub fn height(&self) -> i32 {
        self.maze.height
    }

    pub fn tick_count(&self) -> u64 {
        self.state.tick_count
    }

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        self.state.last_tick()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.state.tick_count,
            last_tick: self.state.last_tick(),
            status: self.status(),
            phase: self.phase(),
            score: self.score(),
            lives: self.lives(),
            width: self.width(),
            height: self.height(),
            pacman: self.state.pacman().view(),
            ghosts_visible: self.ghosts_visible(),
            ghosts: self.ghosts().values().map(Ghost::view).collect(),
            coins: self.coins().iter().copied().collect(),
            power_pills: self.power_pills().iter().copied().collect(),
            fruit: self.fruit(),
        }
    }
}
