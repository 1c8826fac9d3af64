use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::ghost::Ghost;
use crate::pacman::PacMan;
use crate::settings::GameSettings;
use crate::types::{AlivePhase, Cell, Direction, GameStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateNode {
    Initial,
    AttractMode,
    Alive(AlivePhase),
    Dying,
    Respawning,
    Dead,
}

impl StateNode {
    pub fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::Initial => Self::Initial,
            GameStatus::AttractMode => Self::AttractMode,
            GameStatus::Alive => Self::Alive(AlivePhase::Chase),
            GameStatus::Dying => Self::Dying,
            GameStatus::Respawning => Self::Respawning,
            GameStatus::Dead => Self::Dead,
        }
    }

    pub fn status(self) -> GameStatus {
        match self {
            Self::Initial => GameStatus::Initial,
            Self::AttractMode => GameStatus::AttractMode,
            Self::Alive(_) => GameStatus::Alive,
            Self::Dying => GameStatus::Dying,
            Self::Respawning => GameStatus::Respawning,
            Self::Dead => GameStatus::Dead,
        }
    }

    pub fn phase(self) -> Option<AlivePhase> {
        match self {
            Self::Alive(phase) => Some(phase),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deadline {
    At(DateTime<Utc>),
    /// Armed before any tick was seen; anchored to the next tick.
    FromNextTick(TimeDelta),
}

/// The only mutable data of a game. Collections handed to readers are
/// swapped for new ones on change, never edited in place.
pub struct GameState {
    node: StateNode,
    score: u32,
    lives: u32,
    ghosts_visible: bool,
    time_to_change_state: Option<Deadline>,
    last_tick: Option<DateTime<Utc>>,
    total_coins: usize,
    remaining_coins: Arc<BTreeSet<Cell>>,
    remaining_power_pills: Arc<BTreeSet<Cell>>,
    ghosts: Arc<BTreeMap<String, Ghost>>,
    pacman: PacMan,

    pub(crate) tick_count: u64,
    pub(crate) frightened_until: Option<DateTime<Utc>>,
    pub(crate) frightened_ticks: u64,
    pub(crate) ghosts_eaten_on_pill: u32,
    pub(crate) paused_until: Option<DateTime<Utc>>,
    pub(crate) bonus_life_awarded: bool,
    pub(crate) fruit_visible_until: Option<DateTime<Utc>>,
}

impl GameState {
    pub fn new(settings: &GameSettings) -> Self {
        let ghosts = settings
            .ghosts
            .iter()
            .map(|ghost| (ghost.name.clone(), ghost.clone()))
            .collect();
        Self {
            node: StateNode::from_status(settings.initial_game_status),
            score: 0,
            lives: settings.initial_lives,
            ghosts_visible: !matches!(
                settings.initial_game_status,
                GameStatus::Respawning | GameStatus::Dead
            ),
            time_to_change_state: None,
            last_tick: None,
            total_coins: settings.coins.len(),
            remaining_coins: Arc::new(settings.coins.clone()),
            remaining_power_pills: Arc::new(settings.power_pills.clone()),
            ghosts: Arc::new(ghosts),
            pacman: settings.pacman,
            tick_count: 0,
            frightened_until: None,
            frightened_ticks: 0,
            ghosts_eaten_on_pill: 0,
            paused_until: None,
            bonus_life_awarded: false,
            fruit_visible_until: None,
        }
    }

    pub fn node(&self) -> StateNode {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: StateNode) {
        self.node = node;
    }

    pub fn status(&self) -> GameStatus {
        self.node.status()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn increase_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub(crate) fn decrease_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub(crate) fn increase_lives(&mut self) {
        self.lives += 1;
    }

    pub fn ghosts_visible(&self) -> bool {
        self.ghosts_visible
    }

    pub(crate) fn show_ghosts(&mut self) {
        self.ghosts_visible = true;
    }

    pub(crate) fn hide_ghosts(&mut self) {
        self.ghosts_visible = false;
    }

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        self.last_tick
    }

    pub(crate) fn record_last_tick(&mut self, now: DateTime<Utc>) {
        self.last_tick = Some(now);
        self.tick_count += 1;
    }

    pub fn time_to_change_state(&self) -> Option<DateTime<Utc>> {
        match self.time_to_change_state {
            Some(Deadline::At(at)) => Some(at),
            _ => None,
        }
    }

    /// Schedules the next status change relative to the last processed tick.
    pub(crate) fn change_state_in(&mut self, delay: TimeDelta) {
        self.time_to_change_state = Some(match self.last_tick {
            Some(last_tick) => Deadline::At(last_tick + delay),
            None => Deadline::FromNextTick(delay),
        });
    }

    pub(crate) fn change_state_at(&mut self, at: DateTime<Utc>) {
        self.time_to_change_state = Some(Deadline::At(at));
    }

    pub(crate) fn clear_state_change(&mut self) {
        self.time_to_change_state = None;
    }

    pub(crate) fn anchor_pending_state_change(&mut self, now: DateTime<Utc>) {
        if let Some(Deadline::FromNextTick(delay)) = self.time_to_change_state {
            self.time_to_change_state = Some(Deadline::At(now + delay));
        }
    }

    pub(crate) fn state_change_due(&self, now: DateTime<Utc>) -> bool {
        matches!(self.time_to_change_state, Some(Deadline::At(at)) if now >= at)
    }

    pub fn remaining_coins(&self) -> Arc<BTreeSet<Cell>> {
        Arc::clone(&self.remaining_coins)
    }

    pub fn coins_eaten(&self) -> u32 {
        self.total_coins.saturating_sub(self.remaining_coins.len()) as u32
    }

    pub(crate) fn remove_coin(&mut self, location: Cell) -> bool {
        if !self.remaining_coins.contains(&location) {
            return false;
        }
        let mut coins = (*self.remaining_coins).clone();
        coins.remove(&location);
        self.remaining_coins = Arc::new(coins);
        true
    }

    pub fn remaining_power_pills(&self) -> Arc<BTreeSet<Cell>> {
        Arc::clone(&self.remaining_power_pills)
    }

    pub(crate) fn remove_power_pill(&mut self, location: Cell) -> bool {
        if !self.remaining_power_pills.contains(&location) {
            return false;
        }
        let mut pills = (*self.remaining_power_pills).clone();
        pills.remove(&location);
        self.remaining_power_pills = Arc::new(pills);
        true
    }

    pub fn ghosts(&self) -> Arc<BTreeMap<String, Ghost>> {
        Arc::clone(&self.ghosts)
    }

    pub(crate) fn replace_ghosts(&mut self, ghosts: BTreeMap<String, Ghost>) {
        self.ghosts = Arc::new(ghosts);
    }

    pub(crate) fn apply_to_ghosts(&mut self, mut action: impl FnMut(Ghost) -> Ghost) {
        let ghosts = self
            .ghosts
            .values()
            .map(|ghost| (ghost.name.clone(), action(ghost.clone())))
            .collect();
        self.ghosts = Arc::new(ghosts);
    }

    pub fn pacman(&self) -> &PacMan {
        &self.pacman
    }

    pub(crate) fn move_pacman_to(&mut self, location: Cell) {
        self.pacman = self.pacman.with_new_location(location);
    }

    pub(crate) fn set_pacman_direction(&mut self, direction: Direction) {
        self.pacman = self.pacman.with_new_direction(direction);
    }

    pub(crate) fn move_pacman_home(&mut self) {
        self.pacman = self.pacman.set_to_home();
    }
}
