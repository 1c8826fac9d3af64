use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::engine::Game;

/// Source of tick timestamps. `None` means the clock has stopped.
pub trait GameClock: Send {
    fn tick(&mut self) -> impl Future<Output = Option<DateTime<Utc>>> + Send;
}

/// Wall clock driven by a tokio interval. Must be created inside a runtime.
pub struct IntervalClock {
    interval: Interval,
    remaining: Option<u64>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            remaining: None,
        }
    }

    pub fn with_limit(mut self, ticks: u64) -> Self {
        self.remaining = Some(ticks);
        self
    }
}

impl GameClock for IntervalClock {
    async fn tick(&mut self) -> Option<DateTime<Utc>> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.interval.tick().await;
        Some(Utc::now())
    }
}

/// Replays a fixed list of timestamps.
#[derive(Clone, Debug, Default)]
pub struct ScriptedClock {
    times: VecDeque<DateTime<Utc>>,
}

impl ScriptedClock {
    pub fn new(times: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self {
            times: times.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.times.len()
    }
}

impl GameClock for ScriptedClock {
    async fn tick(&mut self) -> Option<DateTime<Utc>> {
        self.times.pop_front()
    }
}

/// Feeds clock ticks into the game until the clock stops or the game is over.
/// Returns the number of ticks delivered.
pub async fn run_game(game: &mut Game, clock: &mut impl GameClock) -> u64 {
    let mut delivered = 0;
    while let Some(now) = clock.tick().await {
        game.tick(now);
        delivered += 1;
        if game.is_over() {
            info!("game over after {delivered} ticks");
            break;
        }
    }
    delivered
}

pub fn spawn_tick_loop(game: Arc<Mutex<Game>>, mut clock: impl GameClock + 'static) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(now) = clock.tick().await {
            let mut guard = game.lock().await;
            guard.tick(now);
            if guard.is_over() {
                break;
            }
        }
        debug!("tick loop stopped");
    })
}
