use chrono::TimeDelta;

pub const TICK_RATE: u32 = 10;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

pub const INITIAL_LIVES: u32 = 3;
pub const INITIAL_SCATTER_SECONDS: u32 = 7;
pub const CHASE_SECONDS: u32 = 20;
pub const FRIGHTENED_SECONDS: u32 = 7;
pub const FRUIT_VISIBLE_SECONDS: u32 = 10;
pub const FRUIT_APPEARS_AFTER_COINS: [u32; 2] = [70, 170];

pub const COIN_POINTS: u32 = 10;
pub const POWER_PILL_POINTS: u32 = 50;
pub const FRUIT_POINTS: u32 = 100;
pub const FIRST_GHOST_POINTS: u32 = 200;
pub const POINTS_FOR_BONUS_LIFE: u32 = 10_000;

pub const ATTRACT_MODE_DELAY_SECONDS: i64 = 4;
pub const DYING_SECONDS: i64 = 4;
pub const RESPAWN_SECONDS: i64 = 4;
pub const GHOST_EATEN_PAUSE_MS: i64 = 1_000;

pub fn seconds(value: u32) -> TimeDelta {
    TimeDelta::seconds(value as i64)
}

pub fn attract_mode_delay() -> TimeDelta {
    TimeDelta::seconds(ATTRACT_MODE_DELAY_SECONDS)
}

pub fn dying_delay() -> TimeDelta {
    TimeDelta::seconds(DYING_SECONDS)
}

pub fn respawn_delay() -> TimeDelta {
    TimeDelta::seconds(RESPAWN_SECONDS)
}

pub fn ghost_eaten_pause() -> TimeDelta {
    TimeDelta::milliseconds(GHOST_EATEN_PAUSE_MS)
}

/// Points for the `eaten`-th ghost (0-based) caught under one power pill.
pub fn ghost_points(eaten: u32) -> u32 {
    FIRST_GHOST_POINTS.saturating_mul(1u32 << eaten.min(16))
}
