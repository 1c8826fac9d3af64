use clap::Parser;
use chrono::{TimeDelta, Utc};
use log::{LevelFilter, Log, Metadata, Record};
use npacman_engine::clock::{GameClock, IntervalClock, ScriptedClock};
use npacman_engine::constants::TICK_MS;
use npacman_engine::ghost::Ghost;
use npacman_engine::pacman::PacMan;
use npacman_engine::settings::GameSettings;
use npacman_engine::strategy::{GhostStrategy, RandomDirectionPicker, Target};
use npacman_engine::types::{Cell, Direction, GameNotification, GameStatus};
use npacman_engine::Game;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const WIDTH: i32 = 21;
const HEIGHT: i32 = 15;
const TUNNEL_ROW: i32 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long, default_value_t = 60)]
    seconds: u32,
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u64,
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long)]
    lives: Option<u32>,
    #[arg(long)]
    realtime: bool,
    #[arg(long, default_value = "left", value_parser = parse_heading)]
    heading: Direction,
    /// Print a snapshot every N ticks; 0 prints none.
    #[arg(long, default_value_t = 10)]
    sample_every: u64,
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Debug, Serialize)]
struct RunResultLine {
    seed: u32,
    ticks: u64,
    status: GameStatus,
    score: u32,
    lives: u32,
    #[serde(rename = "coinsEaten")]
    coins_eaten: u32,
    #[serde(rename = "coinsLeft")]
    coins_left: usize,
    notifications: BTreeMap<GameNotification, u32>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: i64,
    level: String,
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

struct JsonLogger;

static LOGGER: JsonLogger = JsonLogger;

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        emit_log(
            &record.level().to_string().to_lowercase(),
            "engine",
            None,
            None,
            json!({
                "target": record.target(),
                "message": record.args().to_string(),
            }),
        );
    }

    fn flush(&self) {}
}

type NotificationCounts = Arc<Mutex<BTreeMap<GameNotification, u32>>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut game = match Game::new(build_arena(seed, cli.lives, cli.heading)) {
        Ok(game) => game,
        Err(error) => {
            emit_log(
                "error",
                "invalid_settings",
                Some(seed),
                None,
                json!({ "error": error.to_string() }),
            );
            std::process::exit(2);
        }
    };
    let counts = count_notifications(&mut game);
    game.start_game();
    game.press_start();

    let tick_ms = cli.tick_ms.max(1);
    let ticks = u64::from(cli.seconds) * 1000 / tick_ms;
    emit_log(
        "info",
        "run_started",
        Some(seed),
        None,
        json!({
            "seconds": cli.seconds,
            "tickMs": tick_ms,
            "ticks": ticks,
            "realtime": cli.realtime,
            "lives": game.lives(),
            "coins": game.coins().len(),
        }),
    );

    let mut steering = StdRng::seed_from_u64(u64::from(seed));
    let delivered = if cli.realtime {
        let mut clock = IntervalClock::new(Duration::from_millis(tick_ms)).with_limit(ticks);
        run(&mut game, &mut clock, &mut steering, cli.sample_every).await
    } else {
        let mut clock = scripted_clock(ticks, tick_ms);
        run(&mut game, &mut clock, &mut steering, cli.sample_every).await
    };

    let result = build_result(&game, seed, delivered, &counts);
    println!(
        "{}",
        serde_json::to_string(&result).expect("run result should serialize")
    );
    emit_log(
        "info",
        "run_finished",
        Some(seed),
        Some(delivered),
        json!({
            "status": result.status,
            "score": result.score,
            "gameOver": game.is_over(),
        }),
    );
}

async fn run(
    game: &mut Game,
    clock: &mut impl GameClock,
    steering: &mut StdRng,
    sample_every: u64,
) -> u64 {
    let mut delivered = 0;
    while let Some(now) = clock.tick().await {
        steer(game, steering);
        game.tick(now);
        delivered += 1;

        if sample_every > 0 && delivered % sample_every == 0 {
            println!(
                "{}",
                serde_json::to_string(&game.snapshot()).expect("snapshot should serialize")
            );
        }
        if game.is_over() {
            break;
        }
    }
    delivered
}

fn scripted_clock(ticks: u64, tick_ms: u64) -> ScriptedClock {
    let start = Utc::now();
    ScriptedClock::new((0..ticks).map(|idx| {
        let offset = i64::try_from(idx.saturating_mul(tick_ms)).unwrap_or(i64::MAX);
        start + TimeDelta::milliseconds(offset)
    }))
}

/// Turns at random now and then, and always when the way ahead is blocked.
fn steer(game: &mut Game, rng: &mut StdRng) {
    let pacman = game.pacman();
    let walls = game.walls();
    let open: Vec<Direction> = Direction::PRIORITY
        .into_iter()
        .filter(|dir| !walls.contains(&pacman.location.step(*dir)))
        .collect();
    if open.is_empty() {
        return;
    }
    if open.contains(&pacman.direction) && !rng.random_bool(0.125) {
        return;
    }
    game.change_direction(open[rng.random_range(0..open.len())]);
}

fn count_notifications(game: &mut Game) -> NotificationCounts {
    let counts: NotificationCounts = Arc::new(Mutex::new(BTreeMap::new()));
    for kind in GameNotification::ALL {
        let counts = Arc::clone(&counts);
        game.subscribe(kind, move || {
            if let Ok(mut counts) = counts.lock() {
                *counts.entry(kind).or_insert(0) += 1;
            }
        });
    }
    counts
}

fn build_result(game: &Game, seed: u32, ticks: u64, counts: &NotificationCounts) -> RunResultLine {
    let notifications = counts
        .lock()
        .map(|counts| counts.clone())
        .unwrap_or_default();
    RunResultLine {
        seed,
        ticks,
        status: game.status(),
        score: game.score(),
        lives: game.lives(),
        coins_eaten: game.coins_eaten(),
        coins_left: game.coins().len(),
        notifications,
    }
}

fn in_house_area(x: i32, y: i32) -> bool {
    (7..=13).contains(&x) && (5..=9).contains(&y)
}

fn parse_heading(value: &str) -> Result<Direction, String> {
    Direction::parse_move(value).ok_or_else(|| format!("unknown heading {value:?}"))
}

fn build_arena(seed: u32, lives: Option<u32>, heading: Direction) -> GameSettings {
    let pacman = PacMan::new(Cell::new(10, 11), heading);
    let mut settings = GameSettings::new(WIDTH, HEIGHT, pacman)
        .with_direction_picker(RandomDirectionPicker::new(seed));
    settings.initial_game_status = GameStatus::AttractMode;
    if let Some(lives) = lives {
        settings.initial_lives = lives;
    }

    for x in 0..WIDTH {
        settings.walls.insert(Cell::new(x, 0));
        settings.walls.insert(Cell::new(x, HEIGHT - 1));
    }
    for y in 1..HEIGHT - 1 {
        if y == TUNNEL_ROW {
            continue;
        }
        settings.walls.insert(Cell::new(0, y));
        settings.walls.insert(Cell::new(WIDTH - 1, y));
    }
    for y in (2..HEIGHT - 1).step_by(4) {
        for x in (2..WIDTH - 1).step_by(4) {
            if !in_house_area(x, y) {
                settings.walls.insert(Cell::new(x, y));
            }
        }
    }

    let door = Cell::new(10, 6);
    for x in 8..=12 {
        if x != door.x {
            settings.walls.insert(Cell::new(x, 6));
        }
        settings.walls.insert(Cell::new(x, 8));
    }
    settings.walls.extend([Cell::new(8, 7), Cell::new(12, 7)]);
    settings.doors.insert(door);
    settings
        .ghost_house
        .extend([Cell::new(9, 7), Cell::new(10, 7), Cell::new(11, 7)]);

    settings
        .portals
        .insert(Cell::new(-1, TUNNEL_ROW), Cell::new(WIDTH - 1, TUNNEL_ROW));
    settings
        .portals
        .insert(Cell::new(WIDTH, TUNNEL_ROW), Cell::new(0, TUNNEL_ROW));

    settings.power_pills.extend([
        Cell::new(1, 1),
        Cell::new(WIDTH - 2, 1),
        Cell::new(1, HEIGHT - 2),
        Cell::new(WIDTH - 2, HEIGHT - 2),
    ]);
    for y in 1..HEIGHT - 1 {
        for x in 1..WIDTH - 1 {
            let cell = Cell::new(x, y);
            let blocked = settings.walls.contains(&cell)
                || settings.doors.contains(&cell)
                || settings.ghost_house.contains(&cell);
            if blocked || settings.power_pills.contains(&cell) || cell == pacman.location {
                continue;
            }
            settings.coins.insert(cell);
        }
    }
    settings.fruit = Cell::new(10, 9);

    settings
        .with_ghost(Ghost::new(
            "Blinky",
            Cell::new(10, 5),
            Direction::Left,
            Cell::new(WIDTH - 2, 0),
            GhostStrategy::DirectTo(Target::PacMan),
            0,
        ))
        .with_ghost(Ghost::new(
            "Pinky",
            Cell::new(9, 7),
            Direction::Up,
            Cell::new(1, 0),
            GhostStrategy::DirectTo(Target::AheadOfPacMan(4)),
            0,
        ))
        .with_ghost(Ghost::new(
            "Inky",
            Cell::new(10, 7),
            Direction::Up,
            Cell::new(WIDTH - 2, HEIGHT - 1),
            GhostStrategy::DirectTo(Target::AheadOfPacMan(2)),
            30,
        ))
        .with_ghost(Ghost::new(
            "Clyde",
            Cell::new(11, 7),
            Direction::Up,
            Cell::new(1, HEIGHT - 1),
            GhostStrategy::DirectTo(Target::Cell(Cell::new(1, HEIGHT - 2))),
            60,
        ))
}

fn emit_log(level: &str, event: &str, seed: Option<u32>, tick: Option<u64>, details: Value) {
    let log_line = StructuredLogLine {
        timestamp_ms: Utc::now().timestamp_millis(),
        level: level.to_string(),
        event: event.to_string(),
        seed,
        tick,
        details,
    };
    eprintln!(
        "{}",
        serde_json::to_string(&log_line).expect("structured log should serialize")
    );
}
