use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use super::Game;
use crate::ghost::Ghost;
use crate::pacman::PacMan;
use crate::settings::{GameSettings, SettingsError};
use crate::strategy::{DirectionPicker, GhostStrategy, Target};
use crate::types::{AlivePhase, Cell, Direction, GameNotification, GameStatus, GhostStatus};

struct FirstOffered;

impl DirectionPicker for FirstOffered {
    fn pick(&mut self, available: &[Direction]) -> Option<Direction> {
        available.first().copied()
    }
}

/// Takes its direction whenever offered, otherwise the first one.
struct Prefer(Direction);

impl DirectionPicker for Prefer {
    fn pick(&mut self, available: &[Direction]) -> Option<Direction> {
        if available.contains(&self.0) {
            Some(self.0)
        } else {
            available.first().copied()
        }
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn at(ms: i64) -> DateTime<Utc> {
    t0() + TimeDelta::milliseconds(ms)
}

fn settings(x: i32, y: i32, direction: Direction) -> GameSettings {
    GameSettings::new(40, 40, PacMan::new(Cell::new(x, y), direction))
        .with_direction_picker(FirstOffered)
}

fn ghost(name: &str, x: i32, y: i32, direction: Direction, strategy: GhostStrategy) -> Ghost {
    Ghost::new(name, Cell::new(x, y), direction, Cell::TOP_LEFT, strategy, 0)
}

fn started(settings: GameSettings) -> Game {
    let mut game = Game::new(settings).expect("valid settings");
    game.start_game();
    game
}

fn counter(game: &mut Game, kind: GameNotification) -> Arc<Mutex<u32>> {
    let count = Arc::new(Mutex::new(0));
    let inner = Arc::clone(&count);
    game.subscribe(kind, move || *inner.lock().expect("lock") += 1);
    count
}

fn count(counter: &Arc<Mutex<u32>>) -> u32 {
    *counter.lock().expect("lock")
}

fn ghost_at(game: &Game, name: &str) -> Ghost {
    game.state.ghosts()[name].clone()
}

fn boxed_house(settings: &mut GameSettings) {
    settings.walls.extend(
        [
            (11, 13),
            (13, 13),
            (14, 13),
            (11, 14),
            (14, 14),
            (11, 15),
            (12, 15),
            (13, 15),
            (14, 15),
        ]
        .map(Cell::from),
    );
    settings.doors.insert(Cell::new(12, 13));
    settings.ghost_house.extend([Cell::new(12, 14), Cell::new(13, 14)]);
}

#[test]
fn ticks_before_start_are_ignored() {
    let mut game = Game::new(settings(10, 10, Direction::Left)).expect("valid settings");
    let pre_tick = counter(&mut game, GameNotification::PreTick);

    game.tick(t0());
    assert_eq!(game.tick_count(), 0);
    assert_eq!(game.pacman().location, Cell::new(10, 10));
    assert_eq!(count(&pre_tick), 0);

    game.start_game();
    game.tick(t0());
    assert_eq!(game.tick_count(), 1);
    assert_eq!(game.pacman().location, Cell::new(9, 10));
    assert_eq!(count(&pre_tick), 1);
    assert_eq!(game.last_tick(), Some(t0()));
}

#[test]
fn invalid_settings_are_reported() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.walls.insert(Cell::new(10, 10));
    assert!(matches!(
        Game::new(settings),
        Err(SettingsError::PacManInWall(_))
    ));
}

#[test]
fn ghost_with_fixed_strategy_moves_each_tick() {
    let mut game = started(settings(10, 10, Direction::Left).with_ghost(ghost(
        "Blinky",
        0,
        0,
        Direction::Right,
        GhostStrategy::Fixed(Direction::Right),
    )));

    game.tick(t0());

    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(1, 0));
    assert_eq!(game.pacman().location, Cell::new(9, 10));
}

#[test]
fn pacman_stops_at_walls_and_rejects_turns_into_them() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.walls.extend([Cell::new(9, 10), Cell::new(10, 9)]);
    let mut game = started(settings);

    game.tick(t0());
    assert_eq!(game.pacman().location, Cell::new(10, 10));

    game.change_direction(Direction::Up);
    assert_eq!(game.pacman().direction, Direction::Left);

    game.change_direction(Direction::Down);
    game.tick(at(100));
    assert_eq!(game.pacman().location, Cell::new(10, 11));
}

#[test]
fn pacman_cannot_turn_into_a_door() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.doors.insert(Cell::new(10, 11));
    let mut game = started(settings);

    game.change_direction(Direction::Down);
    assert_eq!(game.pacman().direction, Direction::Left);
}

#[test]
fn portal_lands_one_step_past_its_exit() {
    let mut settings = settings(9, 1, Direction::Right);
    settings.portals.insert(Cell::new(10, 1), Cell::new(1, 5));
    let mut game = started(settings);

    game.tick(t0());

    assert_eq!(game.pacman().location, Cell::new(2, 5));
}

#[test]
fn portal_exit_next_to_a_wall_keeps_pacman_on_the_exit() {
    let mut settings = settings(9, 1, Direction::Right);
    settings.portals.insert(Cell::new(10, 1), Cell::new(1, 5));
    settings.walls.insert(Cell::new(2, 5));
    let mut game = started(settings);

    game.tick(t0());

    assert_eq!(game.pacman().location, Cell::new(1, 5));
    assert!(!game.walls().contains(&game.pacman().location));
}

#[test]
fn ghost_walking_into_a_portal_is_teleported() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.portals.insert(Cell::new(10, 1), Cell::new(1, 5));
    let mut game = started(settings.with_ghost(ghost(
        "Blinky",
        9,
        1,
        Direction::Left,
        GhostStrategy::Fixed(Direction::Right),
    )));

    game.tick(t0());

    assert_eq!(ghost_at(&game, "Blinky").location, Cell::new(2, 5));
}

#[test]
fn eating_a_coin_scores_and_notifies() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.coins.extend([Cell::new(9, 10), Cell::new(3, 3)]);
    let mut game = started(settings);
    let eat_coin = counter(&mut game, GameNotification::EatCoin);

    game.tick(t0());

    assert_eq!(game.score(), 10);
    assert_eq!(count(&eat_coin), 1);
    assert!(!game.coins().contains(&Cell::new(9, 10)));
    assert_eq!(game.coins_eaten(), 1);

    game.tick(at(100));
    assert_eq!(game.score(), 10);
    assert_eq!(count(&eat_coin), 1);
}

#[test]
fn bonus_life_is_awarded_once() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.points_needed_for_bonus_life = 20;
    settings
        .coins
        .extend([Cell::new(9, 10), Cell::new(8, 10), Cell::new(7, 10)]);
    let mut game = started(settings);
    let extra_life = counter(&mut game, GameNotification::ExtraLife);

    game.tick(at(0));
    assert_eq!(game.lives(), 3);
    game.tick(at(100));
    assert_eq!(game.lives(), 4);
    game.tick(at(200));
    assert_eq!(game.lives(), 4);
    assert_eq!(count(&extra_life), 1);
}

#[test]
fn zero_threshold_disables_bonus_life() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.points_needed_for_bonus_life = 0;
    settings.coins.insert(Cell::new(9, 10));
    let mut game = started(settings);

    game.tick(t0());

    assert_eq!(game.score(), 10);
    assert_eq!(game.lives(), 3);
}

#[test]
fn fruit_appears_after_coins_and_can_be_eaten() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.coins.insert(Cell::new(9, 10));
    settings.fruit = Cell::new(8, 10);
    settings.fruit_appears_after_coins_eaten = vec![1];
    let mut game = started(settings);
    let eat_fruit = counter(&mut game, GameNotification::EatFruit);

    assert_eq!(game.fruit(), None);
    game.tick(at(0));
    assert_eq!(game.fruit(), Some(Cell::new(8, 10)));

    game.tick(at(100));
    assert_eq!(game.fruit(), None);
    assert_eq!(game.score(), 110);
    assert_eq!(count(&eat_fruit), 1);
}

#[test]
fn fruit_disappears_when_its_time_is_up() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.coins.insert(Cell::new(9, 10));
    settings.fruit = Cell::new(30, 30);
    settings.fruit_appears_after_coins_eaten = vec![1];
    settings.fruit_visible_for_seconds = 10;
    let mut game = started(settings);

    game.tick(at(0));
    game.tick(at(9_900));
    assert_eq!(game.fruit(), Some(Cell::new(30, 30)));
    game.tick(at(10_000));
    assert_eq!(game.fruit(), None);
}

#[test]
fn power_pill_frightens_ghosts_until_deadline() {
    let mut settings = settings(10, 10, Direction::Right);
    settings.power_pills.insert(Cell::new(11, 10));
    settings.frightened_time_in_seconds = 5;
    let settings = ["Blinky", "Pinky", "Inky"]
        .into_iter()
        .fold(settings, |settings, name| {
            settings.with_ghost(ghost(
                name,
                35,
                35,
                Direction::Left,
                GhostStrategy::StandStill,
            ))
        });
    let mut game = started(settings);
    let eat_pill = counter(&mut game, GameNotification::EatPowerPill);

    game.tick(at(0));
    assert_eq!(game.score(), 50);
    assert_eq!(count(&eat_pill), 1);
    assert!(game.ghosts().values().all(Ghost::edible));

    game.tick(at(4_900));
    assert!(game.ghosts().values().all(Ghost::edible));

    let before: Vec<Cell> = game.ghosts().values().map(|g| g.location).collect();
    game.tick(at(5_000));
    let after: Vec<Cell> = game.ghosts().values().map(|g| g.location).collect();
    assert!(game.ghosts().values().all(|g| g.status == GhostStatus::Alive));
    assert_eq!(before, after);
}

#[test]
fn frightened_ghosts_reverse_then_move_every_other_tick() {
    let mut settings = settings(10, 10, Direction::Right);
    settings.power_pills.insert(Cell::new(11, 10));
    let mut game = started(settings.with_ghost(ghost(
        "Blinky",
        30,
        30,
        Direction::Left,
        GhostStrategy::StandStill,
    )));

    game.tick(at(0));
    let blinky = ghost_at(&game, "Blinky");
    assert_eq!(blinky.direction, Direction::Right);
    assert_eq!(blinky.location, Cell::new(30, 30));

    let mut path = Vec::new();
    for step in 1..=4 {
        game.tick(at(step * 100));
        path.push(ghost_at(&game, "Blinky").location);
    }
    assert_eq!(
        path,
        vec![
            Cell::new(30, 30),
            Cell::new(30, 29),
            Cell::new(30, 29),
            Cell::new(30, 28),
        ]
    );
}

#[test]
fn ghosts_take_their_normal_step_on_the_pill_tick() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.power_pills.insert(Cell::new(9, 10));
    let right = GhostStrategy::Fixed(Direction::Right);
    let mut game = started(
        settings
            .with_ghost(ghost("Blinky", 7, 10, Direction::Left, right))
            .with_ghost(ghost("Inky", 10, 13, Direction::Left, right)),
    );

    game.tick(at(0));
    assert_eq!(game.pacman().location, Cell::new(9, 10));
    assert_eq!(ghost_at(&game, "Blinky").location, Cell::new(8, 10));
    assert_eq!(ghost_at(&game, "Inky").location, Cell::new(11, 13));
    assert!(game.ghosts().values().all(Ghost::edible));

    game.tick(at(100));
    assert_eq!(game.pacman().location, Cell::new(8, 10));
    assert!(!ghost_at(&game, "Blinky").edible());
    assert!(ghost_at(&game, "Inky").edible());
}

#[test]
fn edible_ghost_moves_at_half_speed_after_the_pill_tick() {
    let mut settings =
        settings(10, 10, Direction::Left).with_direction_picker(Prefer(Direction::Down));
    settings.power_pills.insert(Cell::new(9, 10));
    let mut game = started(settings.with_ghost(ghost(
        "Blinky",
        10,
        12,
        Direction::Right,
        GhostStrategy::Fixed(Direction::Right),
    )));

    let mut path = Vec::new();
    for step in 0..5 {
        game.tick(at(step * 100));
        path.push(ghost_at(&game, "Blinky").location);
    }

    assert_eq!(
        path,
        vec![
            Cell::new(11, 12),
            Cell::new(11, 12),
            Cell::new(11, 13),
            Cell::new(11, 13),
            Cell::new(11, 14),
        ]
    );
}

#[test]
fn second_pill_extends_frightened_time() {
    let mut settings = settings(10, 10, Direction::Right);
    settings
        .power_pills
        .extend([Cell::new(11, 10), Cell::new(13, 10)]);
    settings.frightened_time_in_seconds = 5;
    let mut game = started(settings.with_ghost(ghost(
        "Pinky",
        35,
        35,
        Direction::Left,
        GhostStrategy::StandStill,
    )));

    game.tick(at(0));
    game.tick(at(1_000));
    game.tick(at(2_000));
    assert_eq!(game.score(), 100);

    game.tick(at(6_000));
    assert!(ghost_at(&game, "Pinky").edible());
    game.tick(at(7_000));
    assert!(!ghost_at(&game, "Pinky").edible());
}

#[test]
fn ghost_leaves_house_once_enough_coins_are_eaten() {
    let mut settings = settings(20, 20, Direction::Left);
    settings.coins.extend([Cell::new(19, 20), Cell::new(5, 30)]);
    settings.doors.insert(Cell::new(0, 1));
    settings
        .ghost_house
        .extend([Cell::new(1, 2), Cell::new(0, 2)]);
    let leaving = Ghost::new(
        "Blinky",
        Cell::new(1, 2),
        Direction::Left,
        Cell::TOP_LEFT,
        GhostStrategy::StandStill,
        1,
    );
    let waiting = Ghost::new(
        "Clyde",
        Cell::new(1, 2),
        Direction::Left,
        Cell::TOP_LEFT,
        GhostStrategy::StandStill,
        10,
    );
    let mut game = started(settings.with_ghost(leaving).with_ghost(waiting));

    game.tick(at(0));
    assert_eq!(ghost_at(&game, "Blinky").location, Cell::new(1, 2));
    assert_eq!(game.coins_eaten(), 1);

    let mut path = Vec::new();
    for step in 1..=3 {
        game.tick(at(step * 100));
        path.push(ghost_at(&game, "Blinky").location);
    }
    assert_eq!(
        path,
        vec![Cell::new(0, 2), Cell::new(0, 1), Cell::new(0, 0)]
    );
    assert_eq!(ghost_at(&game, "Clyde").location, Cell::new(1, 2));
}

#[test]
fn ghosts_held_in_house_are_not_frightened() {
    let mut settings = settings(20, 20, Direction::Left);
    settings.power_pills.insert(Cell::new(19, 20));
    settings.doors.insert(Cell::new(0, 1));
    settings.ghost_house.insert(Cell::new(0, 2));
    let held = Ghost::new(
        "Clyde",
        Cell::new(0, 2),
        Direction::Left,
        Cell::TOP_LEFT,
        GhostStrategy::StandStill,
        10,
    );
    let mut game = started(settings.with_ghost(held).with_ghost(ghost(
        "Blinky",
        30,
        30,
        Direction::Left,
        GhostStrategy::StandStill,
    )));

    game.tick(t0());

    assert_eq!(ghost_at(&game, "Clyde").status, GhostStatus::Alive);
    assert!(ghost_at(&game, "Blinky").edible());
}

#[test]
fn eaten_ghost_pauses_game_then_runs_home() {
    let mut settings = settings(10, 10, Direction::Left);
    boxed_house(&mut settings);
    settings.power_pills.insert(Cell::new(9, 10));
    let mut game = started(
        settings
            .with_ghost(ghost(
                "Blinky",
                7,
                10,
                Direction::Left,
                GhostStrategy::Fixed(Direction::Right),
            ))
            .with_ghost(ghost(
                "Pinky",
                30,
                30,
                Direction::Left,
                GhostStrategy::StandStill,
            )),
    );
    let eat_ghost = counter(&mut game, GameNotification::EatGhost);

    game.tick(at(0));
    assert_eq!(ghost_at(&game, "Blinky").location, Cell::new(8, 10));
    assert!(ghost_at(&game, "Blinky").edible());

    game.tick(at(100));
    assert_eq!(game.pacman().location, Cell::new(8, 10));
    assert_eq!(ghost_at(&game, "Blinky").status, GhostStatus::Score);
    assert_eq!(count(&eat_ghost), 1);
    assert_eq!(game.score(), 250);

    let pinky = ghost_at(&game, "Pinky").location;
    game.tick(at(200));
    game.tick(at(1_000));
    assert_eq!(game.pacman().location, Cell::new(8, 10));
    assert_eq!(ghost_at(&game, "Pinky").location, pinky);
    assert_eq!(ghost_at(&game, "Blinky").status, GhostStatus::Score);

    game.tick(at(1_100));
    let blinky = ghost_at(&game, "Blinky");
    assert_eq!(blinky.status, GhostStatus::RunningHome);
    assert_eq!(blinky.location.manhattan(Cell::new(8, 10)), 1);
    assert_eq!(game.pacman().location, Cell::new(7, 10));

    for step in 1..=7 {
        game.tick(at(1_100 + step * 100));
    }
    let blinky = ghost_at(&game, "Blinky");
    assert_eq!(blinky.location, Cell::new(12, 14));
    assert_eq!(blinky.status, GhostStatus::Alive);
}

#[test]
fn several_ghosts_can_be_eaten_in_one_tick() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.power_pills.insert(Cell::new(9, 10));
    let fixed = GhostStrategy::Fixed(Direction::Right);
    let mut game = started(
        settings
            .with_ghost(ghost("Blinky", 7, 10, Direction::Left, fixed))
            .with_ghost(ghost("Inky", 7, 10, Direction::Left, fixed)),
    );
    let eat_ghost = counter(&mut game, GameNotification::EatGhost);

    game.tick(at(0));
    game.tick(at(100));

    assert_eq!(count(&eat_ghost), 2);
    assert_eq!(game.score(), 50 + 200 + 400);
    assert!(game
        .ghosts()
        .values()
        .all(|g| g.status == GhostStatus::Score));
}

#[test]
fn swapping_cells_with_a_ghost_counts_as_collision() {
    let mut game = started(settings(5, 5, Direction::Right).with_ghost(ghost(
        "Blinky",
        6,
        5,
        Direction::Left,
        GhostStrategy::Fixed(Direction::Left),
    )));

    game.tick(t0());

    assert_eq!(game.status(), GameStatus::Dying);
    assert_eq!(game.lives(), 2);
}

#[test]
fn caught_pacman_dies_then_respawns_eight_seconds_later() {
    let mut game = started(settings(3, 2, Direction::Left).with_ghost(ghost(
        "Blinky",
        1,
        2,
        Direction::Right,
        GhostStrategy::DirectTo(Target::PacMan),
    )));
    let dying = counter(&mut game, GameNotification::PacManDying);
    let respawning = counter(&mut game, GameNotification::Respawning);

    game.tick(at(0));
    assert_eq!(game.status(), GameStatus::Dying);
    assert_eq!(game.lives(), 2);
    assert_eq!(count(&dying), 1);
    assert!(game.ghosts_visible());

    game.tick(at(1_000));
    assert_eq!(game.pacman().location, Cell::new(2, 2));

    game.tick(at(4_000));
    assert_eq!(game.status(), GameStatus::Respawning);
    assert!(game.ghosts().is_empty());
    assert!(!game.ghosts_visible());
    assert_eq!(count(&respawning), 1);

    game.tick(at(7_900));
    assert_eq!(game.status(), GameStatus::Respawning);

    game.tick(at(8_000));
    assert_eq!(game.status(), GameStatus::Alive);
    assert_eq!(game.phase(), Some(AlivePhase::Scatter));
    assert_eq!(game.pacman().location, Cell::new(3, 2));
    assert_eq!(game.pacman().direction, Direction::Left);
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(1, 2));
    assert_eq!(game.lives(), 2);
}

#[test]
fn ghosts_scatter_after_respawn() {
    let settings = settings(10, 10, Direction::Right).with_ghost(Ghost::new(
        "Blinky",
        Cell::new(11, 9),
        Direction::Left,
        Cell::new(11, 8),
        GhostStrategy::StandStill,
        0,
    ));
    let mut game = started(settings);

    game.tick(at(0));
    game.change_direction(Direction::Up);
    game.tick(at(100));
    assert_eq!(game.status(), GameStatus::Dying);

    game.tick(at(4_100));
    game.tick(at(8_100));
    assert_eq!(game.status(), GameStatus::Alive);

    game.tick(at(9_000));
    let blinky = ghost_at(&game, "Blinky");
    assert_eq!(blinky.location, Cell::new(11, 8));
    assert!(!blinky.edible());
}

#[test]
fn losing_last_life_ends_the_game() {
    let mut settings = settings(3, 2, Direction::Left);
    settings.initial_lives = 1;
    let mut game = started(settings.with_ghost(ghost(
        "Blinky",
        1,
        2,
        Direction::Right,
        GhostStrategy::DirectTo(Target::PacMan),
    )));
    let game_over = counter(&mut game, GameNotification::GameOver);

    game.tick(at(0));
    assert_eq!(game.lives(), 0);
    assert_eq!(game.status(), GameStatus::Dying);

    game.tick(at(4_000));
    assert_eq!(game.status(), GameStatus::Dead);
    assert!(game.is_over());
    assert!(game.ghosts().is_empty());
    assert_eq!(count(&game_over), 1);

    game.change_direction(Direction::Up);
    game.press_start();
    game.tick(at(20_000));
    assert_eq!(game.status(), GameStatus::Dead);
    assert_eq!(game.pacman().direction, Direction::Left);
}

#[test]
fn initial_state_turns_into_attract_mode() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.initial_game_status = GameStatus::Initial;
    let mut game = started(settings);

    game.tick(at(0));
    game.tick(at(3_900));
    assert_eq!(game.status(), GameStatus::Initial);
    assert_eq!(game.pacman().location, Cell::new(10, 10));

    game.tick(at(4_000));
    assert_eq!(game.status(), GameStatus::AttractMode);

    game.press_start();
    assert_eq!(game.status(), GameStatus::Alive);
    assert_eq!(game.phase(), Some(AlivePhase::Scatter));
}

#[test]
fn press_start_before_any_tick_arms_scatter_from_first_tick() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.initial_game_status = GameStatus::Initial;
    let mut game = started(settings);

    game.press_start();
    game.tick(at(1_000));
    game.tick(at(7_900));
    assert_eq!(game.phase(), Some(AlivePhase::Scatter));
    game.tick(at(8_000));
    assert_eq!(game.phase(), Some(AlivePhase::Chase));
}

#[test]
fn ghosts_alternate_between_scatter_and_chase() {
    let mut settings = settings(29, 10, Direction::Left);
    settings.initial_game_status = GameStatus::AttractMode;
    settings.chase_time_in_seconds = 7;
    let mut game = started(settings.with_ghost(Ghost::new(
        "Blinky",
        Cell::new(30, 1),
        Direction::Right,
        Cell::new(1, 1),
        GhostStrategy::Fixed(Direction::Right),
        0,
    )));

    game.tick(at(0));
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(30, 1));
    assert_eq!(game.pacman().location, Cell::new(29, 10));

    game.press_start();
    game.tick(at(0));
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(29, 1));

    game.tick(at(8_000));
    assert_eq!(game.phase(), Some(AlivePhase::Chase));
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(30, 1));
    game.tick(at(9_000));
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(31, 1));

    game.tick(at(15_000));
    assert_eq!(game.phase(), Some(AlivePhase::Scatter));
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(30, 1));
    game.tick(at(16_000));
    assert_eq!(game.ghosts()["Blinky"].location, Cell::new(29, 1));
}

#[test]
fn configured_alive_game_chases_without_timer() {
    let mut game = started(settings(10, 10, Direction::Left));
    game.tick(at(0));
    game.tick(at(600_000));
    assert_eq!(game.phase(), Some(AlivePhase::Chase));
}

#[test]
fn snapshot_serializes_visible_state() {
    let mut settings = settings(10, 10, Direction::Left);
    settings.coins.insert(Cell::new(3, 3));
    let mut game = started(settings.with_ghost(ghost(
        "Blinky",
        0,
        0,
        Direction::Right,
        GhostStrategy::StandStill,
    )));
    game.tick(t0());

    let value = serde_json::to_value(game.snapshot()).expect("snapshot serializes");
    assert_eq!(value["status"], "alive");
    assert_eq!(value["phase"], "chase");
    assert_eq!(value["tick"], 1);
    assert_eq!(value["lives"], 3);
    assert_eq!(value["ghostsVisible"], true);
    assert_eq!(value["pacman"]["x"], 9);
    assert_eq!(value["ghosts"][0]["name"], "Blinky");
    assert_eq!(value["coins"].as_array().map(Vec::len), Some(1));
}
