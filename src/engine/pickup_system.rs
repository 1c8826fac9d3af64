use super::*;

impl Game {
    /// Returns whether a power pill was eaten. Frightening waits until ghosts have moved.
    pub(super) fn apply_pickups(&mut self, now: DateTime<Utc>) -> bool {
        let location = self.state.pacman().location;

        if self.state.remove_coin(location) {
            self.award(COIN_POINTS);
            self.notifications.fire(GameNotification::EatCoin);
            self.maybe_show_fruit(now);
        }

        let pill_eaten = self.state.remove_power_pill(location);
        if pill_eaten {
            self.award(POWER_PILL_POINTS);
            self.notifications.fire(GameNotification::EatPowerPill);
        }

        if self.state.fruit_visible_until.is_some() && location == self.settings.fruit {
            self.state.fruit_visible_until = None;
            self.award(FRUIT_POINTS);
            self.notifications.fire(GameNotification::EatFruit);
            debug!("fruit eaten at {location}");
        }

        pill_eaten
    }

    fn maybe_show_fruit(&mut self, now: DateTime<Utc>) {
        let coins_eaten = self.state.coins_eaten();
        if !self
            .settings
            .fruit_appears_after_coins_eaten
            .contains(&coins_eaten)
        {
            return;
        }
        let until = now + seconds(self.settings.fruit_visible_for_seconds);
        self.state.fruit_visible_until = Some(until);
        debug!("fruit shown after {coins_eaten} coins until {until}");
    }

    pub(super) fn expire_fruit(&mut self, now: DateTime<Utc>) {
        if matches!(self.state.fruit_visible_until, Some(until) if now >= until) {
            self.state.fruit_visible_until = None;
        }
    }

    pub(super) fn award(&mut self, points: u32) {
        self.state.increase_score(points);

        let threshold = self.settings.points_needed_for_bonus_life;
        if threshold == 0 || self.state.bonus_life_awarded || self.state.score() < threshold {
            return;
        }
        self.state.bonus_life_awarded = true;
        self.state.increase_lives();
        self.notifications.fire(GameNotification::ExtraLife);
        info!("bonus life at {} points", self.state.score());
    }
}
