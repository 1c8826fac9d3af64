use std::collections::BTreeMap;

use crate::types::GameNotification;

type Callback = Box<dyn FnMut() + Send>;

#[derive(Default)]
pub struct Notifications {
    subscribers: BTreeMap<GameNotification, Vec<Callback>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: GameNotification, callback: impl FnMut() + Send + 'static) {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }

    pub fn fire(&mut self, kind: GameNotification) {
        let Some(callbacks) = self.subscribers.get_mut(&kind) else {
            return;
        };
        for callback in callbacks.iter_mut() {
            callback();
        }
    }
}
