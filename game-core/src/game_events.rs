use game_types::{Guess, Player, PlayerId, Point};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ImageUploaded,
    TargetPointSet {
        point: Point,
    },
    PlayerAdded {
        player: Player,
    },
    PlayerRemoved {
        player_id: PlayerId,
    },
    QuestionChanged {
        question: String,
    },
    GameStarted {
        player_count: usize,
    },
    TurnStarted {
        player_id: PlayerId,
    },
    PendingGuessPlaced {
        player_id: PlayerId,
        point: Point,
    },
    GuessConfirmed {
        guess: Guess,
    },
    ResultsRevealed {
        podium: Vec<Guess>,
    },
    GameReset,
}

/// Event handler trait for reacting to game transitions
pub trait GameEventHandler {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestHandler {
        events: Rc<RefCell<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: GameEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn test_event_bus_delivers_to_every_handler() {
        let mut bus = GameEventBus::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler { events: first.clone() }));
        bus.add_handler(Box::new(TestHandler { events: second.clone() }));
        assert_eq!(bus.handler_count(), 2);

        bus.publish(GameEvent::GameReset);
        bus.publish(GameEvent::TurnStarted { player_id: PlayerId(4) });

        assert_eq!(first.borrow().len(), 2);
        assert_eq!(*second.borrow(), *first.borrow());
        assert_eq!(first.borrow()[1], GameEvent::TurnStarted { player_id: PlayerId(4) });
    }

    #[test]
    fn test_publish_without_handlers() {
        let mut bus = GameEventBus::default();
        bus.publish(GameEvent::ImageUploaded);
        assert_eq!(bus.handler_count(), 0);
    }
}
