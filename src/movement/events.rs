/// Movement event log
///
/// Records state changes of the movement controller, stamped with the tick
/// they happened on, for replay comparison and debugging.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Notable things that happened during a tick
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum MovementEvent {
    /// A jump started
    Jumped { tick: u64, vertical_speed: f32 },

    /// The grace window ran out and the actor became airborne
    LeftGround { tick: u64 },

    /// The actor touched down after being airborne
    Landed { tick: u64, impact_speed: f32 },

    /// Vertical speed was cancelled by a floor or ceiling contact
    VerticalContact {
        tick: u64,
        above: bool,
        below: bool,
        cancelled_speed: f32,
    },

    /// Non-finite input was replaced before use
    InputSanitized { tick: u64, movement: bool, look: bool },
}

impl MovementEvent {
    /// Get the tick number for this event
    pub fn tick(&self) -> u64 {
        match self {
            MovementEvent::Jumped { tick, .. } => *tick,
            MovementEvent::LeftGround { tick } => *tick,
            MovementEvent::Landed { tick, .. } => *tick,
            MovementEvent::VerticalContact { tick, .. } => *tick,
            MovementEvent::InputSanitized { tick, .. } => *tick,
        }
    }
}

/// Records movement events
pub struct MovementEventRecorder {
    events: VecDeque<MovementEvent>,

    /// Oldest events are dropped past this many
    capacity: usize,
}

impl MovementEventRecorder {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, event: MovementEvent) {
        log::debug!("movement event {:?}", event);
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Get all events recorded on `tick`
    pub fn tick_events(&self, tick: u64) -> Vec<&MovementEvent> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get all events
    pub fn all_events(&self) -> &VecDeque<MovementEvent> {
        &self.events
    }

    /// Save events to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json).with_context(|| format!("writing event log {path}"))?;
        Ok(())
    }

    /// Load events from JSON file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("reading event log {path}"))?;
        let events: VecDeque<MovementEvent> = serde_json::from_str(&json)?;
        let capacity = events.len().max(4096);

        Ok(Self { events, capacity })
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for MovementEventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_recorder() {
        let mut recorder = MovementEventRecorder::new();

        recorder.record(MovementEvent::Landed {
            tick: 1,
            impact_speed: -3.0,
        });
        recorder.record(MovementEvent::Jumped {
            tick: 4,
            vertical_speed: 10.0,
        });
        recorder.record(MovementEvent::VerticalContact {
            tick: 4,
            above: true,
            below: false,
            cancelled_speed: 9.0,
        });

        assert_eq!(recorder.event_count(), 3);
        assert_eq!(recorder.tick_events(4).len(), 2);
        assert!(recorder.tick_events(2).is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut recorder = MovementEventRecorder::with_capacity(2);
        for tick in 0..5 {
            recorder.record(MovementEvent::LeftGround { tick });
        }
        let ticks: Vec<u64> = recorder.all_events().iter().map(|e| e.tick()).collect();
        assert_eq!(ticks, vec![3, 4]);

        recorder.record(MovementEvent::LeftGround { tick: 5 });
        assert_eq!(recorder.event_count(), 2);
        assert_eq!(recorder.all_events().front().map(|e| e.tick()), Some(4));
    }

    #[test]
    fn test_save_load() {
        let mut recorder = MovementEventRecorder::new();
        recorder.record(MovementEvent::InputSanitized {
            tick: 7,
            movement: true,
            look: false,
        });

        let temp_path = std::env::temp_dir().join("fps_walker_test_events.json");
        let temp_path = temp_path.to_str().unwrap();
        recorder.save_to_file(temp_path).unwrap();

        let loaded = MovementEventRecorder::load_from_file(temp_path).unwrap();
        assert_eq!(loaded.event_count(), 1);
        assert_eq!(loaded.all_events()[0], recorder.all_events()[0]);

        std::fs::remove_file(temp_path).ok();
    }
}
