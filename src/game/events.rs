//! Physics Notifications
//!
//! Discrete gameplay notifications produced by the tick driver and its
//! control operations. Each kind is queued at most once between drains,
//! which is at most once per tick when the queue is drained every tick.

use serde::{Deserialize, Serialize};

use crate::player::ModeId;

/// A notification for the layers above the core (audio, effects, UI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhysicsEvent {
    /// Hazard contact at the player's position
    Death { x: f32, y: f32 },
    /// Left the ground moving against gravity
    Jump { x: f32, y: f32 },
    /// Became grounded
    Land { x: f32, y: f32 },
    /// Active mode changed
    ModeChange { mode: ModeId },
    /// Gravity direction changed
    GravityFlip { now_inverted: bool },
}

/// Discriminant of [`PhysicsEvent`], usable as a bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Death,
    Jump,
    Land,
    ModeChange,
    GravityFlip,
}

impl EventKind {
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl PhysicsEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PhysicsEvent::Death { .. } => EventKind::Death,
            PhysicsEvent::Jump { .. } => EventKind::Jump,
            PhysicsEvent::Land { .. } => EventKind::Land,
            PhysicsEvent::ModeChange { .. } => EventKind::ModeChange,
            PhysicsEvent::GravityFlip { .. } => EventKind::GravityFlip,
        }
    }
}

/// Ordered queue holding at most one event of each kind.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<PhysicsEvent>,
    /// Bitset of queued kinds
    queued: u8,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event`.
    ///
    /// A second `Death`/`Jump`/`Land` before the next drain is dropped. A
    /// second `ModeChange`/`GravityFlip` replaces the queued one's payload,
    /// so the queue always reports the latest mode and gravity direction.
    ///
    /// # Returns
    /// `true` if the event was added or updated an existing entry.
    pub fn push(&mut self, event: PhysicsEvent) -> bool {
        let kind = event.kind();
        if self.queued & kind.bit() == 0 {
            self.queued |= kind.bit();
            self.events.push(event);
            return true;
        }

        match kind {
            EventKind::ModeChange | EventKind::GravityFlip => {
                if let Some(slot) = self.events.iter_mut().find(|e| e.kind() == kind) {
                    *slot = event;
                }
                true
            }
            EventKind::Death | EventKind::Jump | EventKind::Land => false,
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<PhysicsEvent> {
        self.queued = 0;
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.queued = 0;
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_each_kind() {
        let mut queue = EventQueue::new();
        assert!(queue.push(PhysicsEvent::Jump { x: 1.0, y: 2.0 }));
        assert!(!queue.push(PhysicsEvent::Jump { x: 3.0, y: 4.0 }));
        assert!(queue.push(PhysicsEvent::Land { x: 5.0, y: 6.0 }));
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(
            events,
            vec![
                PhysicsEvent::Jump { x: 1.0, y: 2.0 },
                PhysicsEvent::Land { x: 5.0, y: 6.0 },
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.push(PhysicsEvent::Jump { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn test_mode_change_keeps_latest() {
        let mut queue = EventQueue::new();
        queue.push(PhysicsEvent::ModeChange { mode: ModeId::Ship });
        queue.push(PhysicsEvent::GravityFlip { now_inverted: true });
        queue.push(PhysicsEvent::ModeChange { mode: ModeId::Ball });
        let events = queue.drain();
        assert_eq!(
            events,
            vec![
                PhysicsEvent::ModeChange { mode: ModeId::Ball },
                PhysicsEvent::GravityFlip { now_inverted: true },
            ]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let event = PhysicsEvent::GravityFlip { now_inverted: true };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"gravity_flip","now_inverted":true}"#);
    }
}
