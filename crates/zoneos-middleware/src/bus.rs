//! Topic-routed publish/subscribe event bus.
//!
//! Built on [`tokio::sync::broadcast`] so every subscriber receives every
//! event without any single subscriber blocking the others.  Traffic is
//! partitioned into two [`Topic`] lanes:
//!
//! | Topic | Typical traffic |
//! |---|---|
//! | [`Topic::PoseStream`] | High-frequency global pose estimates, re-published for observers |
//! | [`Topic::ZoneEvents`] | Low-frequency zone-change notifications |
//!
//! Publishing is fire-and-forget: an event published while nobody listens is
//! silently dropped (the publisher gets back a receiver count of zero), which
//! matches the engine's no-acknowledgment notification model.

use tokio::sync::broadcast;
use tracing::warn;
use zoneos_types::Event;

/// Buffered events per topic before old ones are dropped for slow
/// subscribers.
const DEFAULT_CAPACITY: usize = 256;

/// The routing lanes of the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Global pose estimates fanned out to observers (UIs, recorders).
    PoseStream,
    /// `ZoneChanged` notifications emitted when a transition commits.
    ZoneEvents,
}

/// Shared event bus.  Clone it cheaply – all clones share the same
/// underlying broadcast channels.
#[derive(Clone, Debug)]
pub struct ZoneEventBus {
    pose_stream: broadcast::Sender<Event>,
    zone_events: broadcast::Sender<Event>,
}

impl ZoneEventBus {
    /// Create a bus; `capacity` applies to every topic channel independently.
    pub fn new(capacity: usize) -> Self {
        let (pose_stream, _) = broadcast::channel(capacity);
        let (zone_events, _) = broadcast::channel(capacity);
        Self {
            pose_stream,
            zone_events,
        }
    }

    /// Publish `event` to the given [`Topic`] lane.
    ///
    /// Returns the number of active receivers the event reached; zero when
    /// no subscriber is currently listening (a normal condition, not an
    /// error).
    pub fn publish(&self, topic: Topic, event: Event) -> usize {
        self.topic_sender(topic).send(event).unwrap_or(0)
    }

    /// Subscribe to a single [`Topic`] lane.
    pub fn subscribe(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            receiver: self.topic_sender(topic).subscribe(),
        }
    }

    fn topic_sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::PoseStream => &self.pose_stream,
            Topic::ZoneEvents => &self.zone_events,
        }
    }
}

impl Default for ZoneEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// An async receiver bound to a single [`Topic`] lane.
pub struct TopicReceiver {
    topic: Topic,
    receiver: broadcast::Receiver<Event>,
}

impl TopicReceiver {
    /// Wait for the next event on this topic.
    ///
    /// A `Lagged(n)` error means the subscriber fell behind and `n` events
    /// were dropped; `Closed` means the bus has shut down.
    pub async fn recv(&mut self) -> Result<Event, broadcast::error::RecvError> {
        match self.receiver.recv().await {
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(topic = ?self.topic, lagged_by = n, "bus subscriber lagged");
                Err(broadcast::error::RecvError::Lagged(n))
            }
            other => other,
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }
}
