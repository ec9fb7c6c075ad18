//! Change notifications for presentation layers.
//!
//! The engine emits a [`RoundEvent`] for every change to its snapshot.
//! Observers register a callback and get back a [`SubscriptionId`] they can
//! use to unsubscribe. Callbacks run synchronously inside the command or
//! tick that caused the change, in subscription order.

use serde::{Deserialize, Serialize};

use super::feedback::Verdict;

/// Something observable changed in the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A fresh round was built.
    RoundStarted { total_questions: usize },

    /// A question and its shuffled options are ready; countdown armed.
    QuestionLoaded {
        number: usize,
        total_questions: usize,
        remaining_seconds: u32,
    },

    /// The countdown lost a second.
    CountdownTick { remaining_seconds: u32 },

    /// The current question was answered or timed out.
    AnswerRecorded { verdict: Verdict, score: u32 },

    /// The feedback pause lost a second.
    FeedbackTick { remaining_seconds: u32 },

    /// Every question has been played.
    RoundFinished { score: u32, total_questions: usize },

    /// The round was discarded.
    RoundReset,

    /// The "can start round" predicate flipped.
    StartAvailabilityChanged { available: bool },
}

/// Handle returned by `subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

type Callback = Box<dyn FnMut(&RoundEvent)>;

/// Ordered list of observer callbacks.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Callback)>,
    next_id: u32,
}

impl ObserverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&RoundEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the ID was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Deliver an event to every observer.
    pub fn emit(&mut self, event: &RoundEvent) {
        for (_, callback) in &mut self.observers {
            callback(event);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True if no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
