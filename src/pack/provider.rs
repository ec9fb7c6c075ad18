//! Active pack selection and change notifications.
//!
//! The provider owns the pack library and tracks which pack is active.
//! Every mutation that affects what a round would be built from queues a
//! [`PackChange`]; consumers drain them with [`PackProvider::take_changes`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::question::Question;
use super::question_pack::QuestionPack;

/// Identifier for a pack held by a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackId(pub u32);

impl PackId {
    /// Create a new pack ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pack({})", self.0)
    }
}

/// Notification that the round source changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackChange {
    /// A different pack (or none) is now active.
    ActivePackSwapped {
        previous: Option<PackId>,
        current: Option<PackId>,
    },

    /// The active pack gained or lost questions.
    QuestionCountChanged { pack: PackId, count: usize },
}

/// Holds packs and the active selection.
#[derive(Clone, Debug, Default)]
pub struct PackProvider {
    packs: Vec<(PackId, QuestionPack)>,
    active: Option<PackId>,
    next_id: u32,
    pending: Vec<PackChange>,
}

impl PackProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pack to the library. Does not change the active pack.
    pub fn add_pack(&mut self, pack: QuestionPack) -> PackId {
        let id = PackId::new(self.next_id);
        self.next_id += 1;
        debug!(pack = %id, name = %pack.name, "pack added");
        self.packs.push((id, pack));
        id
    }

    /// Remove a pack. If it was active, the first remaining pack becomes active.
    pub fn remove_pack(&mut self, id: PackId) -> Option<QuestionPack> {
        let position = self.packs.iter().position(|(pid, _)| *pid == id)?;
        let (_, pack) = self.packs.remove(position);

        if self.active == Some(id) {
            let next = self.packs.first().map(|(pid, _)| *pid);
            self.swap_active(next);
        }

        Some(pack)
    }

    /// Make a pack active. Returns false if unknown or already active.
    pub fn set_active(&mut self, id: PackId) -> bool {
        if self.active == Some(id) || self.get(id).is_none() {
            return false;
        }
        self.swap_active(Some(id));
        true
    }

    /// Deselect the active pack. Returns false if none was active.
    pub fn clear_active(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.swap_active(None);
        true
    }

    /// Append a question to the active pack.
    pub fn push_question(&mut self, question: Question) -> bool {
        let Some(pack) = self.active_mut() else {
            return false;
        };
        pack.questions.push(question);
        self.queue_count_change();
        true
    }

    /// Remove a question from the active pack by index.
    pub fn remove_question(&mut self, index: usize) -> Option<Question> {
        let pack = self.active_mut()?;
        if index >= pack.questions.len() {
            return None;
        }
        let question = pack.questions.remove(index);
        self.queue_count_change();
        Some(question)
    }

    /// Change the active pack's time budget.
    ///
    /// Running rounds keep the budget they started with, so this queues no change.
    pub fn set_time_per_question(&mut self, seconds: u32) -> bool {
        match self.active_mut() {
            Some(pack) => {
                pack.time_per_question_seconds = seconds;
                true
            }
            None => false,
        }
    }

    /// Get a pack by ID.
    #[must_use]
    pub fn get(&self, id: PackId) -> Option<&QuestionPack> {
        self.packs.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    /// The active pack, if any.
    #[must_use]
    pub fn active(&self) -> Option<&QuestionPack> {
        self.active.and_then(|id| self.get(id))
    }

    /// The active pack's ID, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<PackId> {
        self.active
    }

    /// Iterate packs in insertion order.
    pub fn packs(&self) -> impl Iterator<Item = (PackId, &QuestionPack)> {
        self.packs.iter().map(|(id, pack)| (*id, pack))
    }

    /// Number of packs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    /// True if no packs are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Drain queued change notifications, oldest first.
    pub fn take_changes(&mut self) -> Vec<PackChange> {
        std::mem::take(&mut self.pending)
    }

    fn active_mut(&mut self) -> Option<&mut QuestionPack> {
        let id = self.active?;
        self.packs.iter_mut().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    fn swap_active(&mut self, current: Option<PackId>) {
        let previous = std::mem::replace(&mut self.active, current);
        debug!(?previous, ?current, "active pack swapped");
        self.pending.push(PackChange::ActivePackSwapped { previous, current });
    }

    fn queue_count_change(&mut self) {
        if let Some(id) = self.active {
            let count = self.active().map_or(0, QuestionPack::question_count);
            self.pending.push(PackChange::QuestionCountChanged { pack: id, count });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(name: &str, questions: usize) -> QuestionPack {
        (0..questions).fold(QuestionPack::new(name), |p, i| {
            p.with_question(Question::with_answer(format!("q{i}"), "a", ["b", "c", "d"]))
        })
    }

    #[test]
    fn test_pack_id() {
        let id = PackId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "Pack(3)");
    }

    #[test]
    fn test_add_does_not_activate() {
        let mut provider = PackProvider::new();
        provider.add_pack(pack("a", 1));

        assert!(provider.active().is_none());
        assert!(provider.take_changes().is_empty());
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_set_active_queues_swap() {
        let mut provider = PackProvider::new();
        let a = provider.add_pack(pack("a", 1));
        let b = provider.add_pack(pack("b", 2));

        assert!(provider.set_active(a));
        assert!(!provider.set_active(a));
        assert!(provider.set_active(b));
        assert!(!provider.set_active(PackId::new(99)));

        assert_eq!(
            provider.take_changes(),
            vec![
                PackChange::ActivePackSwapped { previous: None, current: Some(a) },
                PackChange::ActivePackSwapped { previous: Some(a), current: Some(b) },
            ]
        );
        assert_eq!(provider.active().map(|p| p.name.as_str()), Some("b"));
        assert!(provider.take_changes().is_empty());
    }

    #[test]
    fn test_question_edits_queue_count_changes() {
        let mut provider = PackProvider::new();
        assert!(!provider.push_question(Question::with_answer("q", "a", ["b"])));

        let a = provider.add_pack(pack("a", 1));
        provider.set_active(a);
        provider.take_changes();

        assert!(provider.push_question(Question::with_answer("q", "a", ["b"])));
        assert!(provider.remove_question(0).is_some());
        assert!(provider.remove_question(5).is_none());

        assert_eq!(
            provider.take_changes(),
            vec![
                PackChange::QuestionCountChanged { pack: a, count: 2 },
                PackChange::QuestionCountChanged { pack: a, count: 1 },
            ]
        );
    }

    #[test]
    fn test_time_budget_edit_is_silent() {
        let mut provider = PackProvider::new();
        let a = provider.add_pack(pack("a", 1));
        provider.set_active(a);
        provider.take_changes();

        assert!(provider.set_time_per_question(45));
        assert_eq!(provider.active().unwrap().time_per_question_seconds, 45);
        assert!(provider.take_changes().is_empty());
    }

    #[test]
    fn test_remove_active_falls_back_to_first() {
        let mut provider = PackProvider::new();
        let a = provider.add_pack(pack("a", 1));
        let b = provider.add_pack(pack("b", 1));
        provider.set_active(b);
        provider.take_changes();

        assert!(provider.remove_pack(b).is_some());
        assert_eq!(provider.active_id(), Some(a));
        assert_eq!(
            provider.take_changes(),
            vec![PackChange::ActivePackSwapped { previous: Some(b), current: Some(a) }]
        );

        assert!(provider.remove_pack(a).is_some());
        assert_eq!(provider.active_id(), None);
        assert!(provider.is_empty());
    }

    #[test]
    fn test_clear_active() {
        let mut provider = PackProvider::new();
        assert!(!provider.clear_active());

        let a = provider.add_pack(pack("a", 1));
        provider.set_active(a);
        assert!(provider.clear_active());
        assert!(provider.active().is_none());
    }
}
