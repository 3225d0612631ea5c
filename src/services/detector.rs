use std::collections::BTreeSet;

/// One poll cycle's worth of observed appointment slots.
/// Slot descriptions are opaque strings; only equality matters.
pub type Snapshot = BTreeSet<String>;

/// Outcome of comparing a new snapshot against the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Slots present now that were absent last cycle.
    NewSlots(Snapshot),
    /// Nothing bookable this cycle.
    NoneAvailable,
    /// Slots exist but every one of them was already known.
    UnchangedAvailable(Snapshot),
}

/// Classify the new snapshot against the last observed one.
///
/// Cases are mutually exclusive and checked in priority order: new slots win
/// over everything, an empty current set wins over "unchanged". A previously
/// non-empty set going empty is reported as `NoneAvailable`; there is no
/// dedicated "slots disappeared" case.
pub fn classify(previous: &Snapshot, current: &Snapshot) -> Notification {
    let new_slots: Snapshot = current.difference(previous).cloned().collect();

    if !new_slots.is_empty() {
        Notification::NewSlots(new_slots)
    } else if current.is_empty() {
        Notification::NoneAvailable
    } else {
        Notification::UnchangedAvailable(current.clone())
    }
}
