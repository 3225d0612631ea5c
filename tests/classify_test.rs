// =============================================================================
// INTEGRATION TESTS - CHANGE CLASSIFICATION
// Verifies the three-case contract over small snapshot universes
// =============================================================================

use slotwatch::services::detector::{classify, Notification, Snapshot};

fn snapshot(slots: &[&str]) -> Snapshot {
    slots.iter().map(|s| s.to_string()).collect()
}

/// Every subset of {a, b}: subsets encoded as bitmasks.
fn universe() -> Vec<Snapshot> {
    let slots = ["2024-05-01 at 10:00", "2024-05-02 at 09:00"];
    (0u8..4)
        .map(|mask| {
            slots
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| s.to_string())
                .collect()
        })
        .collect()
}

#[test]
fn test_every_pair_falls_into_exactly_one_case() {
    for previous in universe() {
        for current in universe() {
            let result = classify(&previous, &current);
            let expected_new: Snapshot = current.difference(&previous).cloned().collect();

            match result {
                Notification::NewSlots(new) => {
                    assert!(!new.is_empty());
                    assert_eq!(new, expected_new);
                }
                Notification::NoneAvailable => {
                    assert!(expected_new.is_empty());
                    assert!(current.is_empty());
                }
                Notification::UnchangedAvailable(slots) => {
                    assert!(expected_new.is_empty());
                    assert!(!current.is_empty());
                    assert_eq!(slots, current);
                }
            }
        }
    }
}

#[test]
fn test_classification_is_deterministic() {
    let previous = snapshot(&["2024-05-01 at 10:00"]);
    let current = snapshot(&["2024-05-01 at 10:00", "2024-05-02 at 09:00"]);

    let first = classify(&previous, &current);
    let second = classify(&previous, &current);
    assert_eq!(first, second);
}

#[test]
fn test_insertion_order_does_not_matter() {
    // Same slots accumulated in opposite orders classify identically.
    let forward: Snapshot = ["2024-05-01 at 10:00", "2024-05-02 at 09:00"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let reverse: Snapshot = ["2024-05-02 at 09:00", "2024-05-01 at 10:00"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let previous = snapshot(&["2024-05-01 at 10:00"]);
    assert_eq!(classify(&previous, &forward), classify(&previous, &reverse));
}
