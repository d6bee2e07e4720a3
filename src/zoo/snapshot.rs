// -----------------------------------------------------------------------------
// State exposed to the UI
// -----------------------------------------------------------------------------

use std::time::Duration;

use super::AnimalState;

/// Immutable copy of the clock state handed to subscribers and the UI.
#[derive(Clone, Debug)]
pub struct ZooSnapshot {
    pub is_daytime: bool,
    pub racoon: AnimalState,
    pub parrot: AnimalState,

    /// Total day/night flips since construction. The UI uses this to spot
    /// fresh state without diffing fields.
    pub generation: u64,

    /// Time remaining until the ticker's next flip, measured when the
    /// snapshot was taken.
    pub time_to_flip: Duration,
}

impl ZooSnapshot {
    /// Both animals in display order.
    pub fn animals(&self) -> [&AnimalState; 2] {
        [&self.racoon, &self.parrot]
    }
}
