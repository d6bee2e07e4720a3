/// Which way an animal's sleep schedule tracks daylight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SleepPolarity {
    /// Sleeps while the sun is up.
    Nocturnal,
    /// Sleeps while the sun is down.
    Diurnal,
}

impl SleepPolarity {
    /// Sleep flag this polarity dictates for the given phase of day.
    #[inline]
    pub fn sleeps_during(self, is_daytime: bool) -> bool {
        match self {
            SleepPolarity::Nocturnal => is_daytime,
            SleepPolarity::Diurnal => !is_daytime,
        }
    }
}

/// One animal on display: an immutable name and polarity, plus the sleep
/// flag the clock re-derives on every flip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimalState {
    name: String,
    polarity: SleepPolarity,
    is_sleeping: bool,
}

impl AnimalState {
    pub fn new(name: impl Into<String>, polarity: SleepPolarity, is_sleeping: bool) -> Self {
        Self {
            name: name.into(),
            polarity,
            is_sleeping,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[allow(dead_code)]
    pub fn polarity(&self) -> SleepPolarity {
        self.polarity
    }

    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    /// Re-derive the sleep flag from the current phase of day. Only the
    /// owning clock calls this.
    pub(crate) fn apply_daylight(&mut self, is_daytime: bool) {
        self.is_sleeping = self.polarity.sleeps_during(is_daytime);
    }
}
