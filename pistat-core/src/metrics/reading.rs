//! Metric readings with fallback tracking

/// A metric value and whether it was actually measured
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    /// Value reported by the probe
    Measured(T),
    /// Placeholder substituted after a failed probe
    Fallback(T),
}

impl<T> Reading<T> {
    /// The value, measured or not
    pub fn value(&self) -> &T {
        match self {
            Reading::Measured(v) | Reading::Fallback(v) => v,
        }
    }

    /// True if the probe succeeded
    pub fn is_measured(&self) -> bool {
        matches!(self, Reading::Measured(_))
    }
}
