/// A (low, high) temperature bound, built fresh for each validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitPair {
    pub low: f64,
    pub high: f64,
}

impl LimitPair {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A pair is valid only when the bounds strictly increase; equal bounds
    /// are invalid.
    pub fn is_valid(&self) -> bool {
        self.low < self.high
    }
}
