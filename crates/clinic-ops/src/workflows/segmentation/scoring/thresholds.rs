use serde::Serialize;

/// Population-derived breakpoints at the 25th, 50th, 75th and 100th percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantileThresholds<T> {
    pub q1: T,
    pub q2: T,
    pub q3: T,
    pub q4: T,
}

impl<T> QuantileThresholds<T>
where
    T: Copy + Ord + Default,
{
    /// Sorts `values` ascending and samples indices `⌊0.25n⌋`, `⌊0.5n⌋`,
    /// `⌊0.75n⌋` and `n - 1`. An empty population yields all-default thresholds.
    pub fn from_values(mut values: Vec<T>) -> Self {
        if values.is_empty() {
            return Self {
                q1: T::default(),
                q2: T::default(),
                q3: T::default(),
                q4: T::default(),
            };
        }

        values.sort_unstable();
        let n = values.len();

        Self {
            q1: values[n / 4],
            q2: values[n / 2],
            q3: values[(n * 3) / 4],
            q4: values[n - 1],
        }
    }

    pub fn as_array(&self) -> [T; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }
}
