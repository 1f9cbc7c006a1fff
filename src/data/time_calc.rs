use std::time::Duration;

pub const STAGE_PREPROCESS: usize = 0;
pub const STAGE_INFERENCE: usize = 1;
pub const STAGE_POSTPROCESS: usize = 2;

/// Accumulated per-stage durations over the calls made on one detector.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    n: usize,
    duration: Vec<Duration>,
}

impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.duration.iter().sum::<Duration>()
    }

    /// Number of completed calls.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn avg(&self) -> Duration {
        match self.n {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    pub fn avg_i(&self, i: usize) -> Option<Duration> {
        match self.n {
            0 => None,
            n => self.duration.get(i).map(|d| *d / n as u32),
        }
    }

    pub fn ts(&self) -> &Vec<Duration> {
        &self.duration
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        if i >= self.duration.len() {
            self.duration.resize(i + 1, Duration::ZERO);
        }
        self.duration[i] += x;
    }

    /// Closes one call; averages divide by the number of closed calls.
    pub fn finish_call(&mut self) {
        self.n += 1;
    }

    pub fn clear(&mut self) {
        self.n = Default::default();
        self.duration = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_per_stage() {
        let mut t = TimeCalc::default();
        assert_eq!(t.avg(), Duration::ZERO);
        assert_eq!(t.avg_i(STAGE_INFERENCE), None);

        t.add_or_push(STAGE_INFERENCE, Duration::from_millis(10));
        t.finish_call();
        t.add_or_push(STAGE_INFERENCE, Duration::from_millis(30));
        t.add_or_push(STAGE_PREPROCESS, Duration::from_millis(4));
        t.finish_call();

        assert_eq!(t.n(), 2);
        assert_eq!(t.avg_i(STAGE_INFERENCE), Some(Duration::from_millis(20)));
        assert_eq!(t.avg_i(STAGE_PREPROCESS), Some(Duration::from_millis(2)));
        assert_eq!(t.avg_i(STAGE_POSTPROCESS), None);
        assert_eq!(t.avg(), Duration::from_millis(22));

        t.clear();
        assert_eq!(t.n(), 0);
        assert!(t.ts().is_empty());
    }
}
