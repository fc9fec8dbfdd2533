use core::time::Duration;
use web_time::Instant;

/// Source of the elapsed play time reported for won games.
pub trait Clock {
    fn elapsed_secs(&self) -> f64;

    /// Starts or resumes timing.
    fn start(&mut self);

    /// Stops timing, the elapsed time is kept.
    fn stop(&mut self);
}

/// Wall-clock stopwatch that only counts while running.
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.running_since.map_or(Duration::ZERO, |since| since.elapsed())
    }
}

impl Clock for Stopwatch {
    fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }
}
