use std::time::{Duration, Instant};

/// Wall-clock stopwatch that can also record named laps, one per pipeline stage.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timer {
    started: Instant,
    last: Instant,
    laps: Vec<(&'static str, Duration)>,
}

impl Default for Timer {
    fn default() -> Self {
        let now = Instant::now();
        Self { started: now, last: now, laps: Vec::new() }
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the timer and forgets every lap.
    #[inline(always)]
    pub fn start(&mut self) {
        *self = Self::default();
    }

    /// Records the time spent since the previous lap (or since the start) under `name`.
    #[inline(always)]
    pub fn lap(&mut self, name: &'static str) -> Duration {
        let now = Instant::now();
        let diff = now - self.last;
        self.last = now;
        self.laps.push((name, diff));
        diff
    }

    /// Time since the timer was started.
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn laps(&self) -> &[(&'static str, Duration)] {
        &self.laps
    }
}

#[test]
fn test_timer() {
    use std::thread;

    let mut timer = Timer::new();

    thread::sleep(Duration::from_millis(20));
    let first = timer.lap("read");
    thread::sleep(Duration::from_millis(10));
    let second = timer.lap("encode");

    assert!(first >= Duration::from_millis(20));
    assert!(second >= Duration::from_millis(10));
    assert!(timer.elapsed() >= first + second);
    assert_eq!(timer.laps().iter().map(|(name, _)| *name).collect::<Vec<_>>(), vec!["read", "encode"]);

    timer.start();
    assert!(timer.laps().is_empty());
}
