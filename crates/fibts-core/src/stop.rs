//! Cooperative stop requests, polled once per iteration.

/// A non-blocking source of stop requests.
///
/// Run loops call [`StopSignal::stop_requested`] once after each iteration's
/// output; implementations must return immediately.
pub trait StopSignal {
    fn stop_requested(&mut self) -> bool;
}

impl<S: StopSignal + ?Sized> StopSignal for &mut S {
    fn stop_requested(&mut self) -> bool {
        (**self).stop_requested()
    }
}

impl<S: StopSignal + ?Sized> StopSignal for Box<S> {
    fn stop_requested(&mut self) -> bool {
        (**self).stop_requested()
    }
}

/// Never asks to stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn stop_requested(&mut self) -> bool {
        false
    }
}

/// Asks to stop once `limit` iterations have completed.
#[derive(Debug, Clone, Copy)]
pub struct StopAfter {
    limit: u64,
    polls: u64,
}

impl StopAfter {
    pub fn new(limit: u64) -> Self {
        Self { limit, polls: 0 }
    }
}

impl StopSignal for StopAfter {
    fn stop_requested(&mut self) -> bool {
        self.polls += 1;
        self.polls >= self.limit
    }
}

/// Stops when either signal asks to. Both are polled every time.
#[derive(Debug, Clone, Copy)]
pub struct Either<A, B>(pub A, pub B);

impl<A: StopSignal, B: StopSignal> StopSignal for Either<A, B> {
    fn stop_requested(&mut self) -> bool {
        let first = self.0.stop_requested();
        let second = self.1.stop_requested();
        first || second
    }
}

impl<S: StopSignal> StopSignal for Option<S> {
    fn stop_requested(&mut self) -> bool {
        self.as_mut().is_some_and(|s| s.stop_requested())
    }
}
