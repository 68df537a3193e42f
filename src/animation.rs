use std::time::Duration;

/// How long an idle frame sleeps before polling again. Short enough that a
/// step press is picked up on the next display refresh.
pub const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// What drives the side count forward. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// Advance whenever `interval` seconds have passed since the last advance.
    Timed { interval: f32 },
    /// Advance once per signalled step.
    Stepped,
}

/// Outcome of a single frame decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Regenerate and draw the polygon with this many sides.
    Advance(u32),
    /// Nothing to do this frame.
    Idle,
}

/// Side count state machine.
///
/// The side count cycles through `start..end` and wraps back to `start`.
#[derive(Debug, Clone)]
pub struct Animator {
    sides: u32,
    start: u32,
    end: u32,
    pacing: Pacing,
    next_deadline: f32,
    pending_step: bool,
}

impl Animator {
    /// `start` must be at least 3 and below `end`.
    pub fn new(start: u32, end: u32, pacing: Pacing) -> Animator {
        debug_assert!(start >= 3 && start < end, "invalid side range {start}..{end}");

        Animator {
            sides: start,
            start,
            end,
            pacing,
            next_deadline: 0.0,
            pending_step: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.sides
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn next_deadline(&self) -> f32 {
        self.next_deadline
    }

    pub fn is_step_pending(&self) -> bool {
        self.pending_step
    }

    /// Records a step request. Only consumed by [`Animator::poll`].
    pub fn signal_step(&mut self) {
        self.pending_step = true;
    }

    /// Decides what the frame at time `now` (seconds) should do.
    pub fn poll(&mut self, now: f32) -> Frame {
        match self.pacing {
            Pacing::Timed { interval } => {
                if now > self.next_deadline {
                    self.next_deadline = now + interval;
                    Frame::Advance(self.advance())
                } else {
                    Frame::Idle
                }
            }
            Pacing::Stepped => {
                if std::mem::take(&mut self.pending_step) {
                    Frame::Advance(self.advance())
                } else {
                    Frame::Idle
                }
            }
        }
    }

    fn advance(&mut self) -> u32 {
        let drawn = self.sides;
        self.sides += 1;
        if self.sides >= self.end {
            self.sides = self.start;
        }
        drawn
    }
}
