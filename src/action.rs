//! Pending action record.
//!
//! The console writes at most one action, the executor drains it on its
//! coarse poll. There is no queue: posting while an action is still
//! unread replaces it.

/// Combined wheel motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairMotion {
    Forward,
    Reverse,
    Left,
    Right,
}

impl PairMotion {
    /// Opposite turn (left <-> right); straight motions are unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            PairMotion::Left => PairMotion::Right,
            PairMotion::Right => PairMotion::Left,
            other => other,
        }
    }

    /// True for in-place turns, whose amount is in degrees.
    #[inline]
    pub fn is_turn(self) -> bool {
        matches!(self, PairMotion::Left | PairMotion::Right)
    }
}

/// Accessory motor selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotorChannel {
    M3,
    M4,
}

impl MotorChannel {
    pub fn number(self) -> u8 {
        match self {
            MotorChannel::M3 => 3,
            MotorChannel::M4 => 4,
        }
    }
}

/// One requested action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Steps for straight motions, degrees for turns.
    Wheels { motion: PairMotion, amount: f64 },
    /// Target servo angle in degrees.
    Servo { angle: f64 },
    /// Signed steps; negative reverses.
    Motor { channel: MotorChannel, amount: f64 },
    /// External power switch.
    ExtPower(bool),
}

/// Single-slot action mailbox.
#[derive(Debug, Default)]
pub struct ActionSlot {
    pending: Option<Action>,
    overwritten: u32,
}

impl ActionSlot {
    pub const fn new() -> Self {
        Self {
            pending: None,
            overwritten: 0,
        }
    }

    /// Post an action, replacing any unread one.
    ///
    /// Returns `true` if an unread action was replaced.
    pub fn post(&mut self, action: Action) -> bool {
        let replaced = self.pending.replace(action).is_some();
        if replaced {
            self.overwritten = self.overwritten.wrapping_add(1);
        }
        replaced
    }

    /// Check the ready flag.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.pending.is_some()
    }

    /// Peek at the pending action.
    #[inline]
    pub fn pending(&self) -> Option<&Action> {
        self.pending.as_ref()
    }

    /// Drain the pending action.
    #[inline]
    pub fn take(&mut self) -> Option<Action> {
        self.pending.take()
    }

    /// Number of unread actions replaced since last reset.
    #[inline]
    pub fn overwritten(&self) -> u32 {
        self.overwritten
    }

    /// Reset overwrite counter (e.g., after reporting).
    #[inline]
    pub fn reset_overwritten(&mut self) {
        self.overwritten = 0;
    }
}
