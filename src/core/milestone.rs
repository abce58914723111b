//! Turn milestones
//!
//! Splits a game of `total_turns` into phases. The markers are informational
//! only and never change how a turn is scored or when a game ends.

use std::fmt;

/// Named turn milestones, in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    First,
    Mid,
    Late,
    Question,
    All,
}

impl Milestone {
    /// All milestones in turn order
    pub const ALL: [Self; 5] = [Self::First, Self::Mid, Self::Late, Self::Question, Self::All];

    /// 1-based turn number at which this milestone falls
    ///
    /// `half` is `(total - 1) / 2` for odd totals and `total / 2` for even
    /// ones; the mid turn is `1 + half`, one earlier for even totals.
    ///
    /// # Examples
    /// ```
    /// use digit_guess::core::Milestone;
    ///
    /// assert_eq!(Milestone::Mid.turn(15), 8);
    /// assert_eq!(Milestone::Late.turn(15), 15);
    /// assert_eq!(Milestone::Mid.turn(10), 5);
    /// assert_eq!(Milestone::All.turn(10), 12);
    /// ```
    #[must_use]
    pub const fn turn(self, total_turns: u32) -> u32 {
        let first = 1;
        let (half, mid) = if total_turns % 2 != 0 {
            let half = (total_turns - 1) / 2;
            (half, first + half)
        } else {
            let half = total_turns / 2;
            (half, first + half - 1)
        };
        let late = mid + half;
        let question = late + 1;

        match self {
            Self::First => first,
            Self::Mid => mid,
            Self::Late => late,
            Self::Question => question,
            Self::All => question + 1,
        }
    }

    /// Phase announced when play reaches this milestone, if any
    #[must_use]
    pub const fn phase_label(self) -> Option<&'static str> {
        match self {
            Self::First => None,
            Self::Mid => Some("Guessing"),
            Self::Late => Some("Location"),
            Self::Question => Some("Question"),
            Self::All => Some("Free-for-all"),
        }
    }

    /// Milestone whose turn number is exactly `turn`
    ///
    /// Later milestones win when two coincide.
    #[must_use]
    pub fn at_turn(turn: u32, total_turns: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|m| m.turn(total_turns) == turn)
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::First => "first",
            Self::Mid => "mid",
            Self::Late => "late",
            Self::Question => "question",
            Self::All => "all",
        };
        write!(f, "{name}")
    }
}
