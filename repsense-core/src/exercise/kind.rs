//! Exercise kinds

/// The exercises the posture machine can recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Exercise {
    /// Sit-ups (lying ↔ sitting)
    Sit,
    /// Push-ups (up ↔ down)
    Push,
    /// Squats (standing ↔ squatting)
    Squat,
    /// Jumping jacks (standing ↔ jump)
    JumpingJack,
}

impl Exercise {
    /// Number of exercise kinds
    pub const COUNT: usize = 4;

    /// All exercise kinds, in counter order
    pub const ALL: [Exercise; Self::COUNT] = [
        Exercise::Sit,
        Exercise::Push,
        Exercise::Squat,
        Exercise::JumpingJack,
    ];

    /// Stable index into per-exercise arrays
    pub const fn index(self) -> usize {
        match self {
            Exercise::Sit => 0,
            Exercise::Push => 1,
            Exercise::Squat => 2,
            Exercise::JumpingJack => 3,
        }
    }

    /// Short label for logs
    pub fn label(self) -> &'static str {
        match self {
            Exercise::Sit => "sit-up",
            Exercise::Push => "push-up",
            Exercise::Squat => "squat",
            Exercise::JumpingJack => "jumping jack",
        }
    }
}
