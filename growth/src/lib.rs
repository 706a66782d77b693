use serde::{Deserialize, Serialize};

pub trait XpCurve {
    /// XP required to advance out of the given level (levels start at 1).
    fn xp_to_next(&self, level: u32) -> u32;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinearCurve {
    /// XP cost at level 0
    pub base: u32,
    /// Additional XP per level
    pub increment: u32,
}

impl LinearCurve {
    pub fn new(base: u32, increment: u32) -> Self {
        Self { base, increment }
    }
}

impl XpCurve for LinearCurve {
    fn xp_to_next(&self, level: u32) -> u32 {
        self.base + self.increment * level
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExponentialCurve {
    /// XP cost at level 1
    pub base: f64,
    /// Multiplier per level (e.g. 1.5 for +50% each level)
    pub factor: f64,
}

impl ExponentialCurve {
    pub fn new(base: f64, factor: f64) -> Self {
        Self { base, factor }
    }
}

impl XpCurve for ExponentialCurve {
    fn xp_to_next(&self, level: u32) -> u32 {
        (self.base * self.factor.powi(level.saturating_sub(1) as i32)).round() as u32
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Curve {
    Linear(LinearCurve),
    Exponential(ExponentialCurve),
}

impl XpCurve for Curve {
    fn xp_to_next(&self, level: u32) -> u32 {
        match self {
            Curve::Linear(c) => c.xp_to_next(level),
            Curve::Exponential(c) => c.xp_to_next(level),
        }
    }
}

/// The guardian progression curve: 100 XP per level, so leaving level 3
/// costs 300 XP.
pub fn guardian_curve() -> Curve {
    Curve::Linear(LinearCurve::new(0, 100))
}
