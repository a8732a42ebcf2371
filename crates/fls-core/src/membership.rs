use crate::error::{FuzzyError, FuzzyResult};
use crate::variable::Domain;
use serde::{Deserialize, Serialize};

/// Gaussian degrees beyond this many standard deviations are treated as outside the support.
const GAUSSIAN_SUPPORT_SIGMAS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    Gaussian { mean: f64, std_dev: f64 },
    /// Linear flanks with a Gaussian cap around `center`.
    Gauangle { start: f64, center: f64, end: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMembershipFunction")]
pub struct MembershipFunction {
    name: String,
    shape: Shape,
}

#[derive(Deserialize)]
struct RawMembershipFunction {
    name: String,
    shape: Shape,
}

impl TryFrom<RawMembershipFunction> for MembershipFunction {
    type Error = FuzzyError;

    fn try_from(raw: RawMembershipFunction) -> FuzzyResult<Self> {
        MembershipFunction::new(raw.name, raw.shape)
    }
}

impl MembershipFunction {
    /// Validates `shape` with the same checks as the per-shape constructors.
    pub fn new(name: impl Into<String>, shape: Shape) -> FuzzyResult<Self> {
        match shape {
            Shape::Triangular { a, b, c } => Self::triangular(name, a, b, c),
            Shape::Trapezoidal { a, b, c, d } => Self::trapezoidal(name, [a, b, c, d]),
            Shape::Gaussian { mean, std_dev } => Self::gaussian(name, mean, std_dev),
            Shape::Gauangle { start, center, end } => Self::gauangle(name, start, center, end),
        }
    }

    pub fn triangular(name: impl Into<String>, a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        let name = name.into();
        ensure_ordered(&name, &[a, b, c])?;
        Ok(Self {
            name,
            shape: Shape::Triangular { a, b, c },
        })
    }

    pub fn trapezoidal(name: impl Into<String>, limits: [f64; 4]) -> FuzzyResult<Self> {
        let name = name.into();
        ensure_ordered(&name, &limits)?;
        let [a, b, c, d] = limits;
        Ok(Self {
            name,
            shape: Shape::Trapezoidal { a, b, c, d },
        })
    }

    pub fn gaussian(name: impl Into<String>, mean: f64, std_dev: f64) -> FuzzyResult<Self> {
        let name = name.into();
        if !mean.is_finite() || !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(FuzzyError::InvalidShape {
                name,
                reason: format!("mean {mean} and std_dev {std_dev} must be finite with std_dev > 0"),
            });
        }
        Ok(Self {
            name,
            shape: Shape::Gaussian { mean, std_dev },
        })
    }

    pub fn gauangle(name: impl Into<String>, start: f64, center: f64, end: f64) -> FuzzyResult<Self> {
        let name = name.into();
        ensure_ordered(&name, &[start, center, end])?;
        if start == end {
            return Err(FuzzyError::InvalidShape {
                name,
                reason: "gauangle support has zero width".into(),
            });
        }
        Ok(Self {
            name,
            shape: Shape::Gauangle { start, center, end },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Degree of membership of `x`, always within [0, 1]. Non-finite `x` has degree 0.
    pub fn degree(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        match self.shape {
            Shape::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            Shape::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
            Shape::Gaussian { mean, std_dev } => {
                let z = (x - mean) / std_dev;
                (-0.5 * z * z).exp()
            }
            Shape::Gauangle { start, center, end } => {
                if x < start || x > end {
                    0.0
                } else if x == center {
                    1.0
                } else if x < center {
                    gauangle_flank(center - start, center - x)
                } else {
                    gauangle_flank(end - center, x - center)
                }
            }
        }
    }

    /// Domain point of maximum membership used by height defuzzification.
    pub fn peak(&self) -> f64 {
        match self.shape {
            Shape::Triangular { b, .. } => b,
            Shape::Trapezoidal { b, c, .. } => (b + c) / 2.0,
            Shape::Gaussian { mean, .. } => mean,
            Shape::Gauangle { center, .. } => center,
        }
    }

    pub fn support(&self) -> (f64, f64) {
        match self.shape {
            Shape::Triangular { a, c, .. } => (a, c),
            Shape::Trapezoidal { a, d, .. } => (a, d),
            Shape::Gaussian { mean, std_dev } => (
                mean - GAUSSIAN_SUPPORT_SIGMAS * std_dev,
                mean + GAUSSIAN_SUPPORT_SIGMAS * std_dev,
            ),
            Shape::Gauangle { start, end, .. } => (start, end),
        }
    }

    /// The curve sampled at `levels` equally spaced points of `domain`.
    pub fn sample(&self, domain: Domain, levels: usize) -> FuzzyResult<Vec<(f64, f64)>> {
        Ok(domain
            .discretize(levels)?
            .into_iter()
            .map(|x| (x, self.degree(x)))
            .collect())
    }
}

// `width` is the flank length, `distance` how far x sits from the centre (0 < distance <= width).
// The outer half is linear, the inner half a Gaussian meeting it at 0.5.
fn gauangle_flank(width: f64, distance: f64) -> f64 {
    let half = width / 2.0;
    if distance >= half {
        (width - distance) / width
    } else {
        let spread = half / (2.0 * std::f64::consts::LN_2).sqrt();
        (-(distance * distance) / (2.0 * spread * spread)).exp()
    }
}

fn ensure_ordered(name: &str, params: &[f64]) -> FuzzyResult<()> {
    if params.iter().any(|p| !p.is_finite()) {
        return Err(FuzzyError::InvalidShape {
            name: name.to_string(),
            reason: format!("parameters {params:?} must be finite"),
        });
    }
    if params.windows(2).any(|w| w[0] > w[1]) {
        return Err(FuzzyError::InvalidShape {
            name: name.to_string(),
            reason: format!("parameters {params:?} must be non-decreasing"),
        });
    }
    Ok(())
}
