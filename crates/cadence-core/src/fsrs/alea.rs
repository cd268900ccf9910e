//! Alea - seeded PRNG used for interval fuzz
//!
//! Port of Johannes Baagøe's Alea generator (MIT): a 3-lag multiply-with-carry
//! generator seeded through the Mash string hash. Sequences are bit-identical
//! to the JavaScript original, so fuzzed intervals reproduce across hosts
//! given the same seed. That requires the exact IEEE-754 operation order and
//! the `>>> 0` truncations of Mash, which are kept as-is below.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 2^-32
const NORM32: f64 = 2.328_306_436_538_696_3e-10;
/// 2^32
const TWO_POW_32: f64 = 4_294_967_296.0;
/// 2^-53
const NORM53: f64 = 1.110_223_024_625_156_5e-16;

// ============================================================================
// SEED
// ============================================================================

/// Anything Alea can be seeded with
///
/// Every form is hashed through its string rendering; a list renders as
/// its items joined by `,`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AleaSeed {
    /// Integer seed (e.g. a Unix timestamp)
    Integer(i64),
    /// Float seed
    Float(f64),
    /// String seed
    Text(String),
    /// List of seed parts
    List(Vec<String>),
}

impl fmt::Display for AleaSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AleaSeed::Integer(n) => write!(f, "{}", n),
            AleaSeed::Float(x) => write!(f, "{}", x),
            AleaSeed::Text(s) => f.write_str(s),
            AleaSeed::List(parts) => f.write_str(&parts.join(",")),
        }
    }
}

impl From<&str> for AleaSeed {
    fn from(s: &str) -> Self {
        AleaSeed::Text(s.to_string())
    }
}

impl From<String> for AleaSeed {
    fn from(s: String) -> Self {
        AleaSeed::Text(s)
    }
}

impl From<i64> for AleaSeed {
    fn from(n: i64) -> Self {
        AleaSeed::Integer(n)
    }
}

impl From<f64> for AleaSeed {
    fn from(x: f64) -> Self {
        AleaSeed::Float(x)
    }
}

impl<S: Into<String>> From<Vec<S>> for AleaSeed {
    fn from(parts: Vec<S>) -> Self {
        AleaSeed::List(parts.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// MASH
// ============================================================================

/// Mash string hash; state carries over between calls
struct Mash {
    n: f64,
}

impl Mash {
    fn new() -> Self {
        Self {
            n: f64::from(0xefc8_249d_u32),
        }
    }

    fn hash(&mut self, data: &str) -> f64 {
        for ch in data.chars() {
            self.n += f64::from(u32::from(ch));
            let mut h = 0.025_196_032_824_169_38 * self.n;
            self.n = to_uint32(h);
            h -= self.n;
            h *= self.n;
            self.n = to_uint32(h);
            h -= self.n;
            self.n += h * TWO_POW_32;
        }
        to_uint32(self.n) * NORM32
    }
}

/// JavaScript `x >>> 0` for the non-negative values Mash produces
fn to_uint32(x: f64) -> f64 {
    ((x as u64) & 0xffff_ffff) as f64
}

// ============================================================================
// ALEA
// ============================================================================

/// Exported generator progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AleaState {
    /// Carry
    pub c: f64,
    /// Oldest lag
    pub s0: f64,
    /// Middle lag
    pub s1: f64,
    /// Newest lag
    pub s2: f64,
}

/// Alea generator
#[derive(Debug, Clone, PartialEq)]
pub struct Alea {
    c: f64,
    s0: f64,
    s1: f64,
    s2: f64,
}

impl Alea {
    /// Seed a new generator
    pub fn new(seed: impl Into<AleaSeed>) -> Self {
        let seed = seed.into().to_string();
        let mut mash = Mash::new();

        let mut s0 = mash.hash(" ");
        let mut s1 = mash.hash(" ");
        let mut s2 = mash.hash(" ");

        s0 -= mash.hash(&seed);
        if s0 < 0.0 {
            s0 += 1.0;
        }
        s1 -= mash.hash(&seed);
        if s1 < 0.0 {
            s1 += 1.0;
        }
        s2 -= mash.hash(&seed);
        if s2 < 0.0 {
            s2 += 1.0;
        }

        Self { c: 1.0, s0, s1, s2 }
    }

    /// Seed from the current Unix time in seconds
    pub fn from_time() -> Self {
        Self::new(Utc::now().timestamp())
    }

    /// Restore a generator from exported state
    pub fn from_state(state: AleaState) -> Self {
        Self {
            c: state.c,
            s0: state.s0,
            s1: state.s1,
            s2: state.s2,
        }
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        let t = 2_091_639.0 * self.s0 + self.c * NORM32;
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.trunc();
        self.s2 = t - self.c;
        self.s2
    }

    /// Next value as a 32-bit unsigned integer
    pub fn int32(&mut self) -> u32 {
        (self.next_f64() * TWO_POW_32) as u32
    }

    /// Next value with 53 bits of precision (two draws)
    pub fn double(&mut self) -> f64 {
        let high = self.next_f64();
        let low = (self.next_f64() * 2_097_152.0).trunc();
        high + low * NORM53
    }

    /// Export the current state
    pub fn state(&self) -> AleaState {
        AleaState {
            c: self.c,
            s0: self.s0,
            s1: self.s1,
            s2: self.s2,
        }
    }

    /// Overwrite the current state
    pub fn import_state(&mut self, state: AleaState) -> &mut Self {
        self.c = state.c;
        self.s0 = state.s0;
        self.s1 = state.s1;
        self.s2 = state.s2;
        self
    }
}

impl Iterator for Alea {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Seeded generator; `None` seeds from the clock
pub fn alea(seed: Option<AleaSeed>) -> Alea {
    match seed {
        Some(seed) => Alea::new(seed),
        None => Alea::from_time(),
    }
}
