use serde::Serialize;

use crate::error::{Error, Result};

/// 线性间隙打分方案
///
/// 约定使用带符号的分值：`match_score > 0 >= mismatch`，`gap < 0`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoringScheme {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Result<Self> {
        let s = Self { match_score, mismatch, gap };
        s.validate()?;
        Ok(s)
    }

    /// 自由移位比对与组装使用的参数：错配与间隙代价极高，只接受近乎精确的重叠
    pub const fn free_shift() -> Self {
        Self { match_score: 1, mismatch: -10, gap: -10 }
    }

    pub fn validate(&self) -> Result<()> {
        if self.match_score <= 0 {
            return Err(Error::InvalidInput(format!(
                "match score must be positive, got {}",
                self.match_score
            )));
        }
        if self.mismatch > 0 {
            return Err(Error::InvalidInput(format!(
                "mismatch score must not be positive, got {}",
                self.mismatch
            )));
        }
        if self.gap >= 0 {
            return Err(Error::InvalidInput(format!(
                "gap score must be negative, got {}",
                self.gap
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }
}

impl Default for ScoringScheme {
    /// Needleman-Wunsch / Smith-Waterman 默认参数 (1, -1, -2)
    fn default() -> Self {
        Self { match_score: 1, mismatch: -1, gap: -2 }
    }
}
