use std::ops::Range;

use super::AlignmentVariant;
use crate::error::{Error, Result};
use crate::util::dna::GAP;

pub const MATCH_MARK: u8 = b'|';
pub const MISMATCH_MARK: u8 = b'*';

/// 一次比对的结果，生成后不可变
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentResult {
    pub variant: AlignmentVariant,
    pub score: i32,
    pub aligned_a: Vec<u8>,
    pub aligned_b: Vec<u8>,
    /// `|` 表示匹配，`*` 表示错配或间隙
    pub marker: Vec<u8>,
    pub absolute_matches: usize,
    pub a_range: Range<usize>,
    pub b_range: Range<usize>,
    pub cigar: String,
}

impl AlignmentResult {
    pub(crate) fn new(
        variant: AlignmentVariant,
        score: i32,
        aligned_a: Vec<u8>,
        aligned_b: Vec<u8>,
        a_range: Range<usize>,
        b_range: Range<usize>,
        cigar: String,
    ) -> Self {
        debug_assert_eq!(aligned_a.len(), aligned_b.len());
        let marker = build_marker(&aligned_a, &aligned_b);
        let absolute_matches = marker.iter().filter(|&&c| c == MATCH_MARK).count();
        Self {
            variant,
            score,
            aligned_a,
            aligned_b,
            marker,
            absolute_matches,
            a_range,
            b_range,
            cigar,
        }
    }

    pub fn len(&self) -> usize {
        self.marker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marker.is_empty()
    }

    /// 两行中的间隙符号总数
    pub fn gaps(&self) -> usize {
        self.aligned_a
            .iter()
            .chain(self.aligned_b.iter())
            .filter(|&&c| c == GAP)
            .count()
    }

    /// 匹配数 / 比对长度；长度为 0 时返回 [`Error::DegenerateAlignment`]
    pub fn relative_identity(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::DegenerateAlignment);
        }
        Ok(self.absolute_matches as f64 / self.len() as f64)
    }
}

pub fn build_marker(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            if x == y && x != GAP {
                MATCH_MARK
            } else {
                MISMATCH_MARK
            }
        })
        .collect()
}
