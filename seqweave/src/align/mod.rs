pub mod matrix;
pub mod result;
pub mod scoring;
pub mod traceback;

use serde::Serialize;

pub use matrix::ScoreMatrix;
pub use result::AlignmentResult;
pub use scoring::ScoringScheme;
pub use traceback::{traceback, Move, Trace};

use crate::error::{Error, Result};
use crate::util::dna::GAP;

/// 比对类型，决定矩阵初始化、递推下限以及回溯的起点与终止条件
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentVariant {
    /// Needleman-Wunsch：首尾间隙同样计罚
    Global,
    /// Smith-Waterman：得分下限为 0，可在任意位置重新开始
    Local,
    /// 自由移位：首尾未比对部分不计罚
    SemiGlobal,
}

impl std::fmt::Display for AlignmentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlignmentVariant::Global => "global",
            AlignmentVariant::Local => "local",
            AlignmentVariant::SemiGlobal => "semi-global",
        };
        f.write_str(name)
    }
}

/// 对两条序列做动态规划比对
pub fn align(a: &[u8], b: &[u8], variant: AlignmentVariant, p: &ScoringScheme) -> Result<AlignmentResult> {
    align_with_buf(a, b, variant, p, &mut ScoreMatrix::new())
}

/// 同 [`align`]，复用调用方提供的矩阵缓冲区
pub fn align_with_buf(
    a: &[u8],
    b: &[u8],
    variant: AlignmentVariant,
    p: &ScoringScheme,
    buf: &mut ScoreMatrix,
) -> Result<AlignmentResult> {
    check_sequence("A", a)?;
    check_sequence("B", b)?;

    buf.fill(a, b, variant, p);
    let trace = traceback(buf, a, b, variant, p)?;
    let (aligned_a, aligned_b) = trace.aligned_pair(a, b, variant);
    let cigar = trace.cigar();

    Ok(AlignmentResult::new(
        variant,
        trace.score,
        aligned_a,
        aligned_b,
        trace.a_range,
        trace.b_range,
        cigar,
    ))
}

fn check_sequence(name: &str, seq: &[u8]) -> Result<()> {
    if seq.is_empty() {
        return Err(Error::InvalidInput(format!("sequence {} is empty", name)));
    }
    if let Some(pos) = seq.iter().position(|&c| c == GAP) {
        return Err(Error::InvalidInput(format!(
            "sequence {} contains the gap symbol at position {}",
            name, pos
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &[u8] = b"CCCCACCACCAGGACACTTTCAGAGTTCTCCGTCATCGTTAGCAGCACGG";

    #[test]
    fn self_alignment_is_identical() {
        let p = ScoringScheme::default();
        for variant in [AlignmentVariant::Global, AlignmentVariant::SemiGlobal] {
            for seq in [&b"A"[..], &b"AAAA"[..], &b"ACGTACGT"[..], ORIGIN] {
                let r = align(seq, seq, variant, &p).unwrap();
                assert_eq!(r.gaps(), 0, "{} {:?}", variant, seq);
                assert_eq!(r.relative_identity().unwrap(), 1.0);
                assert_eq!(r.aligned_a, seq);
            }
        }
    }

    #[test]
    fn global_one_gap_example() {
        let r = align(b"AATGC", b"ATGC", AlignmentVariant::Global, &ScoringScheme::default()).unwrap();
        assert_eq!(r.len(), 5);
        assert_eq!(r.gaps(), 1);
        assert_eq!(r.marker, b"*||||");
        assert!((r.relative_identity().unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn global_aligns_whole_sequences() {
        let p = ScoringScheme::default();
        let r = align(b"ACGT", b"TTTTACGT", AlignmentVariant::Global, &p).unwrap();
        assert_eq!(r.score, 4 - 8);
        assert_eq!(r.aligned_a, b"----ACGT");
        assert_eq!(r.aligned_b, b"TTTTACGT");
    }

    #[test]
    fn local_score_is_non_negative_and_excludes_floor() {
        let p = ScoringScheme::default();
        let cases: [(&[u8], &[u8]); 4] = [
            (&b"TACGA"[..], &b"CG"[..]),
            (&b"AAA"[..], &b"CCC"[..]),
            (&b"ACGTTT"[..], &b"GGACGTCC"[..]),
            (ORIGIN, &b"TTTCAGAG"[..]),
        ];
        for (a, b) in cases {
            let r = align(a, b, AlignmentVariant::Local, &p).unwrap();
            assert!(r.score >= 0);
            if r.is_empty() {
                assert_eq!(r.score, 0);
                continue;
            }
            // 起始对必须是匹配：零分格之后的第一步不可能是错配或间隙
            assert_eq!(r.marker[0], result::MATCH_MARK);
            assert_eq!(&a[r.a_range.clone()], &r.aligned_a[..]);
        }
    }

    #[test]
    fn local_finds_embedded_block() {
        let r = align(b"ACGTTT", b"GGACGTCC", AlignmentVariant::Local, &ScoringScheme::default()).unwrap();
        assert_eq!(r.aligned_a, b"ACGT");
        assert_eq!(r.aligned_b, b"ACGT");
        assert_eq!(r.b_range, 2..6);
        assert_eq!(r.score, 4);
    }

    #[test]
    fn local_without_match_is_degenerate() {
        let r = align(b"AAA", b"CCC", AlignmentVariant::Local, &ScoringScheme::default()).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.relative_identity(), Err(Error::DegenerateAlignment));
    }

    #[test]
    fn semi_global_ignores_padding() {
        for p in [ScoringScheme::default(), ScoringScheme::free_shift()] {
            let plain = align(b"ATTAC", b"ATT", AlignmentVariant::SemiGlobal, &p).unwrap();
            let padded = align(b"XXATTAC", b"ATT", AlignmentVariant::SemiGlobal, &p).unwrap();
            assert_eq!(plain.absolute_matches, 3);
            assert_eq!(padded.absolute_matches, plain.absolute_matches);
            assert_eq!(padded.score, plain.score);
            assert_eq!(plain.aligned_b, b"ATT--");
            assert_eq!(padded.aligned_b, b"--ATT--");
        }
    }

    #[test]
    fn semi_global_suffix_prefix_overlap() {
        let r = align(b"GGGACGT", b"ACGTCCC", AlignmentVariant::SemiGlobal, &ScoringScheme::default()).unwrap();
        assert_eq!(r.aligned_a, b"GGGACGT---");
        assert_eq!(r.aligned_b, b"---ACGTCCC");
        assert_eq!(r.absolute_matches, 4);
        assert_eq!(r.cigar, "4M");
    }

    #[test]
    fn semi_global_border_tie_starts_in_last_column() {
        let r = align(b"ACGT", b"GTAC", AlignmentVariant::SemiGlobal, &ScoringScheme::default()).unwrap();
        assert_eq!(r.score, 2);
        assert_eq!(r.aligned_a, b"ACGT--");
        assert_eq!(r.aligned_b, b"--GTAC");
    }

    #[test]
    fn extreme_penalties_do_not_overflow() {
        let p = ScoringScheme::new(1, -1, i32::MIN).unwrap();
        let r = align(b"ACG", b"A", AlignmentVariant::Global, &p).unwrap();
        assert_eq!(r.score, i32::MIN);
        assert_eq!(r.aligned_a, b"ACG");
        assert_eq!(r.aligned_a.len(), r.aligned_b.len());

        let p = ScoringScheme::new(1, i32::MIN, -1).unwrap();
        for variant in [AlignmentVariant::Global, AlignmentVariant::Local, AlignmentVariant::SemiGlobal] {
            let r = align(b"AC", b"GT", variant, &p).unwrap();
            assert_eq!(r.absolute_matches, 0, "{}", variant);
            assert_eq!(r.aligned_a.len(), r.aligned_b.len());
        }
    }

    #[test]
    fn rejects_empty_and_gapped_input() {
        let p = ScoringScheme::default();
        assert!(matches!(
            align(b"", b"ACGT", AlignmentVariant::Global, &p),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            align(b"ACGT", b"", AlignmentVariant::Local, &p),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            align(b"AC-T", b"ACGT", AlignmentVariant::SemiGlobal, &p),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn buffer_reuse_matches_fresh_alignment() {
        let p = ScoringScheme::free_shift();
        let mut buf = ScoreMatrix::new();
        let r1 = align_with_buf(ORIGIN, b"GTTCTCCGTCA", AlignmentVariant::SemiGlobal, &p, &mut buf).unwrap();
        let r2 = align_with_buf(b"ACGT", b"ACGT", AlignmentVariant::Global, &p, &mut buf).unwrap();
        assert_eq!(r1, align(ORIGIN, b"GTTCTCCGTCA", AlignmentVariant::SemiGlobal, &p).unwrap());
        assert_eq!(r2.absolute_matches, 4);
    }
}
