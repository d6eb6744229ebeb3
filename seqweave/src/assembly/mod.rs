//! 贪心片段组装
//!
//! 以最长片段为初始共识序列，每一轮用自由移位比对把共识与所有剩余片段逐一比较，
//! 选出重叠最长且通过阈值的片段并入共识，直到片段耗尽、共识超过长度上限，
//! 或某一轮没有任何片段通过阈值（停滞）。

pub mod merge;
pub mod pool;

use rayon::prelude::*;
use serde::Serialize;

use crate::align::{align_with_buf, AlignmentResult, AlignmentVariant, ScoreMatrix, ScoringScheme};
use crate::error::{Error, Result};

pub use pool::FragmentPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AssemblyParams {
    pub scoring: ScoringScheme,
    /// 共识长度超过该值后停止
    pub max_length: usize,
    /// 1 表示在调用线程上顺序执行
    pub threads: usize,
    pub max_iterations: Option<usize>,
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            scoring: ScoringScheme::free_shift(),
            max_length: usize::MAX,
            threads: 1,
            max_iterations: None,
        }
    }
}

/// 组装结束时的状态
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssemblyStatus {
    /// 所有片段均已并入
    Exhausted,
    /// 共识长度超过上限
    LengthBound,
    /// 某一轮没有片段通过重叠阈值
    Stalled,
    /// 达到迭代次数上限
    IterationCap,
}

impl AssemblyStatus {
    pub fn is_done(self) -> bool {
        matches!(self, AssemblyStatus::Exhausted | AssemblyStatus::LengthBound)
    }
}

impl std::fmt::Display for AssemblyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssemblyStatus::Exhausted => "exhausted",
            AssemblyStatus::LengthBound => "length-bound",
            AssemblyStatus::Stalled => "stalled",
            AssemblyStatus::IterationCap => "iteration-cap",
        };
        f.write_str(s)
    }
}

/// 一次成功合并的记录
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MergeStep {
    pub iteration: usize,
    /// 片段在 [`FragmentPool`] 中的下标
    pub fragment: usize,
    pub overlap: usize,
    pub score: i32,
    pub consensus_len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyResult {
    pub consensus: Vec<u8>,
    pub status: AssemblyStatus,
    pub iterations: usize,
    pub merges: Vec<MergeStep>,
    /// 结束时仍未并入的片段数
    pub unmerged: usize,
}

impl AssemblyResult {
    pub fn stalled(&self) -> bool {
        self.status == AssemblyStatus::Stalled
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// 停滞时返回 [`Error::NoAlignmentFound`]
    pub fn into_consensus(self) -> Result<Vec<u8>> {
        if self.stalled() {
            return Err(Error::NoAlignmentFound {
                iterations: self.iterations,
                remaining: self.unmerged,
            });
        }
        Ok(self.consensus)
    }
}

/// 重叠长度 `v` 满足 `0.2 * len < v <= 0.9 * len` 时接受（整数运算）
#[inline]
pub fn accepts_overlap(overlap: usize, fragment_len: usize) -> bool {
    5 * overlap > fragment_len && 10 * overlap <= 9 * fragment_len
}

struct AssemblyState {
    consensus: Vec<u8>,
    /// (池中下标, 片段)，保持池顺序
    remaining: Vec<(usize, Vec<u8>)>,
    iterations: usize,
}

struct Candidate {
    position: usize,
    overlap: usize,
    alignment: AlignmentResult,
}

pub fn assemble<I, S>(fragments: I, params: &AssemblyParams) -> Result<AssemblyResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    assemble_pool(FragmentPool::new(fragments), params)
}

pub fn assemble_pool(pool: FragmentPool, params: &AssemblyParams) -> Result<AssemblyResult> {
    params.scoring.validate()?;
    if params.threads == 0 {
        return Err(Error::InvalidInput("thread count must be at least 1".into()));
    }
    if pool.is_empty() {
        return Err(Error::InvalidInput("fragment pool is empty".into()));
    }

    if params.threads == 1 {
        return run(pool, params, false);
    }

    let workers = rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads)
        .build()
        .map_err(|e| Error::InvalidInput(format!("cannot build thread pool: {}", e)))?;
    workers.install(|| run(pool, params, true))
}

fn run(pool: FragmentPool, params: &AssemblyParams, parallel: bool) -> Result<AssemblyResult> {
    let mut remaining: Vec<(usize, Vec<u8>)> = pool.into_inner().into_iter().enumerate().collect();
    let (_, seed) = remaining.remove(0);
    log::info!(
        "assembling {} fragment(s), seed length {}",
        remaining.len() + 1,
        seed.len()
    );

    let mut state = AssemblyState {
        consensus: seed,
        remaining,
        iterations: 0,
    };
    let mut merges: Vec<MergeStep> = Vec::new();
    let mut buf = ScoreMatrix::new();

    let status = loop {
        if state.remaining.is_empty() {
            break AssemblyStatus::Exhausted;
        }
        if state.consensus.len() > params.max_length {
            break AssemblyStatus::LengthBound;
        }
        if params.max_iterations.is_some_and(|cap| state.iterations >= cap) {
            break AssemblyStatus::IterationCap;
        }
        state.iterations += 1;

        let best = if parallel {
            best_candidate_par(&state, &params.scoring)?
        } else {
            best_candidate(&state, &params.scoring, &mut buf)?
        };

        let Some(cand) = best else {
            log::warn!(
                "iteration {}: no fragment clears the overlap threshold, {} left unmerged",
                state.iterations,
                state.remaining.len()
            );
            break AssemblyStatus::Stalled;
        };

        let (fragment, _) = state.remaining.remove(cand.position);
        state.consensus = merge::overlay(&cand.alignment);
        let step = MergeStep {
            iteration: state.iterations,
            fragment,
            overlap: cand.overlap,
            score: cand.alignment.score,
            consensus_len: state.consensus.len(),
        };
        log::debug!(
            "iteration {}: merged fragment #{} (overlap {}, score {}), consensus length {}",
            step.iteration,
            step.fragment,
            step.overlap,
            step.score,
            step.consensus_len
        );
        merges.push(step);
    };

    log::info!(
        "assembly {} after {} iteration(s): {} merge(s), consensus length {}",
        status,
        state.iterations,
        merges.len(),
        state.consensus.len()
    );

    Ok(AssemblyResult {
        consensus: state.consensus,
        status,
        iterations: state.iterations,
        merges,
        unmerged: state.remaining.len(),
    })
}

fn evaluate(
    consensus: &[u8],
    position: usize,
    fragment: &[u8],
    p: &ScoringScheme,
    buf: &mut ScoreMatrix,
) -> Result<Option<Candidate>> {
    let alignment = align_with_buf(consensus, fragment, AlignmentVariant::SemiGlobal, p, buf)?;
    let overlap = alignment.absolute_matches;
    if !accepts_overlap(overlap, fragment.len()) {
        return Ok(None);
    }
    Ok(Some(Candidate {
        position,
        overlap,
        alignment,
    }))
}

fn best_candidate(state: &AssemblyState, p: &ScoringScheme, buf: &mut ScoreMatrix) -> Result<Option<Candidate>> {
    let mut found = Vec::new();
    for (pos, (_, frag)) in state.remaining.iter().enumerate() {
        found.push(evaluate(&state.consensus, pos, frag, p, buf)?);
    }
    Ok(pick(found))
}

fn best_candidate_par(state: &AssemblyState, p: &ScoringScheme) -> Result<Option<Candidate>> {
    let consensus = state.consensus.as_slice();
    let found: Vec<Option<Candidate>> = state
        .remaining
        .par_iter()
        .enumerate()
        .map_init(ScoreMatrix::new, |buf, (pos, (_, frag))| evaluate(consensus, pos, frag, p, buf))
        .collect::<Result<Vec<_>>>()?;
    Ok(pick(found))
}

/// 重叠最长者胜出；并列时取列表中靠前的片段
fn pick(found: Vec<Option<Candidate>>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for cand in found.into_iter().flatten() {
        if best.as_ref().map_or(true, |b| cand.overlap > b.overlap) {
            best = Some(cand);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;

    fn lcg_origin(len: usize) -> Vec<u8> {
        let bases = [b'A', b'C', b'G', b'T'];
        let mut seq = Vec::with_capacity(len);
        let mut x: u32 = 42;
        for _ in 0..len {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            seq.push(bases[(x >> 16) as usize % 4]);
        }
        seq
    }

    fn cut(origin: &[u8], bounds: &[usize]) -> Vec<Vec<u8>> {
        bounds.windows(2).map(|w| origin[w[0]..w[1]].to_vec()).collect()
    }

    fn two_cut_sets(origin: &[u8]) -> Vec<Vec<u8>> {
        let mut frags = cut(origin, &[0, 15, 32, 50, 66, 83, 100]);
        frags.extend(cut(origin, &[0, 8, 24, 41, 58, 75, 91, 100]));
        frags
    }

    fn sliding(origin: &[u8]) -> Vec<Vec<u8>> {
        (0..=80).step_by(10).map(|i| origin[i..i + 20].to_vec()).collect()
    }

    #[test]
    fn overlap_threshold_bounds() {
        assert!(!accepts_overlap(2, 10));
        assert!(accepts_overlap(3, 10));
        assert!(accepts_overlap(9, 10));
        assert!(!accepts_overlap(10, 10));
        assert!(!accepts_overlap(0, 1));
    }

    #[test]
    fn reconstructs_origin_from_contiguous_cuts() {
        let origin = lcg_origin(100);
        let res = assemble(two_cut_sets(&origin), &AssemblyParams::default()).unwrap();
        assert_eq!(res.status, AssemblyStatus::Exhausted);
        assert_eq!(res.iterations, 10);
        assert_eq!(res.merges.len(), 10);
        assert_eq!(res.unmerged, 0);

        let check = align(&origin, &res.consensus, AlignmentVariant::Global, &ScoringScheme::default()).unwrap();
        assert!(check.relative_identity().unwrap() > 0.95);
        assert_eq!(res.consensus, origin);
    }

    #[test]
    fn sliding_windows_extend_rightwards() {
        let origin = lcg_origin(100);
        let res = assemble(sliding(&origin), &AssemblyParams::default()).unwrap();
        assert_eq!(res.status, AssemblyStatus::Exhausted);
        assert_eq!(res.iterations, 8);
        assert_eq!(res.consensus, origin);
        assert!(res.merges.iter().all(|m| m.overlap == 10));
        let frags: Vec<usize> = res.merges.iter().map(|m| m.fragment).collect();
        assert_eq!(frags, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn stops_past_length_bound() {
        let origin = lcg_origin(100);
        let params = AssemblyParams { max_length: 50, ..AssemblyParams::default() };
        let res = assemble(sliding(&origin), &params).unwrap();
        assert_eq!(res.status, AssemblyStatus::LengthBound);
        assert!(res.is_done());
        assert_eq!(res.iterations, 4);
        assert_eq!(res.consensus, &origin[..60]);
        assert_eq!(res.unmerged, 4);
    }

    #[test]
    fn non_overlapping_pool_stalls_after_one_iteration() {
        let res = assemble(["AAAAAAAAAA", "CCCCCCCC", "GGGGGG"], &AssemblyParams::default()).unwrap();
        assert!(res.stalled());
        assert!(!res.is_done());
        assert_eq!(res.iterations, 1);
        assert!(res.merges.is_empty());
        assert_eq!(res.consensus, b"AAAAAAAAAA");
        assert_eq!(
            res.into_consensus(),
            Err(Error::NoAlignmentFound { iterations: 1, remaining: 2 })
        );
    }

    #[test]
    fn ties_go_to_earliest_fragment() {
        let res = assemble(["GGGGGCCCCC", "CCCCCTTTT", "AAAAGGGGG"], &AssemblyParams::default()).unwrap();
        assert_eq!(res.status, AssemblyStatus::Exhausted);
        let frags: Vec<usize> = res.merges.iter().map(|m| m.fragment).collect();
        assert_eq!(frags, vec![1, 2]);
        assert_eq!(res.merges[0].overlap, 5);
        assert_eq!(res.merges[1].overlap, 5);
        assert_eq!(res.consensus, b"AAAAGGGGGCCCCCTTTT");
    }

    #[test]
    fn parallel_matches_sequential() {
        let origin = lcg_origin(100);
        let seq = assemble(two_cut_sets(&origin), &AssemblyParams::default()).unwrap();
        let par = assemble(
            two_cut_sets(&origin),
            &AssemblyParams { threads: 4, ..AssemblyParams::default() },
        )
        .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let origin = lcg_origin(100);
        let params = AssemblyParams { max_iterations: Some(2), ..AssemblyParams::default() };
        let res = assemble(sliding(&origin), &params).unwrap();
        assert_eq!(res.status, AssemblyStatus::IterationCap);
        assert_eq!(res.iterations, 2);
        assert_eq!(res.consensus, &origin[..40]);
    }

    #[test]
    fn single_fragment_is_its_own_consensus() {
        let res = assemble(["ACGTACGT", "ACGTACGT", "CGTA"], &AssemblyParams::default()).unwrap();
        assert_eq!(res.status, AssemblyStatus::Exhausted);
        assert_eq!(res.iterations, 0);
        assert_eq!(res.consensus, b"ACGTACGT");
    }

    #[test]
    fn rejects_bad_parameters() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            assemble(empty, &AssemblyParams::default()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            assemble([""], &AssemblyParams::default()),
            Err(Error::InvalidInput(_))
        ));
        let bad_scoring = AssemblyParams {
            scoring: ScoringScheme { match_score: 1, mismatch: -1, gap: 0 },
            ..AssemblyParams::default()
        };
        assert!(matches!(assemble(["ACGT"], &bad_scoring), Err(Error::InvalidInput(_))));
        let no_threads = AssemblyParams { threads: 0, ..AssemblyParams::default() };
        assert!(matches!(assemble(["ACGT"], &no_threads), Err(Error::InvalidInput(_))));
    }
}
