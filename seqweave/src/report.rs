//! JSON 报告，供命令行 `--json` / `--report` 输出

use serde::Serialize;

use crate::align::{AlignmentResult, AlignmentVariant, ScoringScheme};
use crate::assembly::{AssemblyParams, AssemblyResult, AssemblyStatus, MergeStep};

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub variant: AlignmentVariant,
    pub scoring: ScoringScheme,
    pub score: i32,
    pub aligned_a: String,
    pub marker: String,
    pub aligned_b: String,
    pub length: usize,
    pub absolute_matches: usize,
    /// 空比对时为 null
    pub relative_identity: Option<f64>,
    pub cigar: String,
}

impl AlignmentReport {
    pub fn new(r: &AlignmentResult, scoring: &ScoringScheme) -> Self {
        Self {
            variant: r.variant,
            scoring: *scoring,
            score: r.score,
            aligned_a: String::from_utf8_lossy(&r.aligned_a).into_owned(),
            marker: String::from_utf8_lossy(&r.marker).into_owned(),
            aligned_b: String::from_utf8_lossy(&r.aligned_b).into_owned(),
            length: r.len(),
            absolute_matches: r.absolute_matches,
            relative_identity: r.relative_identity().ok(),
            cigar: r.cigar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
    pub generated_at: String,
    pub status: AssemblyStatus,
    pub iterations: usize,
    pub fragments: usize,
    pub unmerged: usize,
    pub scoring: ScoringScheme,
    pub max_length: Option<usize>,
    pub consensus_len: usize,
    pub consensus: String,
    pub merges: Vec<MergeStep>,
}

impl AssemblyReport {
    pub fn new(res: &AssemblyResult, params: &AssemblyParams, fragments: usize) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            status: res.status,
            iterations: res.iterations,
            fragments,
            unmerged: res.unmerged,
            scoring: params.scoring,
            max_length: (params.max_length != usize::MAX).then_some(params.max_length),
            consensus_len: res.consensus.len(),
            consensus: String::from_utf8_lossy(&res.consensus).into_owned(),
            merges: res.merges.clone(),
        }
    }
}
