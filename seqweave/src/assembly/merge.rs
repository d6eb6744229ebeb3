use crate::align::AlignmentResult;
use crate::util::dna::GAP;

/// 把片段叠加到共识序列上
///
/// 逐列扫描比对：共识行为间隙时取片段在同一列的符号，否则保留共识符号。
/// 自由移位比对两端的悬挂部分因此原样并入，共识只会变长。
pub fn overlay(alignment: &AlignmentResult) -> Vec<u8> {
    alignment
        .aligned_a
        .iter()
        .zip(&alignment.aligned_b)
        .filter_map(|(&c, &f)| {
            let sym = if c == GAP { f } else { c };
            (sym != GAP).then_some(sym)
        })
        .collect()
}
