use std::fmt::Write as _;
use std::ops::Range;

use super::matrix::ScoreMatrix;
use super::scoring::ScoringScheme;
use super::AlignmentVariant;
use crate::error::{Error, Result};
use crate::util::dna::GAP;

/// 回溯中的单步移动
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// 匹配 / 错配
    Diag,
    /// 序列 A 中插入间隙（消耗 B 的一个符号）
    Up,
    /// 序列 B 中插入间隙（消耗 A 的一个符号）
    Left,
}

impl Move {
    pub fn code(self) -> char {
        match self {
            Move::Diag => 'M',
            Move::Up => 'I',
            Move::Left => 'D',
        }
    }
}

/// 回溯得到的最优路径
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub score: i32,
    /// 正向顺序的路径（不含边界填充与自由移位部分）
    pub moves: Vec<Move>,
    /// 路径在 A 中覆盖的区间
    pub a_range: Range<usize>,
    /// 路径在 B 中覆盖的区间
    pub b_range: Range<usize>,
}

/// 从比对类型决定的起点回溯
///
/// 平分时优先级固定：对角 > 向上 > 向左。只有能复现当前格分值的移动才会被采用，
/// 因此得到的路径一定是最优路径之一。矩阵全程只读。
pub fn traceback(
    m: &ScoreMatrix,
    a: &[u8],
    b: &[u8],
    variant: AlignmentVariant,
    p: &ScoringScheme,
) -> Result<Trace> {
    if m.rows() != b.len() + 1 || m.cols() != a.len() + 1 {
        return Err(Error::InvalidInput(format!(
            "matrix is {}x{} but sequences need {}x{}",
            m.rows(),
            m.cols(),
            b.len() + 1,
            a.len() + 1
        )));
    }

    let (start_y, start_x, score) = match variant {
        AlignmentVariant::Global => (b.len(), a.len(), m.get(b.len(), a.len())),
        AlignmentVariant::Local => m.max_cell(),
        AlignmentVariant::SemiGlobal => m.max_border_cell(),
    };

    let mut moves: Vec<Move> = Vec::new();
    let mut y = start_y;
    let mut x = start_x;

    while y > 0 && x > 0 {
        let here = m.get(y, x);
        if variant == AlignmentVariant::Local && here == 0 {
            break;
        }

        if here == m.get(y - 1, x - 1).saturating_add(p.substitution(a[x - 1], b[y - 1])) {
            moves.push(Move::Diag);
            y -= 1;
            x -= 1;
        } else if here == m.get(y - 1, x).saturating_add(p.gap) {
            moves.push(Move::Up);
            y -= 1;
        } else {
            moves.push(Move::Left);
            x -= 1;
        }
    }

    moves.reverse();

    Ok(Trace {
        score,
        moves,
        a_range: x..start_x,
        b_range: y..start_y,
    })
}

impl Trace {
    /// 展开为带间隙符号的等长序列对
    ///
    /// Global / SemiGlobal：路径之前剩余的前缀与间隙对齐；
    /// SemiGlobal：起点之后的后缀同样与间隙对齐（自由移位）。
    /// Local 只输出路径本身。
    pub fn aligned_pair(&self, a: &[u8], b: &[u8], variant: AlignmentVariant) -> (Vec<u8>, Vec<u8>) {
        let mut out_a = Vec::with_capacity(a.len() + b.len());
        let mut out_b = Vec::with_capacity(a.len() + b.len());
        let flank = variant != AlignmentVariant::Local;

        if flank {
            for &c in &a[..self.a_range.start] {
                out_a.push(c);
                out_b.push(GAP);
            }
            for &c in &b[..self.b_range.start] {
                out_a.push(GAP);
                out_b.push(c);
            }
        }

        let mut xi = self.a_range.start;
        let mut yi = self.b_range.start;
        for &mv in &self.moves {
            match mv {
                Move::Diag => {
                    out_a.push(a[xi]);
                    out_b.push(b[yi]);
                    xi += 1;
                    yi += 1;
                }
                Move::Up => {
                    out_a.push(GAP);
                    out_b.push(b[yi]);
                    yi += 1;
                }
                Move::Left => {
                    out_a.push(a[xi]);
                    out_b.push(GAP);
                    xi += 1;
                }
            }
        }

        if flank {
            for &c in &a[self.a_range.end..] {
                out_a.push(c);
                out_b.push(GAP);
            }
            for &c in &b[self.b_range.end..] {
                out_a.push(GAP);
                out_b.push(c);
            }
        }

        (out_a, out_b)
    }

    pub fn cigar(&self) -> String {
        moves_to_cigar(&self.moves)
    }
}

pub fn moves_to_cigar(moves: &[Move]) -> String {
    let mut cigar = String::new();
    let Some((&first, rest)) = moves.split_first() else {
        return cigar;
    };
    let mut cur = first;
    let mut len = 1usize;
    for &mv in rest {
        if mv == cur {
            len += 1;
        } else {
            let _ = write!(&mut cigar, "{}{}", len, cur.code());
            cur = mv;
            len = 1;
        }
    }
    let _ = write!(&mut cigar, "{}{}", len, cur.code());
    cigar
}
