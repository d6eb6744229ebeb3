use super::scoring::ScoringScheme;
use super::AlignmentVariant;

/// 动态规划打分矩阵
///
/// 行对应序列 B（`len_b + 1` 行），列对应序列 A（`len_a + 1` 列），
/// 第 0 行 / 第 0 列表示空前缀。矩阵只在 [`ScoreMatrix::fill`] 中写入，
/// 回溯阶段只读。缓冲区可跨调用复用。
#[derive(Clone, Debug, Default)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(a: &[u8], b: &[u8], variant: AlignmentVariant, p: &ScoringScheme) -> Self {
        let mut m = Self::new();
        m.fill(a, b, variant, p);
        m
    }

    fn reset(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cells.clear();
        self.cells.resize(rows * cols, 0);
    }

    /// 按比对类型的边界策略与递推式填充矩阵
    pub fn fill(&mut self, a: &[u8], b: &[u8], variant: AlignmentVariant, p: &ScoringScheme) {
        let rows = b.len() + 1;
        let cols = a.len() + 1;
        self.reset(rows, cols);

        if variant == AlignmentVariant::Global {
            for x in 0..cols {
                self.cells[x] = (x as i32).saturating_mul(p.gap);
            }
            for y in 0..rows {
                self.cells[y * cols] = (y as i32).saturating_mul(p.gap);
            }
        }

        let floor = variant == AlignmentVariant::Local;
        let c = &mut self.cells;

        for y in 1..rows {
            let by = b[y - 1];
            for x in 1..cols {
                let idx = y * cols + x;
                // 分值在 i32 边界处饱和，极端罚分不会溢出
                let diag = c[idx - cols - 1].saturating_add(p.substitution(a[x - 1], by));
                let up = c[idx - cols].saturating_add(p.gap);
                let left = c[idx - 1].saturating_add(p.gap);

                let mut val = diag.max(up).max(left);
                if floor && val < 0 {
                    val = 0;
                }
                c[idx] = val;
            }
        }
    }

    #[inline]
    pub fn get(&self, y: usize, x: usize) -> i32 {
        self.cells[y * self.cols + x]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, y: usize) -> &[i32] {
        &self.cells[y * self.cols..(y + 1) * self.cols]
    }

    pub fn column(&self, x: usize) -> impl Iterator<Item = i32> + '_ {
        self.cells.iter().skip(x).step_by(self.cols.max(1)).copied()
    }

    /// 全矩阵最大值，按行优先取第一次出现的位置
    pub fn max_cell(&self) -> (usize, usize, i32) {
        let mut best = (0, 0, i32::MIN);
        for y in 0..self.rows {
            for (x, &v) in self.row(y).iter().enumerate() {
                if v > best.2 {
                    best = (y, x, v);
                }
            }
        }
        best
    }

    /// 最后一列与最后一行的最大值，相等时取最后一列
    pub fn max_border_cell(&self) -> (usize, usize, i32) {
        let last_y = self.rows - 1;
        let last_x = self.cols - 1;

        let (col_y, col_max) = first_max(self.column(last_x));
        let (row_x, row_max) = first_max(self.row(last_y).iter().copied());

        if col_max >= row_max {
            (col_y, last_x, col_max)
        } else {
            (last_y, row_x, row_max)
        }
    }
}

fn first_max(values: impl Iterator<Item = i32>) -> (usize, i32) {
    let mut best = (0, i32::MIN);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}
