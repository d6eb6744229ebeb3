use thiserror::Error;

/// 库内统一错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// 空序列、含间隙符号的序列、矩阵尺寸与序列长度不一致、非法打分参数等
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 组装过程中某一轮没有任何片段通过重叠阈值
    #[error(
        "no fragment clears the overlap threshold after {iterations} iteration(s); \
         {remaining} fragment(s) left unmerged"
    )]
    NoAlignmentFound { iterations: usize, remaining: usize },

    /// 比对长度为 0，相对一致度无定义
    #[error("alignment has length 0, relative identity is undefined")]
    DegenerateAlignment,
}

pub type Result<T> = std::result::Result<T, Error>;
