//! # seqweave
//!
//! 基于动态规划的序列比对与贪心片段组装。
//!
//! 本 crate 提供：
//!
//! - **全局比对**：Needleman-Wunsch，首尾间隙计罚
//! - **局部比对**：Smith-Waterman，得分下限为 0
//! - **自由移位比对**：半全局，首尾悬挂部分不计罚
//! - **贪心组装**：以自由移位比对为核心，把重叠片段逐个并入共识序列
//!
//! ## 快速示例
//!
//! ```rust
//! use seqweave::align::{align, AlignmentVariant, ScoringScheme};
//! use seqweave::assembly::{assemble, AssemblyParams};
//!
//! let r = align(b"AATGC", b"ATGC", AlignmentVariant::Global, &ScoringScheme::default()).unwrap();
//! assert_eq!(r.aligned_b, b"-ATGC");
//! assert_eq!(r.relative_identity().unwrap(), 0.8);
//!
//! let res = assemble(["GGGACGTAC", "ACGTACTTTG"], &AssemblyParams::default()).unwrap();
//! assert_eq!(res.consensus, b"GGGACGTACTTTG");
//! ```
//!
//! ## 模块说明
//!
//! - [`align`]：打分矩阵、回溯与比对结果
//! - [`assembly`]：片段池、共识合并与组装主循环
//! - [`io`]：FASTA 读写
//! - [`sim`]：随机原始序列与片段生成
//! - [`render`] / [`report`]：文本与 JSON 输出
//! - [`util`]：DNA 字母表工具

pub mod align;
pub mod assembly;
pub mod error;
pub mod io;
pub mod render;
pub mod report;
pub mod sim;
pub mod util;

pub use error::{Error, Result};
