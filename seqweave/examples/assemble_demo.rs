//! 在 library 模式下演示比对与组装。
//!
//! 运行方式：
//! ```bash
//! cargo run --example assemble_demo
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use seqweave::align::{self, AlignmentVariant, ScoringScheme};
use seqweave::assembly::{self, AssemblyParams};
use seqweave::{render, sim};

fn main() {
    // 1. 三种比对
    let p = ScoringScheme::default();
    for variant in [AlignmentVariant::Global, AlignmentVariant::Local, AlignmentVariant::SemiGlobal] {
        let r = align::align(b"GGGACGTACC", b"ACGTTCC", variant, &p).expect("valid input");
        println!("== {} (score {}, CIGAR {})", variant, r.score, r.cigar);
        print!("{}", render::render_alignment(&r));
        println!();
    }

    // 2. 生成原始序列并切成片段
    let mut rng = StdRng::seed_from_u64(2021);
    let origin = sim::generate_origin(100, &mut rng);
    let parts = sim::cut_origin(&origin, 5, 20, 10, &mut rng).expect("valid length range");
    println!("原始序列: {}", String::from_utf8_lossy(&origin));
    println!("片段数: {}", parts.len());

    // 3. 贪心组装
    let params = AssemblyParams { max_length: origin.len(), ..AssemblyParams::default() };
    let res = assembly::assemble(&parts, &params).expect("non-empty pool");
    println!("状态: {}，迭代 {} 次，合并 {} 个片段", res.status, res.iterations, res.merges.len());
    println!("共识序列: {}", String::from_utf8_lossy(&res.consensus));

    // 4. 与原始序列做全局比对
    let check = align::align(&origin, &res.consensus, AlignmentVariant::Global, &p).expect("valid input");
    print!("{}", render::render_alignment(&check));
}
