//! 随机序列与片段生成，用于演示和测试组装流程

use rand::Rng;

use crate::error::{Error, Result};
use crate::util::dna::BASES;

pub fn generate_origin<R: Rng>(len: usize, rng: &mut R) -> Vec<u8> {
    (0..len).map(|_| BASES[rng.gen_range(0..BASES.len())]).collect()
}

/// 把原始序列切成 `sets` 组首尾相接的片段
///
/// 每组从 0 开始，每次取 `[min_len, max_len]` 内的随机长度；
/// 剩余长度不超过 `min_len` 时整段作为最后一个片段。
pub fn cut_origin<R: Rng>(
    origin: &[u8],
    min_len: usize,
    max_len: usize,
    sets: usize,
    rng: &mut R,
) -> Result<Vec<Vec<u8>>> {
    check_lengths(min_len, max_len)?;

    let mut parts = Vec::new();
    for _ in 0..sets {
        let mut x = 0usize;
        while x < origin.len() {
            let step = rng.gen_range(min_len..=max_len);
            if origin.len() - x <= min_len {
                parts.push(origin[x..].to_vec());
            } else {
                let end = (x + step).min(origin.len());
                parts.push(origin[x..end].to_vec());
            }
            x += step;
        }
    }
    Ok(parts)
}

/// 互不相关的随机片段，长度在 `[min_len, max_len]` 内
pub fn random_fragments<R: Rng>(
    count: usize,
    min_len: usize,
    max_len: usize,
    rng: &mut R,
) -> Result<Vec<Vec<u8>>> {
    check_lengths(min_len, max_len)?;
    Ok((0..count)
        .map(|_| {
            let len = rng.gen_range(min_len..=max_len);
            generate_origin(len, rng)
        })
        .collect())
}

fn check_lengths(min_len: usize, max_len: usize) -> Result<()> {
    if min_len == 0 || min_len > max_len {
        return Err(Error::InvalidInput(format!(
            "fragment length range {}..={} is invalid",
            min_len, max_len
        )));
    }
    Ok(())
}
