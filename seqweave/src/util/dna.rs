/// 比对输出中的间隙占位符
pub const GAP: u8 = b'-';

pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

#[inline]
pub fn is_base(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T')
}

/// 转为大写，U 视作 T，其它字符统一映射为 N
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        let up = b.to_ascii_uppercase();
        let nb = match up {
            b'A' | b'C' | b'G' | b'T' => up,
            b'U' => b'T',
            _ => b'N',
        };
        out.push(nb);
    }
    out
}

/// 第一个不属于 {A,C,G,T} 的位置
pub fn first_invalid(seq: &[u8]) -> Option<usize> {
    seq.iter().position(|&b| !is_base(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_case_and_rna() {
        assert_eq!(normalize_seq(b"acgU-x"), b"ACGTNN");
    }

    #[test]
    fn detects_foreign_symbols() {
        assert_eq!(first_invalid(b"ACGT"), None);
        assert_eq!(first_invalid(b"ACNT"), Some(2));
        assert_eq!(first_invalid(b""), None);
    }
}
