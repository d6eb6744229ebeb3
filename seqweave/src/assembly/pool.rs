use std::collections::HashSet;

/// 去重并去包含后的片段集合
///
/// 按长度降序排列（同长度保持输入顺序），任何片段都不是另一保留片段的连续子串。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FragmentPool {
    fragments: Vec<Vec<u8>>,
}

impl FragmentPool {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut seen: HashSet<Vec<u8>> = HashSet::new();
        let mut unique: Vec<Vec<u8>> = Vec::new();
        let mut empty = 0usize;
        for f in fragments {
            let f = f.as_ref();
            if f.is_empty() {
                empty += 1;
                continue;
            }
            if seen.insert(f.to_vec()) {
                unique.push(f.to_vec());
            }
        }
        if empty > 0 {
            log::warn!("dropped {} empty fragment(s)", empty);
        }

        // sort_by 是稳定排序
        unique.sort_by(|a, b| b.len().cmp(&a.len()));

        let total = unique.len();
        let mut kept: Vec<Vec<u8>> = Vec::with_capacity(total);
        for f in unique {
            if !kept.iter().any(|k| contains(k, &f)) {
                kept.push(f);
            }
        }
        log::debug!(
            "fragment pool: {} unique, {} kept after containment filter",
            total,
            kept.len()
        );

        Self { fragments: kept }
    }

    pub fn fragments(&self) -> &[Vec<u8>] {
        &self.fragments
    }

    pub fn into_inner(self) -> Vec<Vec<u8>> {
        self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// `needle` 是否为 `haystack` 的连续子串
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}
