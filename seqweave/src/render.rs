use std::fmt::Write as _;

use crate::align::AlignmentResult;

/// 三行文本：序列 A、匹配标记、序列 B，外加一致度
pub fn render_alignment(r: &AlignmentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", String::from_utf8_lossy(&r.aligned_a));
    let _ = writeln!(out, "{}", String::from_utf8_lossy(&r.marker));
    let _ = writeln!(out, "{}", String::from_utf8_lossy(&r.aligned_b));
    out.push('\n');
    match r.relative_identity() {
        Ok(id) => {
            let _ = writeln!(
                out,
                "identity: {:.2}% ({}/{})",
                id * 100.0,
                r.absolute_matches,
                r.len()
            );
        }
        Err(_) => out.push_str("identity: undefined (empty alignment)\n"),
    }
    out
}
