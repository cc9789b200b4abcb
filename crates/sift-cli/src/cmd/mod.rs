pub mod completions;
pub mod rank;
pub mod score;

/// Wrap the chars at `positions` (ascending `char` indices) in brackets.
pub fn highlight(label: &str, positions: &[usize]) -> String {
    let mut out = String::with_capacity(label.len() + positions.len() * 2);
    let mut next = positions.iter().peekable();
    for (idx, c) in label.chars().enumerate() {
        if next.next_if(|&&p| p == idx).is_some() {
            out.push('[');
            out.push(c);
            out.push(']');
        } else {
            out.push(c);
        }
    }
    out
}

/// Fixed-width score column; `-` for a candidate that did not match.
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s:.4}"))
}
