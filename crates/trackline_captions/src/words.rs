use trackline_core::CaptionWord;

/// Split `text` on whitespace and share `[start_ms, end_ms)` between the
/// words in equal, contiguous slices. Slice edges are rounded to whole
/// milliseconds; the last word always ends at `end_ms`.
pub fn distribute_words(text: &str, start_ms: u64, end_ms: u64, confidence: f64) -> Vec<CaptionWord> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let n = words.len() as u64;
    let duration = end_ms.saturating_sub(start_ms);

    let edge = |i: u64| start_ms + rounded_div(i as u128 * duration as u128, n as u128) as u64;

    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            let i = i as u64;
            CaptionWord {
                word: word.to_string(),
                start_ms: edge(i),
                end_ms: edge(i + 1),
                confidence,
            }
        })
        .collect()
}

/// `num / den` rounded half up. Wide enough that `i * duration` cannot
/// overflow for any `u64` range.
fn rounded_div(num: u128, den: u128) -> u128 {
    (2 * num + den) / (2 * den)
}
