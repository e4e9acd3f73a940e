use std::collections::HashMap;

pub struct GradingService;

impl GradingService {
    /// Decide whether a free-text answer should be accepted for a reference
    /// answer. Both sides are normalized first; an answer passes on exact
    /// normalized equality or a similarity ratio of at least 0.85.
    pub fn grade(submitted: &str, reference: &str) -> bool {
        let submitted = Self::normalize(submitted);
        let reference = Self::normalize(reference);
        submitted == reference || Self::similarity_ratio(&submitted, &reference) >= 0.85
    }

    /// Lowercase, collapse every whitespace run to one space, trim the ends.
    pub fn normalize(text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Ratcliff/Obershelp similarity: `2 * M / T` where `M` is the total
    /// length of matching blocks (longest contiguous match, then recurse on
    /// both remainders) and `T` the combined length of the inputs. The 0.85
    /// acceptance threshold is calibrated against this exact matcher, so a
    /// generic edit-distance metric is not a substitute.
    pub fn similarity_ratio(a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        let matches = matching_chars(&a, &b);
        2.0 * matches as f64 / total as f64
    }
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest contiguous matching block between `a` and `b`, returned as
/// `(start_in_a, start_in_b, length)`. Ties resolve to the earliest
/// occurrence in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b_positions.entry(c).or_default().push(j);
    }

    let mut best = (0usize, 0usize, 0usize);
    // run_lengths[j] = length of the match ending at a[i], b[j]
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate() {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_positions.get(c) {
            for &j in positions {
                let k = if j == 0 {
                    1
                } else {
                    run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next_runs.insert(j, k);
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        run_lengths = next_runs;
    }
    best
}
