//! Top-k reduction over classification outputs.

use crate::core::tensor::Tensor;

/// Extracts the `k` highest-scoring entries from an output tensor.
///
/// Copies the tensor contents into a plain scalar buffer, then repeats `k`
/// times: scan every not-yet-selected index, pick the one with the
/// strictly greatest score, mark it selected, append it. Ties go to the
/// lowest index because the comparison is strict `>`. Results come out in
/// descending selection order; no further sorting guarantee is made. For
/// `k = 1` this reduces to a single linear-scan argmax.
///
/// `k` is capped at the tensor element count so every returned index is
/// distinct. Each selection round starts from a `-1.0` sentinel; if every
/// remaining score is below that, the round degenerates to index 0. That
/// is a documented policy for the probability-like outputs this runtime
/// consumes, not a bug to fix.
pub fn top_k(k: usize, tensor: &Tensor) -> Vec<(usize, f32)> {
    let scores = tensor.to_vec();
    let count = k.min(scores.len());
    let mut selected = vec![false; scores.len()];
    let mut result = Vec::with_capacity(count);

    for _ in 0..count {
        let index = top(&scores, &selected);
        selected[index] = true;
        result.push((index, scores[index]));
    }

    result
}

fn top(scores: &[f32], selected: &[bool]) -> usize {
    let mut index = 0;
    let mut max = -1.0f32;
    for (i, &score) in scores.iter().enumerate() {
        if selected[i] {
            continue;
        }
        if score > max {
            max = score;
            index = i;
        }
    }
    index
}
