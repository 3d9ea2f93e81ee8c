/// Running total of `vec`: output[i] = vec[0] + ... + vec[i]
pub fn cumulative_sum(vec: &[f64]) -> Vec<f64> {
    vec.iter()
        .scan(0.0, |total, &x| {
            *total += x;
            Some(*total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_sum_runs_left_to_right() {
        assert_eq!(cumulative_sum(&[1.0, -2.0, 3.0]), vec![1.0, -1.0, 2.0]);
        assert!(cumulative_sum(&[]).is_empty());
    }
}
