/// Returns the newest `n` entries of `series`, oldest first. When `n` is
/// larger than the series the whole series is returned.
pub fn last_n<T: Clone>(series: &[T], n: usize) -> Vec<T> {
    series[series.len().saturating_sub(n)..].to_vec()
}
