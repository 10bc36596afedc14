use std::iter::FromIterator;

/// Converts an iterator into a vector.
///
/// Useful when caching the result of a sequence stage for multiple passes,
/// e.g. estimating a volume threshold before quantizing the same stream.
pub fn to_vec<T, I: Iterator<Item = T> + Sized>(iter: I) -> Vec<T> {
    FromIterator::from_iter(iter)
}

/// Converts a result iterator into a vector result, stopping at the first
/// error.
pub fn to_vec_result<T, Err, I: Iterator<Item = Result<T, Err>> + Sized>(
    iter: I,
) -> Result<Vec<T>, Err> {
    FromIterator::from_iter(iter)
}
