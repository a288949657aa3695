use rand::seq::SliceRandom;
use rand::Rng;

/// Splits comma-separated option text into trimmed, non-empty labels.
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Uniformly shuffles the options in place.
pub fn shuffle_labels<R: Rng + ?Sized>(labels: &mut [String], rng: &mut R) {
    labels.shuffle(rng);
}
