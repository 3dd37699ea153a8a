/// The standard CloudWatch statistic names, in display order.
pub const STANDARD_STATISTICS: [&str; 5] = ["Average", "Maximum", "Minimum", "Sum", "SampleCount"];

/// Owned copy of [`STANDARD_STATISTICS`].
pub fn standard_statistics() -> Vec<String> {
    STANDARD_STATISTICS.iter().map(|s| (*s).to_owned()).collect()
}
