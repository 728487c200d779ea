/// Aggregation layer: frequency counts and two-category comparisons.
///
/// ```text
///   Catalog ──► count_by_value ──► FrequencyTable ──► most_frequent
///      │
///      └──────► compare ─────────► ComparisonTable
/// ```

pub mod compare;
pub mod counts;
