/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalog (typed rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<Title>, derived month_added
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  row predicates → matching titles
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
