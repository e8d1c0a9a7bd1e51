/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  post_covid_health_effects.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalize rows → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Patient>, distinct-value index, age bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → ordered row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  View → KPIs, grouped means, distributions, quartiles
///   └──────────┘
/// ```
///
/// Each filter interaction re-runs filter → summary to completion; nothing
/// derived is cached across interactions.

pub mod loader;
pub mod model;
pub mod normalize;
pub mod filter;
pub mod summary;
