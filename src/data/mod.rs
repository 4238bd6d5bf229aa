/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .tsv / .txt / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SampleStore (bad rows quarantined)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SampleStore  │  Vec<Sample>, distinct state labels
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  state selection, zoom → active domain / active subset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
