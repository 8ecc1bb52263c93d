/// Data layer: record types, line loading, and the in-memory store.
///
/// Architecture:
/// ```text
///  assets/pokemon_list.csv        BUILTIN_SAMPLES
///        │                              │
///        ▼                              │
///   ┌──────────┐                        │
///   │  loader   │  clean + validate     │
///   └──────────┘  lines → LoadReport    │
///        │                              │
///        └──────────────┬───────────────┘
///                       ▼
///                ┌──────────────┐
///                │   factory     │  line → Record (sequential id)
///                └──────────────┘
///                       │
///                       ▼
///                ┌──────────────┐
///                │    store      │  Vec<Record>: random / search / remove
///                └──────────────┘
/// ```

pub mod error;
pub mod factory;
pub mod loader;
pub mod model;
pub mod store;
