// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one pipeline step (ingest, validate, preprocess, train, serve).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing here (that's Layer 1)
//   - No direct CSV/JSON handling (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Each step is a UseCase struct built from plain config and run
// with `execute()`. Steps communicate only through files on disk.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Paths and server settings
pub mod config;

// raw CSV → processed CSV
pub mod ingest_use_case;

// processed CSV → schema check
pub mod validate_use_case;

// processed CSV → train/test split files
pub mod preprocess_use_case;

// split files → model artifact + metrics
pub mod train_use_case;

// model artifact → HTTP server
pub mod serve_use_case;
