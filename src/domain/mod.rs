// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define what the
// system talks about: student records, the schema they must
// satisfy, the errors the pipeline reports, and the abstractions
// the other layers implement.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O or network calls
//   - Only plain data, enums and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Typed error taxonomy shared by every layer
pub mod error;

// Student record, feature vector, prediction request/response
pub mod record;

// Declarative column descriptor
pub mod schema;

// Core abstractions (traits) that other layers implement
pub mod traits;
