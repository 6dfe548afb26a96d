// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// The heart of the application — pure Rust structs, enums and
// traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO ML-runtime code
//   - Only plain Rust structs, enums, and traits
//
// The one exception to "no I/O" is path *arithmetic*: the label
// index computes where an image or cache entry would live, but
// never touches the filesystem itself. That keeps the mapping
// (label, category, index) → path a pure function, testable
// without any files on disk.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Class labels and the train/test/validation index over them
pub mod label_entry;

// Typed error enums for index lookups and cache operations
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
