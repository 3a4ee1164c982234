//! valkit
//!
//! Stateless helpers for the boundary between loosely typed input
//! (configuration values, query parameters, parsed JSON) and typed code.
//!
//! # Features
//!
//! - **Format validators**: numbers, SHA-256 digests, UUIDs, e-mail addresses
//! - **Coercion with defaults**: every `get_valid_*` helper returns either
//!   the validated value or the caller's default, never an error
//! - **Prefix number parsing**: `"42abc"` reads as `42`
//! - **Encoding helpers**: lenient Base64/Base64url decoding and Latin-1 to
//!   ASCII transliteration
//! - **Filesystem helpers**: existence checks, recursive directory creation
//!   and installed dependency lookup
//!
//! # Quick Start
//!
//! ```rust
//! use valkit::{get_valid_bool, get_valid_int_range, get_valid_tokens, test_uuid};
//! use serde_json::json;
//!
//! let params = json!({
//!     "verbose": "yes",
//!     "port": "8080",
//!     "tags": "web, api ,",
//!     "session": "99DD9004-053C-4C1C-9D7E-AE60659DEB56",
//! });
//!
//! assert!(get_valid_bool(&params["verbose"], false));
//! assert_eq!(get_valid_int_range(&params["port"], 1, 65535, 80), 8080);
//! assert_eq!(get_valid_tokens(&params["tags"], Vec::new()), ["web", "api"]);
//! assert!(test_uuid(&params["session"]));
//! // Missing keys index to `Null`, the absent value
//! assert_eq!(get_valid_int_range(&params["timeout"], 1, 60, 30), 30);
//! ```

/// Library version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod error;
pub mod types;

// Helper modules
pub mod module_root;
pub mod utils;

// Re-exports for convenience
pub use error::{Result, ValkitError};
pub use module_root::{get_module_root_path, make_module_root_path, ModulePaths};
pub use types::{IntegerTarget, Value, ValueKind};
pub use utils::*;
