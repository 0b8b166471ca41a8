//! # CLI Module
//!
//! Command-line front end that runs a path through the full dispatch pipeline
//! against a mapping table loaded from YAML.
//!
//! ## Mapping File
//!
//! ```yaml
//! mappings:
//!   - path: /custom/path
//!     kind: widget        # widget | page | json
//!     value: { id: 42, name: "Sprocket" }
//!   - path: /about
//!     kind: page
//!     value: { title: "About", body: "Hello" }
//! ```
//!
//! ## Commands
//!
//! ### `resolve`
//!
//! Dispatch one request and print the response as JSON:
//!
//! ```bash
//! brrtrouter-backing resolve --mappings content.yaml --path /custom/path --expect widget
//! ```
//!
//! Options:
//! - `--mappings <FILE>` - Mapping table (required)
//! - `--path <PATH>` - Request path, may include a query string (required)
//! - `--method <METHOD>` - HTTP method (default: GET)
//! - `--expect <widget|page|any>` - Declared type of the content handler's backing
//!   parameter (default: any). A mismatch leaves the parameter unresolved and the
//!   request fails with 500.
//! - `--strict` - Report a type mismatch as a binding error
//! - `--mount-root <PREFIX>` - Override `BRRTR_MOUNT_ROOT`
//!
//! Paths the table does not map fall back to the static routes (`GET /health`).
//!
//! ### `inspect`
//!
//! List mapped paths with the type of their backing object:
//!
//! ```bash
//! brrtrouter-backing inspect --mappings content.yaml
//! ```

mod commands;
mod content;


pub use commands::{build_dispatcher, execute, run_cli, Cli, Commands, Expect};
pub use content::{load_mapping_file, parse_mapping_table, ContentKind, MappingEntry, MappingFile, Page, Widget};
