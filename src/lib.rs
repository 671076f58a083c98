//! SerCon Core Library
//!
//! Byte and text primitives for the SerCon serial console tool: everything
//! the interactive front-end needs to build commands for a UART-attached
//! device, check its responses, and explain its error codes, but nothing
//! about the UI itself.
//!
//! # Features
//!
//! - **Command Checksums**: Additive low-byte checksum tagging and verification
//!   for the `payload:XX` frame convention
//! - **Hex Codec**: Strict hex-to-byte decoding for operator input, plus
//!   encoding and spaced formatting for display and session logs
//! - **Pattern Scanning**: All-occurrence byte pattern search over dumped
//!   buffers, overlaps included
//! - **Error-Code Lookup**: File-backed code-to-description tables (YAML/JSON)
//!   resolved to operator-facing text that never fails
//! - **Port Names**: Friendly-name resolution for serial port pickers with a
//!   platform-backed and a pass-through implementation
//! - **Configuration**: YAML file plus `SERCON_` environment overrides
//! - **Logging**: Structured tool logs and per-port session logs
//!
//! # Quick Start
//!
//! ```rust
//! use sercon_core::{checksum, hex, scan};
//!
//! // Tag an outgoing command
//! let command = checksum::append("errlog 0");
//! assert_eq!(command, "errlog 0:DB");
//!
//! // Decode operator-typed hex and scan it
//! let payload = hex::decode("4F4B").unwrap();
//! let hits: Vec<usize> = scan::find_pattern(&payload, &[0x4B]).unwrap().collect();
//! assert_eq!(hits, vec![1]);
//! ```
//!
//! # Error-Code Lookup
//!
//! ```rust,no_run
//! use sercon_core::errordb::ErrorCodeResolver;
//!
//! let resolver = ErrorCodeResolver::from_path("errordb.yaml");
//! println!("{}", resolver.resolve("E0000001"));
//! ```
//!
//! # Configuration
//!
//! Configuration is managed through a YAML file with the following structure:
//!
//! ```yaml
//! errordb:
//!   path: "errordb.yaml"
//! ports:
//!   resolver: system
//! logging:
//!   level: "info"
//!   console: true
//!   dir: "logs"
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return `Result<T, SerConError>`. Operations that
//! feed a console loop directly (error-code resolution, port names) return
//! displayable values instead of errors, so the loop never has to special-case
//! a failure.

pub mod checksum;
pub mod config;
pub mod error;
pub mod errordb;
pub mod hex;
pub mod logging;
pub mod ports;
pub mod scan;

// Re-export commonly used types and traits
pub use config::CoreConfig;
pub use error::{Result, SerConError};
pub use errordb::{ErrorCodeResolver, ErrorEntry, ErrorTableSource, Resolution};
pub use ports::{PassthroughNameResolver, PortNameResolver, SystemPortNameResolver};
