//! # Parser Module
//!
//! Turns Go source into the field metadata the generator consumes.
//!
//! ## Overview
//!
//! - [`parse_package_info`] loads every non-test `.go` file of a package
//!   directory and parses it with tree-sitter
//! - [`collect_fields`] walks the parsed files for a named struct and returns
//!   one [`FieldDescriptor`] per field, in declaration order
//! - [`ExclusionMarker`] decides which fields opt out of generation
//!
//! ## Exclusion markers
//!
//! By default a field is skipped when its struct tag carries `foggo:"-"`:
//!
//! ```go
//! type Server struct {
//!     Addr  string
//!     state int `foggo:"-"`
//! }
//! ```
//!
//! The tag key is configurable, and a comment directive can be used instead:
//!
//! ```rust
//! use foggo::parser::{collect_fields, ExclusionMarker, GoFile};
//!
//! let src = "package server\n\ntype Server struct {\n\tAddr string\n\tstate int // foggo:ignore\n}\n";
//! let file = GoFile::parse(src)?;
//! let marker = ExclusionMarker::comment("foggo:ignore");
//! let (fields, index) = collect_fields("Server", &[file], &marker)?;
//! assert_eq!(index, 0);
//! assert!(fields[1].excluded);
//! # Ok::<(), foggo::FoggoError>(())
//! ```

mod collect;
mod package;
mod tag;

pub use collect::{collect_fields, FieldDescriptor};
pub use package::{parse_package_info, GoFile, PackageInfo};
pub use tag::{lookup_tag, unquote_tag, ExclusionMarker, DEFAULT_TAG_KEY};
