//! # foggo
//!
//! **foggo** generates the boilerplate of the
//! ["Functional Option Pattern"](https://dave.cheney.net/2014/10/17/functional-options-for-friendly-apis)
//! for a Go struct, reading the struct straight from the package's source.
//!
//! ## Overview
//!
//! Given a package directory and a struct name, foggo finds the struct
//! declaration, collects its fields, and writes `With<Field>` option
//! functions (and optionally a `New<Struct>` constructor) into a sibling
//! `<file>_gen.go`.
//!
//! ```go
//! // server.go
//! type Server struct {
//!     Addr    string
//!     Timeout time.Duration
//!     conns   int `foggo:"-"`
//! }
//! ```
//!
//! `foggo fop --struct Server` produces `server_gen.go`:
//!
//! ```go
//! // Code generated by foggo; DO NOT EDIT.
//!
//! package server
//!
//! type ServerOption func(*Server)
//!
//! func NewServer(options ...ServerOption) *Server {
//!     s := &Server{}
//!
//!     for _, option := range options {
//!         option(s)
//!     }
//!
//!     return s
//! }
//!
//! func WithAddr(Addr string) ServerOption { ... }
//! func WithTimeout(Timeout time.Duration) ServerOption { ... }
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - Loads a Go package with tree-sitter and collects the
//!   fields of the target struct
//! - **[`generator`]** - Validates field names, selects one of four
//!   templates, renders, and formats
//! - **[`writer`]** - Persists the result next to the declaring file
//! - **[`config`]** - `foggo.toml` settings
//! - **[`cli`]** - The `foggo fop` / `foggo afop` commands
//! - **[`logging`]** - tracing subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(foggo fop)
//!     participant Pkg as parser::parse_package_info
//!     participant Collect as parser::collect_fields
//!     participant Gen as generator::Generator
//!     participant Fmt as goimports
//!     participant Writer as writer::Writer
//!
//!     User->>CLI: foggo fop --struct Server
//!     CLI->>Pkg: parse_package_info(".")
//!     Pkg-->>CLI: PackageInfo (name, files, paths)
//!     CLI->>Collect: collect_fields("Server", files)
//!     Collect-->>CLI: (Vec<FieldDescriptor>, file index)
//!     CLI->>Gen: generate(pkg, "Server", fields, mode)
//!     Gen->>Gen: check_field_names
//!     Gen->>Gen: render(RenderStrategy)
//!     Gen->>Fmt: format(code)
//!     Fmt-->>Gen: canonical code
//!     Gen-->>CLI: code
//!     CLI->>Writer: write(code, paths[index])
//!     Writer-->>User: server_gen.go
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust
//! use foggo::generator::{GenerationMode, Generator, OptionStyle};
//! use foggo::parser::{collect_fields, ExclusionMarker, GoFile};
//!
//! let file = GoFile::parse("package server\n\ntype Server struct {\n\tAddr string\n}\n")?;
//! let (fields, _) = collect_fields("Server", &[file], &ExclusionMarker::default())?;
//!
//! let mode = GenerationMode { constructor: false, style: OptionStyle::Interface };
//! let code = Generator::without_formatting().generate("server", "Server", &fields, mode)?;
//! assert!(code.contains("type ServerAddrOption struct {"));
//! assert!(!code.contains("func NewServer("));
//! # Ok::<(), foggo::FoggoError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod parser;
pub mod writer;

pub use error::FoggoError;
pub use generator::{GenerationMode, Generator, OptionStyle, RenderStrategy};
pub use parser::{collect_fields, parse_package_info, ExclusionMarker, FieldDescriptor, PackageInfo};
