//! # Generator Module
//!
//! Renders "Functional Option Pattern" code for a Go struct from the field
//! descriptors produced by [`crate::parser`].
//!
//! ## Overview
//!
//! Generation runs in three steps:
//!
//! ```text
//! FieldDescriptors → Validation → Template Rendering → Formatting → Go source
//! ```
//!
//! 1. **Validation** - Two included fields whose names differ only in case
//!    would both produce `With<Name>`, so the request is rejected before
//!    anything is rendered
//! 2. **Template Rendering** - One of four Askama templates is selected by
//!    [`RenderStrategy`]
//! 3. **Formatting** - The output is piped through a [`Formatter`]
//!    (`goimports` by default) unless formatting is disabled
//!
//! ## Strategies
//!
//! | constructor | style | strategy | template |
//! |---|---|---|---|
//! | yes | closure | [`RenderStrategy::ClosureWithConstructor`] | `fop.go.txt` |
//! | no | closure | [`RenderStrategy::Closure`] | `fop_without_new.go.txt` |
//! | yes | interface | [`RenderStrategy::InterfaceWithConstructor`] | `afop.go.txt` |
//! | no | interface | [`RenderStrategy::Interface`] | `afop_without_new.go.txt` |
//!
//! ## Usage
//!
//! ```rust
//! use foggo::generator::{GenerationMode, Generator};
//! use foggo::parser::FieldDescriptor;
//!
//! let fields = vec![
//!     FieldDescriptor::new("Addr", "string"),
//!     FieldDescriptor::new("conns", "int").excluded(),
//! ];
//! let code = Generator::without_formatting()
//!     .generate("server", "Server", &fields, GenerationMode::default())?;
//! assert!(code.contains("func WithAddr(Addr string) ServerOption {"));
//! assert!(!code.contains("conns"));
//! # Ok::<(), foggo::FoggoError>(())
//! ```

mod format;
mod templates;

pub use format::{CommandFormatter, Formatter, DEFAULT_FORMATTER, FORMATTER_ENV};
pub use templates::{export_name, render, OptionField, GENERATED_HEADER};

use std::collections::HashMap;

use tracing::debug;

use crate::error::FoggoError;
use crate::parser::FieldDescriptor;

/// How each option is represented in the generated code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OptionStyle {
    /// `type <S>Option func(*<S>)`
    #[default]
    Closure,
    /// `type <S>Option interface { apply(*<S>) }` with one type per field
    Interface,
}

/// The two independent switches of a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationMode {
    /// Emit a `New<Struct>` constructor
    pub constructor: bool,
    /// Option representation
    pub style: OptionStyle,
}

impl Default for GenerationMode {
    fn default() -> Self {
        GenerationMode {
            constructor: true,
            style: OptionStyle::Closure,
        }
    }
}

/// The closed set of render strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Closure options and a constructor applying them in order
    ClosureWithConstructor,
    /// Closure options only
    Closure,
    /// Per-field option types and a constructor dispatching through `apply`
    InterfaceWithConstructor,
    /// Per-field option types only
    Interface,
}

impl From<GenerationMode> for RenderStrategy {
    fn from(mode: GenerationMode) -> Self {
        match (mode.constructor, mode.style) {
            (true, OptionStyle::Closure) => RenderStrategy::ClosureWithConstructor,
            (false, OptionStyle::Closure) => RenderStrategy::Closure,
            (true, OptionStyle::Interface) => RenderStrategy::InterfaceWithConstructor,
            (false, OptionStyle::Interface) => RenderStrategy::Interface,
        }
    }
}

impl RenderStrategy {
    pub fn emits_constructor(self) -> bool {
        matches!(
            self,
            RenderStrategy::ClosureWithConstructor | RenderStrategy::InterfaceWithConstructor
        )
    }
}

/// Option code generator
///
/// Holds no state besides whether output is formatted and which formatter
/// does it, so one instance can serve any number of independent requests.
pub struct Generator {
    formatting: bool,
    formatter: Box<dyn Formatter>,
}

impl Default for Generator {
    /// Formatting enabled, using `goimports`
    fn default() -> Self {
        Generator::new(true, CommandFormatter::default())
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("formatting", &self.formatting)
            .finish_non_exhaustive()
    }
}

impl Generator {
    pub fn new(formatting: bool, formatter: impl Formatter + 'static) -> Self {
        Generator {
            formatting,
            formatter: Box::new(formatter),
        }
    }

    /// Generator returning the raw template expansion
    pub fn without_formatting() -> Self {
        Generator::new(false, CommandFormatter::default())
    }

    pub fn formatting(&self) -> bool {
        self.formatting
    }

    /// Validate `fields`, render the strategy selected by `mode`, and format
    /// the result.
    ///
    /// # Errors
    ///
    /// - `FoggoError::DuplicateFieldName` if two included fields collide
    ///   case-insensitively; nothing is rendered
    /// - `FoggoError::Format` if rendering or formatting fails
    pub fn generate(
        &self,
        package_name: &str,
        struct_name: &str,
        fields: &[FieldDescriptor],
        mode: GenerationMode,
    ) -> Result<String, FoggoError> {
        check_field_names(fields)?;
        let strategy = RenderStrategy::from(mode);
        debug!(struct_name, ?strategy, "rendering options");
        let code = render(strategy, package_name, struct_name, fields)?;
        self.format(code)
    }

    /// Closure options with a `New<Struct>` constructor
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_fop(
        &self,
        package_name: &str,
        struct_name: &str,
        fields: &[FieldDescriptor],
    ) -> Result<String, FoggoError> {
        self.generate(package_name, struct_name, fields, GenerationMode::default())
    }

    /// Closure options without a constructor
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_fop_without_new(
        &self,
        package_name: &str,
        struct_name: &str,
        fields: &[FieldDescriptor],
    ) -> Result<String, FoggoError> {
        let mode = GenerationMode {
            constructor: false,
            style: OptionStyle::Closure,
        };
        self.generate(package_name, struct_name, fields, mode)
    }

    fn format(&self, code: String) -> Result<String, FoggoError> {
        if !self.formatting {
            return Ok(code);
        }
        self.formatter.format(&code)
    }
}

/// Reject field lists where two included names are equal ignoring case.
///
/// # Errors
///
/// Returns `FoggoError::DuplicateFieldName` naming the first collision found.
pub fn check_field_names(fields: &[FieldDescriptor]) -> Result<(), FoggoError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for field in fields.iter().filter(|f| !f.excluded) {
        if let Some(first) = seen.insert(field.name.to_lowercase(), &field.name) {
            return Err(FoggoError::DuplicateFieldName {
                first: first.to_string(),
                second: field.name.clone(),
            });
        }
    }
    Ok(())
}
