#![warn(missing_docs)]

//! Vector path interpretation for the vessel profile kernel.
//!
//! Turns an SVG-style path command string (`M`, `L`, `H`, `V`, `Q`, `T`,
//! `C`, `S`, `A`, `Z` and their relative forms) into a flat vertex
//! sequence. Curves and arcs are expanded with adaptive sampling.
//!
//! # Example
//!
//! ```
//! use vessel_path::{interpret, PipelineConfig};
//!
//! let result = interpret("M0,0 L50,0 L50,100 L0,100 Z", &PipelineConfig::default());
//! assert_eq!(result.vertices.len(), 5);
//! assert!(!result.truncated);
//! ```

pub mod arc;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod sample;

pub use arc::{endpoint_to_center, CenterArc};
pub use config::{PipelineConfig, SampleBounds};
pub use error::{PathError, Result};
pub use interpreter::{interpret, Interpretation, PathInterpreter};
pub use lexer::{tokenize_path, Lexer, Token};
