//! folio CLI - Command-line interface library
//!
//! # Library Usage
//!
//! ```ignore
//! use folio_cli::{build_command, inspect_report};
//!
//! build_command(&input, &output, None)?;
//! let report = inspect_report(&input, None)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Publish the manuscript into docs/
//! folio build Ocean_From_Motion.docx --output docs
//!
//! # Check where the section anchors fall in a new revision
//! folio inspect Ocean_From_Motion.docx --format json
//! ```

pub mod app;

pub use app::{build_command, init_tracing, inspect_command, inspect_report, load_config};
pub use app::{run_cli, InspectReport, OutputFormat, SectionReport};
