#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod canvas;
mod errors;
mod format;
mod options;
mod report;
mod results;

pub use canvas::{
    finish, setup, Canvas, CanvasEvent, CloseHandle, HeadlessCanvas, Plot, FLUSH_PAUSE,
};
pub use errors::{CanvasError, FormatSpecError, LoadError, ReportError};
pub use format::NumberFormat;
pub use options::{DisplayOptions, DEFAULT_FORMAT};
pub use report::{canonical_labels, print_results, render_results, write_results, HEADING};
pub use results::{ResultsSource, SectionProperties};
