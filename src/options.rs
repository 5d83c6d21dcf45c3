//! Per-call display settings shared by reports and plots.

/// Number format used when the caller does not pick one.
pub const DEFAULT_FORMAT: &str = "8.6e";

/// Settings for a single report or plot call.
///
/// Options are built fresh for each call and never stored by the library.
///
/// # Examples
///
/// ```
/// use sectionx::DisplayOptions;
///
/// let options = DisplayOptions::new().with_pause(false).with_title("Mesh");
/// assert!(!options.pause);
/// assert_eq!(options.title, "Mesh");
/// assert_eq!(options.fmt, "8.6e");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Block until the plot window is dismissed.
    pub pause: bool,
    /// Title given to the plot.
    pub title: String,
    /// Number format applied to every reported value.
    pub fmt: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            pause: true,
            title: String::new(),
            fmt: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl DisplayOptions {
    /// Options with blocking display, no title and the default number format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether plots block until dismissed.
    #[must_use]
    pub fn with_pause(mut self, pause: bool) -> Self {
        self.pause = pause;
        self
    }

    /// Set the plot title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the number format.
    #[must_use]
    pub fn with_format(mut self, fmt: impl Into<String>) -> Self {
        self.fmt = fmt.into();
        self
    }
}
