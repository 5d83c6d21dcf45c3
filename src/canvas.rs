//! Lifecycle of a plotting surface.
//!
//! Drawing code never talks to a global figure. The caller hands a
//! [`Canvas`] to [`setup`], draws into it, then hands it to [`finish`]. In
//! blocking mode `finish` waits until the window is dismissed; otherwise it
//! redraws, yields for [`FLUSH_PAUSE`] and returns.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, trace};

use crate::errors::CanvasError;
use crate::options::DisplayOptions;

/// Pause used after a non-blocking redraw so the backend can flush.
pub const FLUSH_PAUSE: Duration = Duration::from_millis(1);

/// Display operations a plotting backend must provide.
///
/// Backend failures are returned as the backend's own error type and are
/// passed to the caller untouched.
pub trait Canvas {
    /// Error produced by the backend.
    type Error;

    /// Constrain the axes to equal x/y scaling.
    fn set_equal_aspect(&mut self) -> Result<(), Self::Error>;
    /// Set the title shown above the plot.
    fn set_title(&mut self, title: &str) -> Result<(), Self::Error>;
    /// Switch immediate-update mode on or off.
    fn set_interactive(&mut self, interactive: bool) -> Result<(), Self::Error>;
    /// Make the surface visible.
    fn show(&mut self) -> Result<(), Self::Error>;
    /// Force pending drawing to be rendered now.
    fn redraw(&mut self) -> Result<(), Self::Error>;
    /// Yield to the backend event loop for `duration`.
    fn pause(&mut self, duration: Duration) -> Result<(), Self::Error>;
    /// Block until the user dismisses the surface.
    fn wait_until_closed(&mut self) -> Result<(), Self::Error>;
}

/// Prepare `canvas` for drawing.
///
/// Non-blocking sessions switch to interactive mode and show the surface
/// straight away so later drawing appears incrementally. Both modes use equal
/// aspect.
pub fn setup<C: Canvas + ?Sized>(canvas: &mut C, blocking: bool) -> Result<(), C::Error> {
    debug!(blocking, "setting up canvas");
    if !blocking {
        canvas.set_interactive(true)?;
        canvas.show()?;
    }
    canvas.set_equal_aspect()
}

/// Title `canvas` and hand control back to the user.
///
/// The title is always set, even when empty. Blocking sessions return only
/// once the surface has been dismissed.
pub fn finish<C: Canvas + ?Sized>(
    canvas: &mut C,
    blocking: bool,
    title: &str,
) -> Result<(), C::Error> {
    debug!(blocking, title, "finishing canvas");
    canvas.set_title(title)?;
    if blocking {
        canvas.wait_until_closed()
    } else {
        canvas.redraw()?;
        canvas.pause(FLUSH_PAUSE)
    }
}

/// A drawing session bracketed by [`setup`] and [`finish`].
///
/// The session borrows the canvas; it is never owned here.
///
/// # Examples
///
/// ```
/// use sectionx::{DisplayOptions, HeadlessCanvas, Plot};
///
/// let (mut canvas, _close) = HeadlessCanvas::new();
/// let options = DisplayOptions::new().with_pause(false).with_title("Geometry");
/// let plot = Plot::begin(&mut canvas, &options).expect("setup succeeds");
/// plot.end().expect("finish succeeds");
/// assert_eq!(canvas.title(), "Geometry");
/// ```
pub struct Plot<'a, C: Canvas + ?Sized> {
    /// Borrowed surface.
    canvas: &'a mut C,
    /// Mode chosen at [`Plot::begin`].
    blocking: bool,
    /// Title applied by [`Plot::end`].
    title: String,
}

impl<'a, C: Canvas + ?Sized> Plot<'a, C> {
    /// Run [`setup`] on `canvas` with the mode and title from `options`.
    pub fn begin(canvas: &'a mut C, options: &DisplayOptions) -> Result<Self, C::Error> {
        setup(canvas, options.pause)?;
        Ok(Self {
            canvas,
            blocking: options.pause,
            title: options.title.clone(),
        })
    }

    /// The surface to draw into.
    pub fn canvas(&mut self) -> &mut C {
        &mut *self.canvas
    }

    /// Run [`finish`], blocking if the session was opened with `pause`.
    pub fn end(self) -> Result<(), C::Error> {
        finish(self.canvas, self.blocking, &self.title)
    }
}

/// A backend operation recorded by [`HeadlessCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    /// Equal aspect was requested.
    EqualAspect,
    /// The title was set.
    Title(String),
    /// Interactive mode was switched.
    Interactive(bool),
    /// The surface was shown.
    Show,
    /// A redraw was forced.
    Redraw,
    /// The event loop was given time.
    Pause(Duration),
    /// A blocking wait started.
    WaitForClose,
    /// The surface was dismissed.
    Closed,
}

/// Dismisses a [`HeadlessCanvas`] from any thread.
#[derive(Clone, Debug)]
pub struct CloseHandle {
    /// Sending half of the canvas close channel.
    sender: Sender<()>,
}

impl CloseHandle {
    /// Deliver a "window closed" event. Returns `false` if the canvas is gone.
    pub fn close(&self) -> bool {
        self.sender.send(()).is_ok()
    }
}

/// In-memory canvas that records every operation.
///
/// Useful for scripted runs without a display and for exercising drawing code
/// in tests. A blocking wait returns once a [`CloseHandle`] fires.
#[derive(Debug)]
pub struct HeadlessCanvas {
    /// Operations in the order they were requested.
    events: Vec<CanvasEvent>,
    /// Current title.
    title: String,
    /// Equal aspect applied.
    equal_aspect: bool,
    /// Immediate-update mode.
    interactive: bool,
    /// Surface shown and not yet dismissed.
    visible: bool,
    /// Receives close events from every [`CloseHandle`].
    closed: Receiver<()>,
}

impl HeadlessCanvas {
    /// Create a canvas together with the handle that dismisses it.
    pub fn new() -> (Self, CloseHandle) {
        let (sender, closed) = mpsc::channel();
        let canvas = Self {
            events: Vec::new(),
            title: String::new(),
            equal_aspect: false,
            interactive: false,
            visible: false,
            closed,
        };
        (canvas, CloseHandle { sender })
    }

    /// Every backend operation so far, oldest first.
    pub fn events(&self) -> &[CanvasEvent] {
        &self.events
    }

    /// Current title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether equal aspect has been applied.
    pub fn has_equal_aspect(&self) -> bool {
        self.equal_aspect
    }

    /// Whether immediate-update mode is on.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether the surface is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Log and store a backend operation.
    fn record(&mut self, event: CanvasEvent) {
        trace!(?event, "headless canvas");
        self.events.push(event);
    }
}

impl Canvas for HeadlessCanvas {
    type Error = CanvasError;

    fn set_equal_aspect(&mut self) -> Result<(), CanvasError> {
        self.equal_aspect = true;
        self.record(CanvasEvent::EqualAspect);
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), CanvasError> {
        self.title = title.to_string();
        self.record(CanvasEvent::Title(title.to_string()));
        Ok(())
    }

    fn set_interactive(&mut self, interactive: bool) -> Result<(), CanvasError> {
        self.interactive = interactive;
        self.record(CanvasEvent::Interactive(interactive));
        Ok(())
    }

    fn show(&mut self) -> Result<(), CanvasError> {
        self.visible = true;
        self.record(CanvasEvent::Show);
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), CanvasError> {
        self.record(CanvasEvent::Redraw);
        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> Result<(), CanvasError> {
        self.record(CanvasEvent::Pause(duration));
        std::thread::sleep(duration);
        Ok(())
    }

    fn wait_until_closed(&mut self) -> Result<(), CanvasError> {
        self.visible = true;
        self.record(CanvasEvent::WaitForClose);
        self.closed.recv().map_err(|_| CanvasError::Disconnected)?;
        self.visible = false;
        self.record(CanvasEvent::Closed);
        Ok(())
    }
}
