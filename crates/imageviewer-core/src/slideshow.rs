//! Timed playlist of images.
//!
//! The slideshow owns no timer. A shell calls [`Slideshow::start`], shows the
//! returned image, then calls [`Slideshow::advance`] every
//! [`Slideshow::interval`] until it returns `None`. The show is complete as
//! soon as the last image is on display; at that point the playlist is empty
//! and only the image on display remains.

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Status while a show is running.
pub const SLIDESHOW_LOADED: &str = "Slide Show Loaded";
/// Status once the last image is on display.
pub const SLIDESHOW_COMPLETE: &str = "Slide Show Complete!";

#[derive(Debug, Clone)]
pub struct Slideshow {
    /// Images not yet shown, in display order.
    queue: VecDeque<PixelBuffer>,
    showing: Option<PixelBuffer>,
    /// 1-based number of the image on display.
    shown: usize,
    interval: Duration,
    complete: bool,
}

impl Slideshow {
    /// Empty slideshow showing each image for `interval`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidInterval` for a zero interval.
    pub fn new(interval: Duration) -> Result<Self, EditError> {
        if interval.is_zero() {
            return Err(EditError::InvalidInterval);
        }
        Ok(Self {
            queue: VecDeque::new(),
            showing: None,
            shown: 0,
            interval,
            complete: false,
        })
    }

    pub fn from_seconds(seconds: u64) -> Result<Self, EditError> {
        Self::new(Duration::from_secs(seconds))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Append an image to the playlist.
    pub fn add(&mut self, slide: PixelBuffer) {
        self.queue.push_back(slide);
        self.complete = false;
    }

    /// Number of images waiting to be shown.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Show the first queued image and restart the image count.
    ///
    /// # Returns
    ///
    /// The image to display. With a single queued image the show is already
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns `EditError::EmptySlideshow` if no images are queued.
    pub fn start(&mut self) -> Result<&PixelBuffer, EditError> {
        if self.queue.is_empty() {
            return Err(EditError::EmptySlideshow);
        }
        debug!("slideshow start: {} slides", self.queue.len());
        self.shown = 0;
        self.complete = false;
        self.show_next().ok_or(EditError::EmptySlideshow)
    }

    /// Move to the next image.
    ///
    /// Returns `None` if the show was never started or is already complete.
    pub fn advance(&mut self) -> Option<&PixelBuffer> {
        if self.showing.is_none() || self.complete {
            return None;
        }
        self.show_next()
    }

    fn show_next(&mut self) -> Option<&PixelBuffer> {
        let slide = self.queue.pop_front()?;
        self.shown += 1;
        if self.queue.is_empty() {
            debug!("slideshow complete after {} slides", self.shown);
            self.complete = true;
        }
        Some(&*self.showing.insert(slide))
    }

    /// The image currently on display.
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.showing.as_ref()
    }

    /// Label for the image on display, e.g. `"Image 2 displaying"`.
    pub fn position_label(&self) -> Option<String> {
        self.showing
            .as_ref()
            .map(|_| format!("Image {} displaying", self.shown))
    }

    /// `"Slide Show Loaded"` while running, `"Slide Show Complete!"` once the
    /// last image is up, `None` before the first start.
    pub fn status(&self) -> Option<&'static str> {
        match (&self.showing, self.complete) {
            (None, _) => None,
            (Some(_), false) => Some(SLIDESHOW_LOADED),
            (Some(_), true) => Some(SLIDESHOW_COMPLETE),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
