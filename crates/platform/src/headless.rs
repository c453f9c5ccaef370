//! Scripted window used without a display.
//!
//! Events are queued up front and delivered by the next
//! [`poll_events`](WindowSurface::poll_events) call, so a test can reproduce
//! resizes and close requests at exact points of a render loop.

use std::collections::VecDeque;

use tracing::debug;

use crate::surface::WindowSurface;

/// Events understood by [`HeadlessSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadlessEvent {
    /// Client area changed size.
    Resized { width: u32, height: u32 },
    /// The user asked to close the window.
    CloseRequested,
    /// Anything else; passed to the listener untouched.
    Custom(String),
}

/// A window that only exists in memory.
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    queue: VecDeque<HeadlessEvent>,
    pending_resize: Option<(u32, u32)>,
    close_requested: bool,
    listener: Option<Box<dyn FnMut(&HeadlessEvent)>>,
}

impl HeadlessSurface {
    /// Creates a surface of the given size with no queued events.
    pub fn new(width: u32, height: u32) -> Self {
        debug!("Headless surface created: {}x{}", width, height);
        Self {
            width,
            height,
            queue: VecDeque::new(),
            pending_resize: None,
            close_requested: false,
            listener: None,
        }
    }

    /// Queues an event for the next poll.
    pub fn push_event(&mut self, event: HeadlessEvent) {
        self.queue.push_back(event);
    }

    /// Queues a resize for the next poll.
    pub fn push_resize(&mut self, width: u32, height: u32) {
        self.push_event(HeadlessEvent::Resized { width, height });
    }

    /// Queues a close request for the next poll.
    pub fn push_close(&mut self) {
        self.push_event(HeadlessEvent::CloseRequested);
    }

    /// Whether a close request has been delivered.
    #[inline]
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

impl std::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("queued", &self.queue.len())
            .field("close_requested", &self.close_requested)
            .finish_non_exhaustive()
    }
}

impl WindowSurface for HeadlessSurface {
    type Event = HeadlessEvent;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn poll_events(&mut self) -> bool {
        while let Some(event) = self.queue.pop_front() {
            if let Some(listener) = self.listener.as_mut() {
                listener(&event);
            }

            match event {
                HeadlessEvent::Resized { width, height } => {
                    self.width = width;
                    self.height = height;
                    self.pending_resize = Some((width, height));
                }
                HeadlessEvent::CloseRequested => self.close_requested = true,
                HeadlessEvent::Custom(_) => {}
            }
        }

        !self.close_requested
    }

    fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.pending_resize.take()
    }

    fn set_event_listener(&mut self, listener: Box<dyn FnMut(&HeadlessEvent)>) {
        self.listener = Some(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_state() {
        let mut surface = HeadlessSurface::new(1920, 1080);
        assert_eq!(surface.size(), (1920, 1080));
        assert!(surface.poll_events());
        assert_eq!(surface.take_resize(), None);
    }

    #[test]
    fn test_resizes_coalesce() {
        let mut surface = HeadlessSurface::new(1920, 1080);
        surface.push_resize(800, 600);
        surface.push_resize(1024, 768);

        // Not applied before the pump
        assert_eq!(surface.size(), (1920, 1080));

        assert!(surface.poll_events());
        assert_eq!(surface.size(), (1024, 768));
        assert_eq!(surface.take_resize(), Some((1024, 768)));
        assert_eq!(surface.take_resize(), None);
    }

    #[test]
    fn test_close_stops_loop() {
        let mut surface = HeadlessSurface::new(640, 480);
        assert!(surface.poll_events());

        surface.push_close();
        assert!(!surface.poll_events());
        assert!(surface.close_requested());
        // Stays closed
        assert!(!surface.poll_events());
    }

    #[test]
    fn test_listener_sees_every_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut surface = HeadlessSurface::new(640, 480);
        surface.set_event_listener(Box::new(move |event| sink.borrow_mut().push(event.clone())));
        surface.push_event(HeadlessEvent::Custom("key:W".to_string()));
        surface.push_resize(320, 240);
        surface.poll_events();

        assert_eq!(
            *seen.borrow(),
            vec![
                HeadlessEvent::Custom("key:W".to_string()),
                HeadlessEvent::Resized {
                    width: 320,
                    height: 240
                },
            ]
        );
    }
}
