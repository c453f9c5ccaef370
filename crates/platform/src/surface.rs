//! The window capability consumed by the render loop.

/// A platform window (or a stand-in for one) that owns the render target size.
///
/// Implementations are picked at build time; the renderer core only ever
/// talks to this trait.
pub trait WindowSurface {
    /// Platform event type handed to the registered listener.
    type Event;

    /// Current client-area size in pixels.
    fn size(&self) -> (u32, u32);

    /// Pumps pending platform events once without blocking.
    ///
    /// Returns `false` exactly when a close request was observed, which tells
    /// the caller to leave its render loop.
    fn poll_events(&mut self) -> bool;

    /// Returns the most recent size change since the last call, if any.
    ///
    /// Several resizes between two calls collapse into the last one.
    fn take_resize(&mut self) -> Option<(u32, u32)>;

    /// Registers a callback that sees every platform event during
    /// [`poll_events`](Self::poll_events). Replaces any previous listener.
    fn set_event_listener(&mut self, listener: Box<dyn FnMut(&Self::Event)>);
}
