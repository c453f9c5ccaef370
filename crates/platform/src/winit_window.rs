//! Desktop window using winit.
//!
//! The event loop is pumped with a zero timeout from [`WinitSurface::poll_events`]
//! instead of being handed control via `run_app`, so the caller keeps its own
//! render loop.

use std::time::Duration;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use framekit_core::{Error, Result};

use crate::surface::WindowSurface;

/// State driven by the event loop during a pump.
struct WindowState {
    attributes: WindowAttributes,
    window: Option<Window>,
    width: u32,
    height: u32,
    pending_resize: Option<(u32, u32)>,
    close_requested: bool,
    creation_error: Option<Error>,
    listener: Option<Box<dyn FnMut(&WindowEvent)>>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                self.width = size.width;
                self.height = size.height;
                info!("Window created: {}x{}", size.width, size.height);
                self.window = Some(window);
            }
            Err(e) => {
                error!("Failed to create window: {}", e);
                self.creation_error = Some(Error::Window(e.to_string()));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                debug!("Window resized: {}x{}", size.width, size.height);
                self.width = size.width;
                self.height = size.height;
                self.pending_resize = Some((size.width, size.height));
            }
            _ => {}
        }
    }
}

/// A native window driven by a pumped winit event loop.
pub struct WinitSurface {
    event_loop: EventLoop<()>,
    state: WindowState,
}

impl WinitSurface {
    /// Opens a resizable window with the given title and client size.
    ///
    /// The event loop is pumped once so the window exists when this returns.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let event_loop = EventLoop::new().map_err(|e| Error::EventLoop(e.to_string()))?;

        let attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(true);

        let mut surface = Self {
            event_loop,
            state: WindowState {
                attributes,
                window: None,
                width,
                height,
                pending_resize: None,
                close_requested: false,
                creation_error: None,
                listener: None,
            },
        };

        surface.pump();
        if let Some(e) = surface.state.creation_error.take() {
            return Err(e);
        }
        if surface.state.window.is_none() {
            return Err(Error::Window("Event loop did not resume".to_string()));
        }

        Ok(surface)
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);
        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with code {}", code);
            self.state.close_requested = true;
        }
    }
}

impl WindowSurface for WinitSurface {
    type Event = WindowEvent;

    fn size(&self) -> (u32, u32) {
        (self.state.width, self.state.height)
    }

    fn poll_events(&mut self) -> bool {
        if !self.state.close_requested {
            self.pump();
        }
        !self.state.close_requested
    }

    fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.state.pending_resize.take()
    }

    fn set_event_listener(&mut self, listener: Box<dyn FnMut(&WindowEvent)>) {
        self.state.listener = Some(listener);
    }
}

impl HasWindowHandle for WinitSurface {
    fn window_handle(&self) -> std::result::Result<WindowHandle<'_>, HandleError> {
        match &self.state.window {
            Some(window) => window.window_handle(),
            None => Err(HandleError::Unavailable),
        }
    }
}

impl HasDisplayHandle for WinitSurface {
    fn display_handle(&self) -> std::result::Result<DisplayHandle<'_>, HandleError> {
        self.event_loop.display_handle()
    }
}
