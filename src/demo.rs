//! The example application behind `glfw-demo`.
//!
//! Opens one window, routes its events through an [`EventQueue`] and echoes the
//! last key and the cursor position into the title. Nothing is drawn; with a
//! client API the buffers are still swapped so the compositor sees frames.

use std::time::Duration;

use crate::config::WindowConfig;
use crate::error::Result;
use crate::events::{EventQueue, WindowEvent};
use crate::glfw::Glfw;
use crate::handle::Window;
use crate::input::{Button, Controller, InputState};
use crate::types::{Action, ClientApi, Key};

/// Runs the event loop for one window.
pub struct DemoApp<'a> {
    glfw: &'a Glfw,
    window: Window,
    events: EventQueue,
    input: InputState,
    base_title: String,
    title: String,
    swap: bool,
    last_key: Option<Key>,
    frame_count: u64,
}

impl<'a> DemoApp<'a> {
    /// Creates the configured window and attaches an event queue to it.
    pub fn new(glfw: &'a Glfw, config: &WindowConfig) -> Result<Self> {
        let window = glfw.create_window_from_config(config)?;
        let events = EventQueue::new();
        if let Err(e) = events.attach(glfw, window) {
            glfw.destroy_window(window).ok();
            return Err(e);
        }

        log::info!("opened {}x{} window {:?}", config.width, config.height, config.title);
        Ok(Self {
            glfw,
            window,
            events,
            input: InputState::new(),
            base_title: config.title.clone(),
            title: config.title.clone(),
            swap: config.client_api != ClientApi::NoApi,
            last_key: None,
            frame_count: 0,
        })
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Blocks for events (or until `timeout`), handles them and presents one frame.
    /// Returns whether the window should stay open.
    pub fn step(&mut self, timeout: Option<Duration>) -> Result<bool> {
        match timeout {
            Some(timeout) => self.glfw.wait_events_timeout(timeout)?,
            None => self.glfw.wait_events()?,
        }

        for (_, event) in self.events.drain() {
            self.handle_event(&event)?;
        }
        self.present()?;
        self.input.reset_deltas();

        Ok(!self.glfw.window_should_close(self.window)?)
    }

    /// Steps until the window is asked to close.
    pub fn run(&mut self, timeout: Option<Duration>) -> Result<()> {
        while self.step(timeout)? {}
        log::info!("window closed after {} frame(s)", self.frame_count);
        Ok(())
    }

    /// Destroys the window and every closure feeding the queue.
    pub fn close(self) -> Result<()> {
        self.glfw.destroy_window(self.window)
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Result<()> {
        self.input.process_event(event);

        match event {
            WindowEvent::Key(Key::Escape | Key::Enter | Key::KpEnter, _, Action::Press, _) => {
                log::debug!("close requested from keyboard");
                self.glfw.set_window_should_close(self.window, true)?;
            }
            WindowEvent::Key(key, _, Action::Press, _) => self.last_key = Some(*key),
            WindowEvent::FramebufferSize(width, height) => {
                log::debug!("framebuffer resized to {}x{}", width, height);
            }
            WindowEvent::FileDrop(paths) => {
                for path in paths {
                    log::info!("dropped {}", path.display());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frame_count += 1;

        let title = self.status_title();
        if title != self.title {
            self.glfw.set_window_title(self.window, &title)?;
            self.title = title;
        }

        if self.swap {
            self.glfw.swap_buffers(self.window)?;
        }
        Ok(())
    }

    fn status_title(&self) -> String {
        let mut title = self.base_title.clone();
        if let Some(key) = self.last_key {
            title.push_str(&format!(" | key {:?}", key));
        }
        if let Some(pos) = self.input.mouse_position() {
            title.push_str(&format!(" | cursor {:.0},{:.0}", pos.x, pos.y));
        }
        let held = self
            .input
            .get_down_keys()
            .iter()
            .filter(|button| matches!(button, Button::Mouse(_)))
            .count();
        if held > 0 {
            title.push_str(&format!(" | {} button(s)", held));
        }
        title
    }
}

/// One line per connected monitor, each followed by its video modes.
pub fn describe_monitors(glfw: &Glfw) -> Result<Vec<String>> {
    let primary = glfw.primary_monitor()?;
    let mut lines = Vec::new();

    for monitor in glfw.monitors()? {
        let name = glfw.monitor_name(monitor)?;
        let (x, y) = glfw.monitor_pos(monitor)?;
        let (width_mm, height_mm) = glfw.monitor_physical_size(monitor)?;
        let marker = if Some(monitor) == primary { " (primary)" } else { "" };
        lines.push(format!("{}{} at {},{} [{}x{} mm]", name, marker, x, y, width_mm, height_mm));

        let current = glfw.video_mode(monitor)?;
        for mode in glfw.video_modes(monitor)? {
            let marker = if Some(mode) == current { " *" } else { "" };
            lines.push(format!("    {}{}", mode, marker));
        }
    }
    Ok(lines)
}

