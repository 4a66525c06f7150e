//! Event system - keyboard, mouse, and terminal events

use crate::layout::Rect;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab,
    Enter,
    Backspace,
    Esc,
    Null,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What the mouse did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Press(MouseButton),
    /// Movement with a button held
    Drag,
    Release,
    ScrollUp,
    ScrollDown,
}

/// Mouse event at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub col: u16,
    pub row: u16,
}

impl MouseEvent {
    pub fn new(kind: MouseKind, col: u16, row: u16) -> Self {
        MouseEvent { kind, col, row }
    }

    /// Left-button press
    pub fn click(col: u16, row: u16) -> Self {
        Self::new(MouseKind::Press(MouseButton::Left), col, row)
    }

    /// Drag to a cell
    pub fn drag(col: u16, row: u16) -> Self {
        Self::new(MouseKind::Drag, col, row)
    }

    pub fn is_within(&self, area: Rect) -> bool {
        area.contains(self.col, self.row)
    }
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
}

impl Event {
    /// Left click landing inside `area`
    pub fn is_click_in(&self, area: Rect) -> bool {
        matches!(
            self,
            Event::Mouse(m) if m.kind == MouseKind::Press(MouseButton::Left) && m.is_within(area)
        )
    }

    /// Left click or drag landing inside `area`
    pub fn is_press_or_drag_in(&self, area: Rect) -> bool {
        matches!(
            self,
            Event::Mouse(m)
                if matches!(m.kind, MouseKind::Press(MouseButton::Left) | MouseKind::Drag)
                    && m.is_within(area)
        )
    }

    /// Enter or Space
    pub fn is_activate_key(&self) -> bool {
        matches!(self, Event::Key(Key::Enter) | Event::Key(Key::Char(' ')))
    }
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when the component gains keyboard focus
    fn on_focus(&mut self) {}

    /// Called when the component loses keyboard focus
    fn on_blur(&mut self) {}
}

#[cfg(feature = "tui")]
pub use poller::EventPoller;

#[cfg(feature = "tui")]
mod poller {
    use super::{Event, Key, MouseButton, MouseEvent, MouseKind};
    use anyhow::Result;
    use std::time::Duration;

    /// Reads terminal input through crossterm; restores the terminal on drop
    pub struct EventPoller {
        _enabled: bool,
    }

    impl EventPoller {
        /// Enable raw mode and mouse capture
        pub fn new() -> Result<Self> {
            crossterm::terminal::enable_raw_mode()?;

            // Mouse and focus reporting are optional extras
            if let Err(err) = crossterm::execute!(
                std::io::stdout(),
                crossterm::event::EnableMouseCapture,
                crossterm::event::EnableFocusChange,
            ) {
                tracing::warn!(error = %err, "mouse capture unavailable");
            }

            Ok(EventPoller { _enabled: true })
        }

        /// Wait up to `timeout` for an event
        pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
            if crossterm::event::poll(timeout)? {
                Ok(convert_event(crossterm::event::read()?))
            } else {
                Ok(None)
            }
        }
    }

    impl Drop for EventPoller {
        fn drop(&mut self) {
            let _ = crossterm::execute!(
                std::io::stdout(),
                crossterm::event::DisableMouseCapture,
                crossterm::event::DisableFocusChange,
            );
            let _ = crossterm::terminal::disable_raw_mode();
        }
    }

    /// Convert a crossterm event; key releases and plain mouse moves are dropped
    fn convert_event(event: crossterm::event::Event) -> Option<Event> {
        use crossterm::event::{Event as CEvent, KeyEventKind, MouseEventKind};

        match event {
            CEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Some(Event::Key(convert_key(key.code, key.modifiers)))
            }
            CEvent::Key(_) => None,
            CEvent::Mouse(me) => {
                let kind = match me.kind {
                    MouseEventKind::Down(btn) => MouseKind::Press(convert_button(btn)),
                    MouseEventKind::Up(_) => MouseKind::Release,
                    MouseEventKind::Drag(_) => MouseKind::Drag,
                    MouseEventKind::ScrollUp => MouseKind::ScrollUp,
                    MouseEventKind::ScrollDown => MouseKind::ScrollDown,
                    _ => return None,
                };
                Some(Event::Mouse(MouseEvent::new(kind, me.column, me.row)))
            }
            CEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
            CEvent::FocusGained => Some(Event::FocusGained),
            CEvent::FocusLost => Some(Event::FocusLost),
            CEvent::Paste(data) => Some(Event::Paste(data)),
        }
    }

    fn convert_button(button: crossterm::event::MouseButton) -> MouseButton {
        match button {
            crossterm::event::MouseButton::Left => MouseButton::Left,
            crossterm::event::MouseButton::Right => MouseButton::Right,
            crossterm::event::MouseButton::Middle => MouseButton::Middle,
        }
    }

    fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
        use crossterm::event::{KeyCode, KeyModifiers};

        if mods.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(c) = code {
                return Key::Ctrl(c);
            }
        }

        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Esc,
            _ => Key::Null,
        }
    }

}
