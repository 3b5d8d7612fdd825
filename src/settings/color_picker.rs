//! Palette popup for per-value colors.
//!
//! The outside-click listener only becomes active one host tick after the
//! popup opens, so the click that opened it does not close it again.

use serde::{Deserialize, Serialize};

use super::events::SettingsEvent;
use crate::palette::Palette;

/// The row whose swatch button opened the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerTarget {
    pub dataset: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    Open { target: PickerTarget, armed: bool },
}

/// Host input for the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PickerEvent {
    Open { dataset: usize, index: usize },
    Tick,
    Pick { color: String },
    ClickOutside,
    ClickTarget,
}

#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    state: PickerState,
}

impl ColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PickerState::Open { .. })
    }

    pub fn target(&self) -> Option<PickerTarget> {
        match self.state {
            PickerState::Open { target, .. } => Some(target),
            PickerState::Closed => None,
        }
    }

    /// Open for `target`, replacing any popup already shown.
    pub fn open(&mut self, target: PickerTarget) {
        self.state = PickerState::Open {
            target,
            armed: false,
        };
    }

    /// Deferred arming of the outside-click listener.
    pub fn tick(&mut self) {
        if let PickerState::Open { armed, .. } = &mut self.state {
            *armed = true;
        }
    }

    /// Choose a swatch; closes the popup and yields the edit to apply.
    pub fn pick(&mut self, color: &str) -> Option<SettingsEvent> {
        let target = self.target()?;
        self.state = PickerState::Closed;
        Some(SettingsEvent::PointColorPicked {
            dataset: target.dataset,
            index: target.index,
            color: color.to_string(),
        })
    }

    /// Returns whether the popup closed.
    pub fn click_outside(&mut self) -> bool {
        match self.state {
            PickerState::Open { armed: true, .. } => {
                self.state = PickerState::Closed;
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.state = PickerState::Closed;
    }

    /// Feed one host event; a pick yields the settings edit.
    pub fn handle(&mut self, event: &PickerEvent) -> Option<SettingsEvent> {
        match event {
            PickerEvent::Open { dataset, index } => {
                self.open(PickerTarget {
                    dataset: *dataset,
                    index: *index,
                });
                None
            }
            PickerEvent::Tick => {
                self.tick();
                None
            }
            PickerEvent::Pick { color } => self.pick(color),
            PickerEvent::ClickOutside => {
                self.click_outside();
                None
            }
            // clicks on the button that opened the popup never close it
            PickerEvent::ClickTarget => None,
        }
    }

    /// Swatches shown in the popup.
    pub fn swatches(palette: &Palette) -> &'static [&'static str] {
        palette.colors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> PickerTarget {
        PickerTarget {
            dataset: 0,
            index: 2,
        }
    }

    #[test]
    fn outside_click_before_tick_keeps_popup() {
        let mut p = ColorPicker::new();
        p.open(target());
        assert!(!p.click_outside());
        assert!(p.is_open());
        p.tick();
        assert!(p.click_outside());
        assert!(!p.is_open());
    }

    #[test]
    fn pick_yields_event_and_closes() {
        let mut p = ColorPicker::new();
        p.open(target());
        let ev = p.pick("#FF6B6B");
        assert_eq!(
            ev,
            Some(SettingsEvent::PointColorPicked {
                dataset: 0,
                index: 2,
                color: "#FF6B6B".into()
            })
        );
        assert_eq!(p.state(), PickerState::Closed);
        assert_eq!(p.pick("#000"), None);
    }

    #[test]
    fn target_click_is_ignored() {
        let mut p = ColorPicker::new();
        p.open(target());
        p.tick();
        assert_eq!(p.handle(&PickerEvent::ClickTarget), None);
        assert_eq!(
            p.state(),
            PickerState::Open {
                target: target(),
                armed: true
            }
        );
    }

    #[test]
    fn reopening_disarms() {
        let mut p = ColorPicker::new();
        p.open(target());
        p.tick();
        p.open(PickerTarget {
            dataset: 1,
            index: 0,
        });
        assert_eq!(
            p.state(),
            PickerState::Open {
                target: PickerTarget {
                    dataset: 1,
                    index: 0
                },
                armed: false
            }
        );
    }
}
