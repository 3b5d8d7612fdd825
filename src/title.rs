//! Click-to-edit chart title overlay.

use serde::{Deserialize, Serialize};

use crate::models::ChartConfig;
use crate::refresh::Refresh;

pub const OVERLAY_HEIGHT_PX: u32 = 60;
pub const OVERLAY_HINT: &str = "Click to edit title";
pub const TITLE_PLACEHOLDER: &str = "Enter chart title...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TitleEvent {
    Click,
    Input { text: String },
    Enter,
    Blur,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TitleEditor {
    #[default]
    Closed,
    Editing { draft: String },
}

impl TitleEditor {
    pub fn is_editing(&self) -> bool {
        matches!(self, TitleEditor::Editing { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            TitleEditor::Editing { draft } => Some(draft),
            TitleEditor::Closed => None,
        }
    }

    pub fn handle(&mut self, config: &mut ChartConfig, event: &TitleEvent) -> Refresh {
        match (std::mem::take(self), event) {
            (TitleEditor::Closed, TitleEvent::Click) => {
                *self = TitleEditor::Editing {
                    draft: config.title.clone(),
                };
                Refresh::None
            }
            (TitleEditor::Editing { .. }, TitleEvent::Input { text }) => {
                *self = TitleEditor::Editing {
                    draft: text.clone(),
                };
                Refresh::None
            }
            (TitleEditor::Editing { draft }, TitleEvent::Enter | TitleEvent::Blur) => {
                config.title = draft.trim().to_string();
                log::debug!("title set to {:?}", config.title);
                Refresh::Redraw
            }
            (TitleEditor::Editing { .. }, TitleEvent::Escape) => Refresh::None,
            (state, _) => {
                *self = state;
                Refresh::None
            }
        }
    }
}
