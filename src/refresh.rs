use serde::{Deserialize, Serialize};

/// What the tool has to do after an edit was applied to the model.
///
/// Ordered by cost, so two signals can be merged with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Refresh {
    /// Edit refused or without visible effect.
    #[default]
    None,
    /// Chart-only redraw; the editing UI keeps its shape.
    Redraw,
    /// Tear down and rebuild the dataset editors, then redraw.
    RebuildDatasets,
    /// Rebuild the whole settings panel, then redraw.
    RebuildPanel,
}

impl Refresh {
    pub fn needs_redraw(self) -> bool {
        self != Refresh::None
    }

    pub fn is_structural(self) -> bool {
        matches!(self, Refresh::RebuildDatasets | Refresh::RebuildPanel)
    }

    pub fn merge(self, other: Refresh) -> Refresh {
        self.max(other)
    }
}
