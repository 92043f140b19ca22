//! Fog of war: what one side is allowed to see of the board.

use super::engine::Engine;
use crate::core::{Owner, Position};
use crate::units::Unit;

/// One occupied cell as seen by a viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView<'a> {
    /// The viewer's own unit, fully visible.
    Own(&'a Unit),
    /// An enemy unit whose identity has been revealed.
    Revealed(&'a Unit),
    /// An enemy unit of unknown type.
    Hidden { owner: Owner },
}

impl CellView<'_> {
    #[must_use]
    pub fn owner(&self) -> Owner {
        match self {
            CellView::Own(unit) | CellView::Revealed(unit) => unit.owner,
            CellView::Hidden { owner } => *owner,
        }
    }

    /// Board symbol for the cell, `?` when hidden.
    #[must_use]
    pub fn symbol(&self) -> char {
        match self {
            CellView::Own(unit) | CellView::Revealed(unit) => unit.unit_type.symbol(),
            CellView::Hidden { .. } => '?',
        }
    }
}

impl Engine {
    /// Every occupied cell as `viewer` sees it, in row-major order.
    ///
    /// Stealthed enemies stay hidden even after being revealed.
    #[must_use]
    pub fn view_for(&self, viewer: Owner) -> Vec<(Position, CellView<'_>)> {
        let mut cells: Vec<(Position, CellView<'_>)> = self
            .board
            .iter()
            .map(|(pos, unit)| {
                let view = if unit.owner == viewer {
                    CellView::Own(unit)
                } else if unit.is_revealed && !unit.stealth_active {
                    CellView::Revealed(unit)
                } else {
                    CellView::Hidden { owner: unit.owner }
                };
                (pos, view)
            })
            .collect();
        cells.sort_unstable_by_key(|&(pos, _)| pos);
        cells
    }
}
