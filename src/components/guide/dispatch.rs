//! Maps an activated cell to its semantic action

use tracing::debug;

use crate::focus::Coord;
use crate::overlay::DialogPayload;

use super::model::CellRef;

/// Semantic result of activating a grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Open the channel-details dialog; no selection change
    ShowChannelDetails(DialogPayload),
    /// Tune to the channel on this row (the widget applies it only when
    /// the row differs from the current selection)
    Tune { row: usize },
    /// Open the program-details dialog
    ShowProgramDetails(DialogPayload),
}

/// Stateless cell-activation mapping
///
/// Total over all valid coordinates: the focus coordinator clamps before a
/// cell can ever be activated, so there is no error path here. Column 0 is
/// the channel cell, column 1 is "now" (tune), columns 2 and up are future
/// programs.
pub struct ActivationDispatcher;

impl ActivationDispatcher {
    pub fn dispatch(coord: Coord, cell: CellRef<'_>) -> Activation {
        match cell {
            CellRef::ChannelHeader(channel) => {
                debug!(row = coord.row, channel = %channel.name, "activate: channel details");
                Activation::ShowChannelDetails(DialogPayload::new(
                    format!("Channel details: {}", channel.name),
                    format!("Placeholder details view for {}.", channel.name),
                ))
            }
            CellRef::Program { .. } if coord.col == 1 => {
                debug!(row = coord.row, "activate: tune");
                Activation::Tune { row: coord.row }
            }
            CellRef::Program { channel, program } => {
                debug!(row = coord.row, col = coord.col, program = %program.title, "activate: program details");
                Activation::ShowProgramDetails(DialogPayload::new(
                    "Program details",
                    format!(
                        "{} — {}. {}. {}",
                        channel.name, program.title, program.meta, program.time_text
                    ),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::demo_grid;
    use super::*;

    #[test]
    fn test_channel_cell_opens_details() {
        let grid = demo_grid();
        let coord = Coord::new(0, 0);
        let cell = grid.cell_at(0, 0).unwrap();

        match ActivationDispatcher::dispatch(coord, cell) {
            Activation::ShowChannelDetails(payload) => {
                assert_eq!(payload.title, "Channel details: News 24");
                assert!(payload.body.contains("News 24"));
            }
            other => panic!("expected channel details, got {:?}", other),
        }
    }

    #[test]
    fn test_now_cell_tunes() {
        let grid = demo_grid();
        let cell = grid.cell_at(3, 1).unwrap();

        assert_eq!(
            ActivationDispatcher::dispatch(Coord::new(3, 1), cell),
            Activation::Tune { row: 3 }
        );
    }

    #[test]
    fn test_future_cell_opens_program_details() {
        let grid = demo_grid();
        let cell = grid.cell_at(1, 3).unwrap();

        match ActivationDispatcher::dispatch(Coord::new(1, 3), cell) {
            Activation::ShowProgramDetails(payload) => {
                assert_eq!(payload.title, "Program details");
                assert_eq!(
                    payload.body,
                    "Action Max — Rapid Response. TV-14 · Series. 4:30–5:00 PM"
                );
            }
            other => panic!("expected program details, got {:?}", other),
        }
    }
}
