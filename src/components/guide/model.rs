//! Channel/program matrix backing the guide grid
//!
//! Immutable demo data: built once at mount, never mutated. The model is a
//! pure read-only view; all interaction state lives in the widget.

use crate::error::PatternError;

/// One program airing on a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub time_text: String,
}

impl Program {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        meta: impl Into<String>,
        time_text: impl Into<String>,
    ) -> Self {
        Program {
            id: id.into(),
            title: title.into(),
            meta: meta.into(),
            time_text: time_text.into(),
        }
    }
}

/// A channel and its ordered program lineup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub programs: Vec<Program>,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, programs: Vec<Program>) -> Self {
        Channel {
            id: id.into(),
            name: name.into(),
            programs,
        }
    }
}

/// Column header descriptor; the first column is always "Now"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeColumn {
    pub key: String,
    pub label: String,
}

impl TimeColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        TimeColumn {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// What lives at a grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef<'a> {
    /// The row-header (channel) cell at column 0
    ChannelHeader(&'a Channel),
    /// A program cell at column 1 and beyond
    Program {
        channel: &'a Channel,
        program: &'a Program,
    },
}

/// Rectangular channel/program grid
///
/// `row_count`/`col_count` include the header row and row-header column;
/// only the data cells are focusable.
#[derive(Debug, Clone)]
pub struct GridModel {
    channels: Vec<Channel>,
    time_columns: Vec<TimeColumn>,
}

impl GridModel {
    /// Build a model, verifying the grid is rectangular
    pub fn new(channels: Vec<Channel>, time_columns: Vec<TimeColumn>) -> Result<Self, PatternError> {
        let expected = time_columns.len();
        for channel in &channels {
            if channel.programs.len() != expected {
                return Err(PatternError::RaggedChannel {
                    channel: channel.name.clone(),
                    got: channel.programs.len(),
                    expected,
                });
            }
        }
        Ok(GridModel {
            channels,
            time_columns,
        })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn time_columns(&self) -> &[TimeColumn] {
        &self.time_columns
    }

    /// Grid rows including the header row
    pub fn row_count(&self) -> usize {
        self.channels.len() + 1
    }

    /// Grid columns including the row-header column
    pub fn col_count(&self) -> usize {
        self.time_columns.len() + 1
    }

    /// Rows reachable by the roving focus (data rows only)
    pub fn focusable_rows(&self) -> usize {
        self.channels.len()
    }

    /// Columns reachable by the roving focus
    pub fn focusable_cols(&self) -> usize {
        self.time_columns.len() + 1
    }

    /// Look up the cell at a data coordinate
    ///
    /// `row` indexes data rows (header excluded); `col = 0` is the channel
    /// cell, `col >= 1` the program at `col - 1`. Out-of-bounds coordinates
    /// are a typed error; widget callers clamp before calling.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<CellRef<'_>, PatternError> {
        let out_of_range = || PatternError::OutOfRange {
            row,
            col,
            rows: self.focusable_rows(),
            cols: self.focusable_cols(),
        };

        let channel = self.channels.get(row).ok_or_else(out_of_range)?;
        if col == 0 {
            return Ok(CellRef::ChannelHeader(channel));
        }
        let program = channel.programs.get(col - 1).ok_or_else(out_of_range)?;
        Ok(CellRef::Program { channel, program })
    }

    /// The single self-contained accessible name for a cell
    ///
    /// Channel cells announce their name plus a "currently playing" suffix
    /// when tuned; program cells fold the column label, title, meta, and
    /// time text into one string so they never depend on sibling text.
    pub fn cell_accessible_name(
        &self,
        row: usize,
        col: usize,
        selected_row: usize,
    ) -> Result<String, PatternError> {
        match self.cell_at(row, col)? {
            CellRef::ChannelHeader(channel) => {
                if row == selected_row {
                    Ok(format!("{}, currently playing", channel.name))
                } else {
                    Ok(channel.name.clone())
                }
            }
            CellRef::Program { program, .. } => {
                let prefix = if col == 1 {
                    "Now".to_string()
                } else {
                    self.time_columns[col - 1].label.clone()
                };
                Ok(format!(
                    "{}: {}. {}. {}",
                    prefix, program.title, program.meta, program.time_text
                ))
            }
        }
    }
}

/// The guide's stock time columns
pub fn demo_time_columns() -> Vec<TimeColumn> {
    vec![
        TimeColumn::new("now", "Now"),
        TimeColumn::new("t1", "4:00 PM"),
        TimeColumn::new("t2", "4:30 PM"),
        TimeColumn::new("t3", "5:00 PM"),
        TimeColumn::new("t4", "5:30 PM"),
    ]
}

/// The guide's stock channel lineup
pub fn demo_channels() -> Vec<Channel> {
    vec![
        Channel::new(
            "c1",
            "News 24",
            vec![
                Program::new("p11", "Live Headlines", "TV-PG · News", "22m remaining"),
                Program::new("p12", "World Report", "TV-PG · News", "4:00–4:30 PM"),
                Program::new("p13", "City Desk", "TV-PG · News", "4:30–5:00 PM"),
                Program::new("p14", "Markets", "TV-G · Business", "5:00–5:30 PM"),
                Program::new("p15", "Evening Brief", "TV-PG · News", "5:30–6:00 PM"),
            ],
        ),
        Channel::new(
            "c2",
            "Action Max",
            vec![
                Program::new("p21", "Steel Harbor", "PG-13 · Action", "48m remaining"),
                Program::new("p22", "Night Pursuit", "R · Action", "4:00–4:30 PM"),
                Program::new("p23", "Rapid Response", "TV-14 · Series", "4:30–5:00 PM"),
                Program::new("p24", "Streetline", "TV-14 · Series", "5:00–5:30 PM"),
                Program::new("p25", "Afterburn", "TV-14 · Series", "5:30–6:00 PM"),
            ],
        ),
        Channel::new(
            "c3",
            "Comedy Loop",
            vec![
                Program::new("p31", "Lunch Break Laughs", "TV-PG · Comedy", "10m remaining"),
                Program::new("p32", "Stand-Up Hour", "TV-MA · Comedy", "4:00–4:30 PM"),
                Program::new("p33", "Sitcom Shuffle", "TV-PG · Comedy", "4:30–5:00 PM"),
                Program::new("p34", "Sketch Night", "TV-14 · Comedy", "5:00–5:30 PM"),
                Program::new("p35", "Late Laughs", "TV-14 · Comedy", "5:30–6:00 PM"),
            ],
        ),
        Channel::new(
            "c4",
            "Nature HD",
            vec![
                Program::new("p41", "Wild Rivers", "TV-G · Documentary", "35m remaining"),
                Program::new("p42", "Deep Forest", "TV-G · Documentary", "4:00–4:30 PM"),
                Program::new("p43", "Ocean Life", "TV-G · Documentary", "4:30–5:00 PM"),
                Program::new("p44", "Sky Trails", "TV-G · Documentary", "5:00–5:30 PM"),
                Program::new("p45", "Night Creatures", "TV-PG · Documentary", "5:30–6:00 PM"),
            ],
        ),
        Channel::new(
            "c5",
            "Kids Zone",
            vec![
                Program::new("p51", "Puzzle Pals", "TV-Y · Kids", "7m remaining"),
                Program::new("p52", "Craft Corner", "TV-Y · Kids", "4:00–4:30 PM"),
                Program::new("p53", "Story Time", "TV-Y · Kids", "4:30–5:00 PM"),
                Program::new("p54", "Space Sprouts", "TV-Y7 · Kids", "5:00–5:30 PM"),
                Program::new("p55", "Animal Amigos", "TV-Y · Kids", "5:30–6:00 PM"),
            ],
        ),
    ]
}

/// The stock 5x5 guide grid
pub fn demo_grid() -> GridModel {
    // The fixture is rectangular; construct directly, bypassing the check
    GridModel {
        channels: demo_channels(),
        time_columns: demo_time_columns(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_grid_dimensions() {
        let grid = demo_grid();
        assert_eq!(grid.row_count(), 6); // 5 channels + header
        assert_eq!(grid.col_count(), 6); // 5 time columns + row header
        assert_eq!(grid.focusable_rows(), 5);
        assert_eq!(grid.focusable_cols(), 6);
    }

    #[test]
    fn test_cell_lookup() {
        let grid = demo_grid();

        match grid.cell_at(0, 0).unwrap() {
            CellRef::ChannelHeader(channel) => assert_eq!(channel.name, "News 24"),
            other => panic!("expected channel header, got {:?}", other),
        }

        match grid.cell_at(1, 2).unwrap() {
            CellRef::Program { channel, program } => {
                assert_eq!(channel.name, "Action Max");
                assert_eq!(program.title, "Night Pursuit");
            }
            other => panic!("expected program, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_lookup() {
        let grid = demo_grid();

        assert!(matches!(
            grid.cell_at(5, 0),
            Err(PatternError::OutOfRange { row: 5, .. })
        ));
        assert!(matches!(
            grid.cell_at(0, 6),
            Err(PatternError::OutOfRange { col: 6, .. })
        ));
    }

    #[test]
    fn test_ragged_channel_rejected() {
        let channels = vec![Channel::new(
            "c1",
            "News 24",
            vec![Program::new("p", "Solo", "TV-G", "now")],
        )];

        let err = GridModel::new(channels, demo_time_columns()).unwrap_err();
        assert!(matches!(err, PatternError::RaggedChannel { got: 1, expected: 5, .. }));
    }

    #[test]
    fn test_accessible_names() {
        let grid = demo_grid();

        assert_eq!(
            grid.cell_accessible_name(1, 0, 1).unwrap(),
            "Action Max, currently playing"
        );
        assert_eq!(grid.cell_accessible_name(1, 0, 0).unwrap(), "Action Max");
        assert_eq!(
            grid.cell_accessible_name(0, 1, 1).unwrap(),
            "Now: Live Headlines. TV-PG · News. 22m remaining"
        );
        assert_eq!(
            grid.cell_accessible_name(0, 2, 1).unwrap(),
            "4:00 PM: World Report. TV-PG · News. 4:00–4:30 PM"
        );
    }
}
