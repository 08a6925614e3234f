use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use crate::listing::{FileEntry, Listing};

pub const EMPTY_STATE_MESSAGE: &str = "There are no files on the server.";

/// An action available on a rendered row, bound to that row's filename.
/// Kept as data so the pipeline can be tested without any terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Download { filename: String },
    Delete { filename: String },
}

impl RowAction {
    pub fn verb(&self) -> &'static str {
        match self {
            RowAction::Download { .. } => "get",
            RowAction::Delete { .. } => "delete",
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            RowAction::Download { filename } | RowAction::Delete { filename } => filename,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub entry: FileEntry,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView {
    Empty,
    Table(Vec<Row>),
}

/// Build the view for a listing. Every file row offers download and delete,
/// bound to its own filename.
pub fn view(listing: Listing) -> ListingView {
    match listing {
        Listing::Empty => ListingView::Empty,
        Listing::Files(entries) => ListingView::Table(
            entries
                .into_iter()
                .map(|entry| {
                    let actions = vec![
                        RowAction::Download {
                            filename: entry.filename.clone(),
                        },
                        RowAction::Delete {
                            filename: entry.filename.clone(),
                        },
                    ];
                    Row { entry, actions }
                })
                .collect(),
        ),
    }
}

/// Render the view to a printable string. Each call produces the complete
/// output; nothing is updated incrementally.
pub fn render(view: &ListingView) -> String {
    match view {
        ListingView::Empty => EMPTY_STATE_MESSAGE.to_string(),
        ListingView::Table(rows) => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["File", "Owner", "Size (MB)", "Uploaded", "Actions"]);
            for row in rows {
                let actions = row
                    .actions
                    .iter()
                    .map(RowAction::verb)
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![
                    row.entry.filename.clone(),
                    row.entry.owner.clone(),
                    row.entry.size_mb(),
                    row.entry.timestamp.clone(),
                    actions,
                ]);
            }
            table.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::parse_listing;

    #[test]
    fn empty_listing_renders_empty_state_without_table() {
        let view = view(parse_listing("There are no files on the server."));
        assert_eq!(view, ListingView::Empty);
        let out = render(&view);
        assert_eq!(out, EMPTY_STATE_MESSAGE);
        assert!(!out.contains("Owner"));
    }

    #[test]
    fn rows_carry_actions_bound_to_their_filename() {
        let listing = parse_listing(
            "a.txt - 10 bytes - Uploaded by alice on d1\n\
             b.txt - 20 bytes - Uploaded by bob on d2",
        );
        match view(listing) {
            ListingView::Table(rows) => {
                assert_eq!(rows.len(), 2);
                for row in &rows {
                    assert_eq!(row.actions.len(), 2);
                    for action in &row.actions {
                        assert_eq!(action.filename(), row.entry.filename);
                    }
                }
                assert_eq!(rows[0].actions[0].verb(), "get");
                assert_eq!(rows[0].actions[1].verb(), "delete");
            }
            ListingView::Empty => panic!("expected table"),
        }
    }

    #[test]
    fn table_renders_rows_in_input_order() {
        let listing = parse_listing(
            "z.txt - 1048576 bytes - Uploaded by zoe on d1\n\
             malformed\n\
             a.txt - 2097152 bytes - Uploaded by al on d2",
        );
        let out = render(&view(listing));
        assert!(out.contains("z.txt"));
        assert!(out.contains("a.txt"));
        assert!(out.contains("1.00"));
        assert!(out.contains("2.00"));
        assert!(out.find("z.txt").unwrap() < out.find("a.txt").unwrap());
        assert!(!out.contains("malformed"));
    }
}
