//! Fixed-width text painter for [`RenderedTable`].

use crate::column::Alignment;
use crate::utils::text::{display_width, fit, single_line};

use super::{Body, RenderedTable};

const SKELETON: char = '░';

/// Painting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Upper bound for columns without an explicit width.
    pub max_column_width: usize,
    /// Width of skeleton cells.
    pub skeleton_width: usize,
    /// Column separator.
    pub separator: String,
    /// Append the pagination status line.
    pub pagination: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            max_column_width: 32,
            skeleton_width: 8,
            separator: " │ ".to_string(),
            pagination: true,
        }
    }
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width.max(1);
        self
    }

    pub fn pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }
}

/// Paint the table as lines of text.
///
/// Column widths come from the column definition when set, otherwise from
/// the widest header, cell or footer, capped at `max_column_width`.
pub fn paint(table: &RenderedTable, options: &TextOptions) -> String {
    let widths = column_widths(table, options);
    let mut lines = Vec::new();

    let header: Vec<String> = table
        .header
        .iter()
        .zip(&widths)
        .map(|(cell, width)| fit(&single_line(&cell.text), *width, cell.align))
        .collect();
    lines.push(header.join(&options.separator));
    lines.push(rule(&widths, options));

    match &table.body {
        Body::Skeleton { rows, .. } => {
            for _ in 0..*rows {
                let cells: Vec<String> = widths
                    .iter()
                    .map(|width| {
                        let filled = SKELETON.to_string().repeat(*width.min(&options.skeleton_width));
                        fit(&filled, *width, Alignment::Left)
                    })
                    .collect();
                lines.push(cells.join(&options.separator));
            }
        }
        Body::Empty { message, .. } => {
            let total = total_width(&widths, options).max(display_width(message));
            lines.push(fit(message, total, Alignment::Center));
        }
        Body::Rows(rows) => {
            for row in rows {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .zip(table.header.iter().zip(&widths))
                    .map(|(cell, (head, width))| {
                        fit(&single_line(cell.display()), *width, head.align)
                    })
                    .collect();
                lines.push(cells.join(&options.separator));
            }
        }
    }

    if let Some(footer) = &table.footer {
        lines.push(rule(&widths, options));
        let cells: Vec<String> = footer
            .iter()
            .zip(table.header.iter().zip(&widths))
            .map(|(text, (head, width))| fit(&single_line(text), *width, head.align))
            .collect();
        lines.push(cells.join(&options.separator));
    }

    if options.pagination {
        let control = &table.pagination;
        lines.push(String::new());
        lines.push(format!(
            "{} · {} · {} per page",
            control.page_label(),
            control.rows_label(),
            control.page_size
        ));
    }

    let mut out = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

fn column_widths(table: &RenderedTable, options: &TextOptions) -> Vec<usize> {
    table
        .header
        .iter()
        .enumerate()
        .map(|(i, head)| {
            if let Some(width) = head.width {
                return usize::from(width).max(1);
            }
            let mut width = display_width(&single_line(&head.text));
            for row in table.rows() {
                if let Some(cell) = row.cells.get(i) {
                    width = width.max(display_width(&single_line(cell.display())));
                }
            }
            if let Some(text) = table.footer.as_ref().and_then(|f| f.get(i)) {
                width = width.max(display_width(&single_line(text)));
            }
            if matches!(table.body, Body::Skeleton { .. }) {
                width = width.max(options.skeleton_width);
            }
            width.clamp(1, options.max_column_width)
        })
        .collect()
}

fn total_width(widths: &[usize], options: &TextOptions) -> usize {
    let separators = widths.len().saturating_sub(1) * display_width(&options.separator);
    widths.iter().sum::<usize>() + separators
}

fn rule(widths: &[usize], options: &TextOptions) -> String {
    "─".repeat(total_width(widths, options).max(1))
}
