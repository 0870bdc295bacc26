/// Render a simple aligned table: header, dash divider, one line per row.
/// Numeric cells are right-aligned; long cells are truncated to fit
/// `max_width` when one is given.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    fit_widths(&mut widths, headers, max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string();

    let divider = "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).cloned().unwrap_or_else(|| "-".to_string());
                let truncated = truncate(&value, *width);
                let numeric = looks_numeric(&truncated);
                format_cell(&truncated, *width, numeric)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = vec![header_line, divider];
    lines.extend(row_lines);
    lines.join("\n")
}

/// Shrink the widest shrinkable column one character at a time until the
/// table fits. Columns never go below their header width.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    if widths.is_empty() {
        return;
    }

    let separators = widths.len().saturating_sub(1) * 2;
    loop {
        let total = widths.iter().sum::<usize>() + separators;
        if total <= max_width {
            return;
        }

        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(4))
            .max_by_key(|(_, width)| **width);
        let Some((index, _)) = widest else {
            return;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn format_cell(value: &str, width: usize, right_align: bool) -> String {
    let pad = width.saturating_sub(value.chars().count());
    if right_align {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render;

    #[test]
    fn columns_align_across_mixed_widths() {
        let headers = ["id", "title"];
        let rows = vec![
            vec!["1".to_string(), "short".to_string()],
            vec!["200".to_string(), "a much longer title".to_string()],
        ];

        let table = render(&headers, &rows, None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[1].chars().all(|c| c == '-'));
        // Numeric ids are right-aligned in a 3-wide column.
        assert!(lines[2].starts_with("  1"));
        assert!(lines[3].starts_with("200"));
    }

    #[test]
    fn long_cells_are_truncated_to_the_width_budget() {
        let headers = ["id", "content"];
        let rows = vec![vec![
            "1".to_string(),
            "an extremely long body that cannot possibly fit".to_string(),
        ]];

        let table = render(&headers, &rows, Some(24));
        for line in table.lines() {
            assert!(line.chars().count() <= 24, "line too wide: {line:?}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dashes() {
        let headers = ["id", "note"];
        let rows = vec![vec!["1".to_string()]];

        let table = render(&headers, &rows, None);
        let last = table.lines().last().expect("row line");
        assert!(last.contains('-'));
    }
}
