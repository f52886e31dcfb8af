use crate::bar::render_bar;
use crate::gpfs::QuotaValues;
use crate::palette::Palette;

/// Rendering width of one quota block, in terminal columns
pub const BLOCK_WIDTH: usize = 38;
/// Blank columns between blocks printed side by side
pub const GRID_MARGIN: usize = 4;

/// Renders the bar for one metric and stacks a bold title on top, with
/// every line right-padded to exactly `width` visible columns so blocks
/// can sit next to each other. Lines that outgrow the width (long label
/// values) are left alone
pub fn format_block(
    title: &str,
    values: &QuotaValues,
    width: usize,
    format_value: fn(u64) -> String,
    palette: &Palette,
) -> Vec<String> {
    let mut lines = vec![palette.bold(title)];
    lines.extend(render_bar(
        values.usage,
        values.quota,
        values.limit,
        width,
        format_value,
        palette,
    ));
    lines.iter().map(|line| pad_line(line, width)).collect()
}

/// Interleaves the blocks row by row when `grid_mode` is set, padding
/// shorter blocks with blank rows of their column width; otherwise
/// returns the blocks stacked one after another
pub fn render_grid(blocks: &[Vec<String>], width: usize, grid_mode: bool) -> Vec<String> {
    if !grid_mode {
        return blocks.concat();
    }

    let rows = blocks.iter().map(|block| block.len()).max().unwrap_or(0);
    let blank = " ".repeat(width);
    let margin = " ".repeat(GRID_MARGIN);
    (0..rows)
        .map(|row| {
            blocks
                .iter()
                .map(|block| block.get(row).map_or(blank.as_str(), String::as_str))
                .collect::<Vec<_>>()
                .join(&margin)
        })
        .collect()
}

fn pad_line(line: &str, width: usize) -> String {
    let visible = visible_width(line);
    if visible >= width {
        line.to_string()
    } else {
        format!("{}{}", line, " ".repeat(width - visible))
    }
}

/// Counts the columns a line occupies on screen, skipping over ANSI
/// escape sequences so colored and plain lines measure the same
fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::count_to_str;

    fn block(title: &str, usage: u64, quota: u64, limit: u64) -> Vec<String> {
        let values = QuotaValues { usage, quota, limit };
        format_block(title, &values, 40, count_to_str, &Palette::plain())
    }

    #[test]
    fn test_block_lines_are_padded_to_width() {
        for line in block("home blocks", 1500, 3000, 4000) {
            assert!(line.chars().count() >= 40, "line too short: {:?}", line);
        }
    }

    #[test]
    fn test_block_starts_with_title() {
        let lines = block("home files", 10, 100, 1000);
        assert_eq!(lines[0], format!("home files{}", " ".repeat(30)));
    }

    #[test]
    fn test_grid_rows_match_longest_block() {
        // Colliding labels on the left (two label lines), merged on the
        // right (one), so the blocks have uneven heights
        let left = block("home blocks", 1500, 3000, 4000);
        let right = block("home files", 10, 100, 1000);
        assert_eq!(left.len(), 5);
        assert_eq!(right.len(), 4);

        let grid = render_grid(&[left.clone(), right.clone()], 40, true);
        assert_eq!(grid.len(), 5);
        // The shorter block's missing row renders as blank filler
        assert!(grid[4].ends_with(&" ".repeat(40)));
        assert_eq!(grid[0], format!("{}    {}", left[0], right[0]));
    }

    #[test]
    fn test_stacked_mode_concatenates() {
        let left = block("home blocks", 1500, 3000, 4000);
        let right = block("home files", 10, 100, 1000);
        let stacked = render_grid(&[left.clone(), right.clone()], 40, false);
        assert_eq!(stacked.len(), left.len() + right.len());
        assert_eq!(stacked[left.len()], right[0]);
    }

    #[test]
    fn test_visible_width_ignores_escape_sequences() {
        assert_eq!(visible_width("plain"), 5);
        assert_eq!(visible_width("\u{1b}[32m██\u{1b}[0m"), 2);
        assert_eq!(visible_width(""), 0);
    }
}
