//! Plain-text table rendering.
//!
//! Every column is as wide as its widest cell, header included. Cells are
//! left-justified and joined by `" | "`; the separator line under the header
//! is made of dashes joined by `"-+-"` so the boundaries line up.

use crate::model::Album;

/// Column headers of the album table.
pub const ALBUM_HEADERS: [&str; 5] = ["ID", "Artist", "Genre", "Year", "Classic"];

/// Render albums as an aligned text table.
///
/// Absent genre and year render as empty cells; the classic flag renders as
/// `Yes` or `No`.
#[must_use]
pub fn render_albums(albums: &[Album]) -> String {
    let rows: Vec<Vec<String>> = albums.iter().map(album_cells).collect();
    render_table(&ALBUM_HEADERS, &rows)
}

fn album_cells(album: &Album) -> Vec<String> {
    vec![
        album.id.to_string(),
        album.artist.clone(),
        album.genre.clone().unwrap_or_default(),
        album.year.map(|y| y.to_string()).unwrap_or_default(),
        if album.is_classic { "Yes" } else { "No" }.to_string(),
    ]
}

/// Render a header row, a separator and one line per row.
///
/// Rows shorter than the header are padded with empty cells; extra cells are
/// ignored. Widths count characters, not bytes.
#[must_use]
pub fn render_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.as_ref().chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &format_row(headers, &widths));

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &separator.join("-+-"));

    for row in rows {
        let cells: Vec<&str> = (0..widths.len())
            .map(|col| row.get(col).map_or("", |cell| cell.as_ref()))
            .collect();
        push_line(&mut out, &format_row(&cells, &widths));
    }

    out
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlbumId;

    fn album(
        id: i64,
        artist: &str,
        genre: Option<&str>,
        year: Option<i32>,
        classic: bool,
    ) -> Album {
        Album {
            id: AlbumId::from_i64(id),
            artist: artist.to_string(),
            genre: genre.map(str::to_string),
            year,
            is_classic: classic,
        }
    }

    /// Split a rendered line back into trimmed cells.
    fn cells(line: &str) -> Vec<&str> {
        line.split(" | ").map(str::trim_end).collect()
    }

    #[test]
    fn test_render_empty() {
        let output = render_albums(&[]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ID | Artist | Genre | Year | Classic");
        assert_eq!(lines[1], "---+--------+-------+------+--------");
    }

    #[test]
    fn test_render_single_album() {
        let output = render_albums(&[album(1, "Bowie", Some("Rock"), Some(1977), true)]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(cells(lines[2]), vec!["1", "Bowie", "Rock", "1977", "Yes"]);
    }

    #[test]
    fn test_render_absent_fields() {
        let output = render_albums(&[album(3, "Anonymous", None, None, false)]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(cells(lines[2]), vec!["3", "Anonymous", "", "", "No"]);

        // Header words still set the minimum widths
        let dashes: Vec<usize> = lines[1].split("-+-").map(str::len).collect();
        assert_eq!(dashes, vec![2, 9, 5, 4, 7]);
    }

    #[test]
    fn test_render_widths_follow_widest_cell() {
        let output = render_albums(&[
            album(1, "Bowie", Some("Rock"), Some(1977), true),
            album(2, "The Velvet Underground", Some("Art rock"), Some(1967), false),
        ]);
        let lines: Vec<&str> = output.lines().collect();

        let dashes: Vec<usize> = lines[1].split("-+-").map(str::len).collect();
        assert_eq!(dashes, vec![2, 22, 8, 4, 7]);

        // Every line has the same length once padded
        let len = lines[0].len();
        assert!(lines.iter().all(|l| l.len() == len));
        assert!(lines[2].starts_with("1  | Bowie                  | Rock     | 1977 | Yes    "));
    }

    #[test]
    fn test_render_counts_characters() {
        let output = render_albums(&[album(1, "Björk", None, Some(1993), false)]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0].chars().count(), lines[2].chars().count());
    }

    #[test]
    fn test_render_table_short_rows() {
        let rows = vec![vec!["x"]];
        let output = render_table(&["A", "B"], &rows);
        assert_eq!(output, "A | B\n--+--\nx |  \n");
    }
}
