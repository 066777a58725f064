//! Minimal HTML table model.
//!
//! Cells carry pre-rendered markup; use [`escape`] (or [`TableCell::text`])
//! for anything that came from the tracker or a user file.

use std::fmt;

use crate::schema::HEADER_COLOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub content: String,
    pub bgcolor: Option<String>,
    pub align: Option<Align>,
    pub colspan: Option<usize>,
}

impl TableCell {
    /// A cell holding trusted markup.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// A cell holding plain text, escaped.
    pub fn text(text: &str) -> Self {
        Self::new(escape(text))
    }

    /// A bold, centered header cell.
    pub fn header(label: &str) -> Self {
        Self::new(format!("<b><center>{}</center></b>", escape(label))).bgcolor(HEADER_COLOR)
    }

    pub fn bgcolor(mut self, color: impl Into<String>) -> Self {
        self.bgcolor = Some(color.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn colspan(mut self, span: usize) -> Self {
        self.colspan = Some(span);
        self
    }

    fn render(&self, tag: &str, width: Option<u32>, default_align: Option<Align>) -> String {
        let mut attrs = String::new();
        if let Some(span) = self.colspan {
            attrs.push_str(&format!(" colspan=\"{}\"", span));
        } else if let Some(width) = width {
            attrs.push_str(&format!(" width=\"{}\"", width));
        }
        if let Some(align) = self.align.or(default_align) {
            attrs.push_str(&format!(" align=\"{}\"", align.as_str()));
        }
        if let Some(color) = &self.bgcolor {
            attrs.push_str(&format!(" bgcolor=\"{}\"", escape(color)));
        }
        format!("<{tag}{attrs}>{}</{tag}>", self.content)
    }
}

/// An HTML table with an optional header row and per-column width/alignment.
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Option<Vec<TableCell>>,
    rows: Vec<Vec<TableCell>>,
    col_widths: Vec<u32>,
    col_aligns: Vec<Align>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: Vec<TableCell>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn col_widths(mut self, widths: &[u32]) -> Self {
        self.col_widths = widths.to_vec();
        self
    }

    pub fn col_aligns(mut self, aligns: &[Align]) -> Self {
        self.col_aligns = aligns.to_vec();
        self
    }

    pub fn push_row(&mut self, row: Vec<TableCell>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn render_row(&self, out: &mut String, cells: &[TableCell], tag: &str) {
        out.push_str(" <tr>");
        for (i, cell) in cells.iter().enumerate() {
            let width = self.col_widths.get(i).copied();
            let align = if tag == "th" {
                None
            } else {
                self.col_aligns.get(i).copied()
            };
            out.push_str(&cell.render(tag, width, align));
        }
        out.push_str("</tr>\n");
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from(
            "<table border=\"1\" cellpadding=\"4\" style=\"border: 1px solid #000000; border-collapse: collapse;\">\n",
        );
        if let Some(header) = &self.header {
            self.render_row(&mut out, header, "th");
        }
        for row in &self.rows {
            self.render_row(&mut out, row, "td");
        }
        out.push_str("</table>\n");
        f.write_str(&out)
    }
}

/// Escape text for element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// An anchor with escaped href and text.
pub fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn renders_header_and_rows_with_column_attributes() {
        let mut table = Table::new()
            .with_header(vec![TableCell::header("Date"), TableCell::header("Milestone")])
            .col_widths(&[200, 600])
            .col_aligns(&[Align::Center, Align::Left]);
        table.push_row(vec![TableCell::text("3-Nov-2015"), TableCell::text("Alpha 1")]);

        let html = table.to_string();
        assert!(html.starts_with("<table border=\"1\""));
        assert!(html.contains(
            "<th width=\"200\" bgcolor=\"DarkGray\"><b><center>Date</center></b></th>"
        ));
        assert!(html.contains(
            "<tr><td width=\"200\" align=\"center\">3-Nov-2015</td><td width=\"600\" align=\"left\">Alpha 1</td></tr>"
        ));
        assert!(html.trim_end().ends_with("</table>"));
    }

    #[test]
    fn cell_attributes_override_columns() {
        let mut table = Table::new().col_widths(&[90]).col_aligns(&[Align::Left]);
        table.push_row(vec![TableCell::new("").bgcolor("Red").align(Align::Right)]);
        table.push_row(vec![TableCell::text("2.0-alpha1").colspan(3)]);

        let html = table.to_string();
        assert!(html.contains("<td width=\"90\" align=\"right\" bgcolor=\"Red\"></td>"));
        assert!(html.contains("<td colspan=\"3\" align=\"left\">2.0-alpha1</td>"));
    }

    #[test]
    fn link_escapes_both_parts() {
        assert_eq!(
            link("https://example.com/?a=1&b=2", "A <b>"),
            "<a href=\"https://example.com/?a=1&amp;b=2\">A &lt;b&gt;</a>"
        );
    }
}
