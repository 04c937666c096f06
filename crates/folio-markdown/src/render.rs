//! Markdown to HTML conversion.

use pulldown_cmark::{html, Event, Options, Parser};

/// Extensions enabled when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Recognize GFM pipe tables
    pub tables: bool,

    /// Emit raw HTML blocks and inline tags verbatim instead of escaping them
    pub raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            raw_html: true,
        }
    }
}

impl MarkdownOptions {
    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        options
    }
}

/// Render a Markdown document to an HTML fragment.
///
/// Column alignment from the table separator row is written as a
/// `style="text-align: ..."` attribute on each header and data cell.
pub fn render_markdown(source: &str, options: MarkdownOptions) -> String {
    let parser = Parser::new_ext(source, options.parser_options());
    let mut html_output = String::with_capacity(source.len() * 3 / 2);

    if options.raw_html {
        html::push_html(&mut html_output, parser);
    } else {
        // Demote raw HTML to text so the writer escapes it.
        let events = parser.map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        html::push_html(&mut html_output, events);
    }

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        render_markdown(source, MarkdownOptions::default())
    }

    #[test]
    fn renders_heading_and_paragraph() {
        let html = render("# Title\n\nBody text.");

        assert_eq!(html, "<h1>Title</h1>\n<p>Body text.</p>\n");
    }

    #[test]
    fn rendering_is_deterministic() {
        let source = r#"# Guide

Some *emphasis*, some **strong** text and `code`.

- one
- two

```ts
const x = 1;
```

> quoted
"#;

        assert_eq!(render(source), render(source));
    }

    #[test]
    fn passes_inline_html_through() {
        let html = render("Hello <span class=\"accent\">world</span>!");

        assert!(html.contains("<span class=\"accent\">world</span>"));
        assert!(!html.contains("&lt;span"));
    }

    #[test]
    fn passes_block_html_through() {
        let source = "<div align=\"center\">\n<img src=\"logo.png\" alt=\"logo\">\n</div>\n\n# After";
        let html = render(source);

        assert!(html.contains("<div align=\"center\">\n<img src=\"logo.png\" alt=\"logo\">\n</div>"));
        assert!(html.contains("<h1>After</h1>"));
    }

    #[test]
    fn escapes_html_when_raw_html_disabled() {
        let options = MarkdownOptions {
            raw_html: false,
            ..Default::default()
        };
        let html = render_markdown("Hello <b>there</b>", options);

        assert!(html.contains("&lt;b&gt;there&lt;/b&gt;"));
    }

    #[test]
    fn renders_gfm_table() {
        let source = "\
| Name | Kind | Size |
|------|------|------|
| a    | file | 1    |
| b    | dir  | 2    |
| c    | link | 3    |
";
        let html = render(source);

        assert_eq!(html.matches("<table>").count(), 1);
        assert!(html.contains("<thead>"));
        assert!(html.contains("<tbody>"));
        // header row plus three data rows
        assert_eq!(html.matches("<tr>").count(), 4);
        assert_eq!(html.matches("</th>").count(), 3);
        assert_eq!(html.matches("</td>").count(), 9);
    }

    #[test]
    fn renders_table_without_data_rows() {
        let html = render("| only | header |\n|---|---|\n");

        assert_eq!(html.matches("<table>").count(), 1);
        assert_eq!(html.matches("<tr>").count(), 1);
        assert_eq!(html.matches("</th>").count(), 2);
        assert!(!html.contains("<td"));
    }

    #[test]
    fn renders_column_alignment() {
        let html = render("| l | c | r |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n");

        assert!(html.contains("<th style=\"text-align: left\">l</th>"));
        assert!(html.contains("<th style=\"text-align: center\">c</th>"));
        assert!(html.contains("<th style=\"text-align: right\">r</th>"));
        assert!(html.contains("<td style=\"text-align: center\">2</td>"));
    }

    #[test]
    fn leaves_pipes_alone_when_tables_disabled() {
        let options = MarkdownOptions {
            tables: false,
            ..Default::default()
        };
        let html = render_markdown("| a | b |\n|---|---|\n", options);

        assert!(!html.contains("<table>"));
    }
}
