use studio_markdown::HtmlToMarkdown;

fn convert(html: &str) -> String {
    HtmlToMarkdown::new().convert(html).expect("conversion should succeed")
}

#[test]
fn test_full_document() {
    let html = "<h2>Notes</h2>\
                <p>Some <strong>important</strong> text with <a href=\"https://example.com\">a link</a>.</p>\
                <ul><li>first</li><li>second</li></ul>\
                <pre><code class=\"language-rust\">let x = 1;\n</code></pre>";
    assert_eq!(
        convert(html),
        "## Notes\n\n\
         Some **important** text with [a link](https://example.com).\n\n\
         - first\n- second\n\n\
         ```rust\nlet x = 1;\n```\n"
    );
}

#[test]
fn test_loose_list_keeps_blank_lines() {
    let html = "<ul><li><p>alpha</p><p>more about alpha</p></li><li><p>beta</p></li></ul>";
    assert_eq!(
        convert(html),
        "- alpha\n\n  more about alpha\n\n- beta\n"
    );
}

#[test]
fn test_blockquote_with_two_paragraphs() {
    let html = "<blockquote><p>one</p><p>two</p></blockquote>";
    assert_eq!(convert(html), "> one\n>\n> two\n");
}

#[test]
fn test_table_cells_with_inline_markup() {
    let html = "<table><thead><tr><th>Name</th><th>Note</th></tr></thead>\
                <tbody><tr><td><code>x</code></td><td>a <em>small</em> one</td></tr></tbody></table>";
    assert_eq!(
        convert(html),
        "| Name | Note |\n| --- | --- |\n| `x` | a *small* one |\n"
    );
}

#[test]
fn test_widget_marker_with_multiline_json() {
    let html = "<studio-chart data-json=\"{&#10;  &quot;type&quot;: &quot;bar&quot;}\"></studio-chart>";
    let markdown = convert(html);
    assert!(markdown.starts_with("```\nchart {"));
    assert!(markdown.ends_with("}\n```\n"));
}

#[test]
fn test_empty_input() {
    assert_eq!(convert(""), "");
}

#[test]
fn test_whitespace_between_blocks_ignored() {
    let html = "<h1>A</h1>\n\n  <p>B</p>\n";
    assert_eq!(convert(html), "# A\n\nB\n");
}

#[test]
fn test_div_wrapper_is_transparent() {
    let html = "<div><p>inner</p></div>";
    assert_eq!(convert(html), "inner\n");
}
