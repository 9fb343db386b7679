use studio_markdown::Pipeline;

fn render(markdown: &str) -> String {
    Pipeline::default().render_html(markdown)
}

#[test]
fn test_script_element_dropped() {
    let html = render("Before\n\n<script>alert('pwned')</script>\n\nAfter\n");
    assert!(!html.contains("script"));
    assert!(!html.contains("pwned"));
    assert!(html.contains("Before"));
    assert!(html.contains("After"));
}

#[test]
fn test_iframe_dropped_with_subtree() {
    let html = render("<iframe src=\"https://evil.example\">fallback text</iframe>\n");
    assert!(!html.contains("iframe"));
    assert!(!html.contains("evil.example"));
    assert!(!html.contains("fallback text"));
}

#[test]
fn test_object_embed_style_dropped() {
    let html = render("<object data=\"x\">inner</object>\n\n<embed src=\"x\">\n\n<style>p { color: red }</style>\n");
    assert!(!html.contains("object"));
    assert!(!html.contains("embed"));
    assert!(!html.contains("color: red"));
}

#[test]
fn test_event_handlers_stripped() {
    let html = render("<p onclick=\"steal()\">click me</p>\n");
    assert!(html.contains("<p"));
    assert!(html.contains("click me"));
    assert!(!html.contains("onclick"));
    assert!(!html.contains("steal"));
}

#[test]
fn test_img_onerror_stripped() {
    let html = render("<img src=\"cat.png\" onerror=\"alert(1)\">\n");
    assert!(html.contains("<img"));
    assert!(html.contains("cat.png"));
    assert!(!html.contains("onerror"));
}

#[test]
fn test_javascript_url_rejected() {
    let html = render("[click](javascript:alert(1))\n");
    assert!(!html.contains("javascript:"));
    // the link text survives even when the destination is rejected
    assert!(html.contains("click"));
}

#[test]
fn test_javascript_url_in_literal_html_rejected() {
    let html = render("<a href=\"JaVaScRiPt:alert(1)\">x</a>\n");
    assert!(!html.to_lowercase().contains("javascript:"));
}

#[test]
fn test_data_url_allowed_for_images_only() {
    let html = render("![dot](data:image/png;base64,iVBORw0KGgo=)\n");
    assert!(html.contains("data:image/png"));

    let html = render("[x](data:text/html;base64,PHNjcmlwdD4=)\n");
    assert!(!html.contains("data:text/html"));
}

#[test]
fn test_relative_and_absolute_urls_kept() {
    let html = render("[rel](/docs/page) and [abs](https://example.com/a) and [mail](mailto:a@b.c)\n");
    assert!(html.contains("/docs/page"));
    assert!(html.contains("https://example.com/a"));
    assert!(html.contains("mailto:a@b.c"));
}

#[test]
fn test_disallowed_attribute_stripped_allowed_kept() {
    let html = render("<p class=\"lead\" data-track=\"1\">hi</p>\n");
    assert!(html.contains("class=\"lead\""));
    assert!(!html.contains("data-track"));
}

#[test]
fn test_benign_document_survives() {
    let doc = "# Title\n\nA *styled* paragraph with [a link](https://example.com).\n\n> quoted\n\n| A |\n| --- |\n| 1 |\n";
    let html = render(doc);
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<em>styled</em>"));
    assert!(html.contains("<blockquote>"));
    assert!(html.contains("<table>"));
}

#[test]
fn test_widget_marker_survives_sanitization() {
    let doc = "```card {\"title\": \"T\", \"body\": \"B\"}\n```\n";
    let html = render(doc);
    assert!(html.contains("<studio-card"));
    assert!(html.contains("data-json"));
}

#[test]
fn test_html_comments_dropped() {
    let html = render("visible <!-- hidden note --> text\n");
    assert!(html.contains("visible"));
    assert!(!html.contains("hidden note"));
}
