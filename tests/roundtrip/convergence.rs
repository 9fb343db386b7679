use studio_markdown::{assemble, extract, HtmlToMarkdown, Pipeline};

const KITCHENSINK: &str = include_str!("../fixtures/kitchensink.md");

#[test]
fn test_kitchensink_front_matter_is_byte_exact() {
    let (fm, body) = extract(KITCHENSINK);
    assert_eq!(fm.len(), 5);
    assert_eq!(assemble(&fm, body), KITCHENSINK);
}

#[test]
fn test_kitchensink_reaches_fixed_point() {
    let pipeline = Pipeline::default();
    let inverse = HtmlToMarkdown::new();
    let (_, body) = extract(KITCHENSINK);

    let html1 = pipeline.render_html(body);
    let md2 = inverse.convert(&html1).expect("first inverse pass");
    let html2 = pipeline.render_html(&md2);
    let md3 = inverse.convert(&html2).expect("second inverse pass");
    let html3 = pipeline.render_html(&md3);

    assert_eq!(html2, html3, "conversion must converge after one cycle");
    assert_eq!(md2, md3, "markdown must converge after one cycle");
}

#[test]
fn test_widgets_survive_editing_cycle() {
    let pipeline = Pipeline::default();
    let inverse = HtmlToMarkdown::new();

    let doc = "```card {\"title\": \"T\", \"body\": \"B\"}\n```\n";
    let html = pipeline.render_html(doc);
    let back = inverse.convert(&html).expect("inverse pass");
    assert_eq!(back, doc);
}

#[test]
fn test_simple_content_round_trips_exactly() {
    let pipeline = Pipeline::default();
    let inverse = HtmlToMarkdown::new();

    let doc = "# Title\n\nPlain paragraph.\n\n- one\n- two\n";
    let html = pipeline.render_html(doc);
    let back = inverse.convert(&html).expect("inverse pass");
    assert_eq!(back, doc);
}

#[test]
fn test_front_matter_edit_then_render() {
    // the editor flow: peel metadata, edit the body through HTML, reattach
    let pipeline = Pipeline::default();
    let inverse = HtmlToMarkdown::new();

    let doc = "---\ntitle: Draft\n---\n# Body\n";
    let (fm, body) = extract(doc);
    let html = pipeline.render_html(body);
    let edited = inverse.convert(&html).expect("inverse pass");
    assert_eq!(assemble(&fm, &edited), "---\ntitle: Draft\n---\n# Body\n");
}
