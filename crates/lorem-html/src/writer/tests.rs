use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Document, HtmlElement, Node};
use crate::writer::Diagnostic;
use crate::{to_plain_text, HtmlWriteError, HtmlWriter, HtmlWriterOptions};

fn write(node: HtmlElement) -> String {
    let mut writer = HtmlWriter::new();
    writer.write_node(&Node::Element(node)).unwrap();
    writer.into_string().unwrap().to_string()
}

#[test]
fn documents_can_start_with_a_doctype() {
    let mut document = Document::new();
    document
        .head
        .push_element(HtmlElement::with_text("title", "Dolor"));
    document.body.push_element(HtmlElement::with_text("p", "Sit."));

    let mut writer = HtmlWriter::with_options(HtmlWriterOptions::default().with_doctype(true));
    writer.write_document(&document).unwrap();
    insta::assert_snapshot!(
        writer.into_string().unwrap(),
        @r"
    <!DOCTYPE html>
    <html><head><title>Dolor</title></head><body><p>Sit.</p></body></html>
    "
    );
}

#[test]
fn void_inputs_close_themselves() {
    let input = HtmlElement::void("input")
        .with_attribute("type", "text")
        .with_attribute("placeholder", "\"name\" & <id>");
    insta::assert_snapshot!(
        write(input),
        @r#"<input type="text" placeholder="&quot;name&quot; &amp; &lt;id&gt;" />"#
    );
}

#[test]
fn attribute_without_open_tag_is_rejected() {
    let mut writer = HtmlWriter::new();
    let err = writer.attribute("class", "late").unwrap_err();
    assert!(matches!(err, HtmlWriteError::NoOpenTag(_)));
}

#[test]
fn children_keep_insertion_order() {
    let list = HtmlElement::new("ul").with_children(vec![
        HtmlElement::with_text("li", "first").into(),
        HtmlElement::with_text("li", "second").into(),
        Node::Text("tail".into()),
    ]);
    insta::assert_snapshot!(write(list), @"<ul><li>first</li><li>second</li>tail</ul>");
}

#[test]
fn void_elements_are_self_closing() {
    let input = HtmlElement::void("input")
        .with_attribute("type", "password")
        .with_attribute("id", "password");
    insta::assert_snapshot!(write(input), @r#"<input type="password" id="password" />"#);
}

#[test]
fn document_wraps_head_and_body() {
    let mut document = Document::new();
    document
        .head
        .push_element(HtmlElement::with_text("title", "Hello"));
    document
        .body
        .push_element(HtmlElement::new("div").with_attribute("id", "42"));

    let mut writer = HtmlWriter::new();
    writer.write_document(&document).unwrap();
    insta::assert_snapshot!(
        writer.into_string().unwrap(),
        @r#"<html><head><title>Hello</title></head><body><div id="42"></div></body></html>"#
    );
}

#[test]
fn doctype_is_optional() {
    let mut writer = HtmlWriter::with_options(HtmlWriterOptions::default().with_doctype(true));
    writer.write_document(&Document::new()).unwrap();
    insta::assert_snapshot!(
        writer.into_string().unwrap(),
        @r"
    <!DOCTYPE html>
    <html><head></head><body></body></html>
    "
    );
}

#[test]
fn strict_mode_rejects_unsafe_tag() {
    let mut writer = HtmlWriter::new();
    let err = writer
        .write_html_element(&HtmlElement::new("div!"))
        .unwrap_err();
    assert_eq!(err, HtmlWriteError::UnsafeTag("div!".into()));
}

#[test]
fn strict_mode_rejects_unsafe_attribute() {
    let mut writer = HtmlWriter::new();
    let element = HtmlElement::new("div").with_attribute("on click", "x");
    let err = writer.write_html_element(&element).unwrap_err();
    assert_eq!(err, HtmlWriteError::UnsafeAttribute("on click".into()));
}

#[test]
fn lenient_mode_textualizes_and_reports() {
    let diagnostics = Rc::new(RefCell::new(Vec::<Diagnostic>::new()));
    let mut writer = HtmlWriter::with_options(HtmlWriterOptions::default().with_strict(false))
        .with_diagnostic_sink(Box::new(diagnostics.clone()));
    let element = HtmlElement::with_text("div!", "oops").with_attribute("class", "unsafe");

    writer.write_html_element(&element).unwrap();

    insta::assert_snapshot!(
        writer.into_string().unwrap(),
        @r#"&lt;div! class="unsafe"&gt;oops&lt;/div!&gt;"#
    );
    assert_eq!(*diagnostics.borrow(), [Diagnostic::UnsafeTag("div!".into())]);
}

#[test]
fn plain_text_breaks_lines_after_blocks() {
    let nodes = vec![
        HtmlElement::with_text("h2", "Heading").into(),
        HtmlElement::new("p")
            .with_children(vec![
                Node::Text("Some".into()),
                HtmlElement::with_text("b", "bold").into(),
                Node::Text("text.".into()),
            ])
            .into(),
        Node::Text("Trailing".into()),
    ];
    assert_eq!(to_plain_text(&nodes), "Heading\nSome bold text.\nTrailing");
}

#[test]
fn document_title_reads_head() {
    let mut document = Document::new();
    assert_eq!(document.title(), None);
    document
        .head
        .push_element(HtmlElement::with_text("title", "Lorem ipsum."));
    assert_eq!(document.title().as_deref(), Some("Lorem ipsum."));
}
