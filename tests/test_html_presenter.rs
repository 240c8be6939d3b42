use notehub::domain::Tag;
use notehub::ports::HtmlPresenter;
use notehub::util::testing::sample_note;

#[test]
fn given_note_when_rendering_then_page_shows_title_tag_and_id() {
    // Arrange
    let note = sample_note("65f1a2b3", "Quarterly report", Tag::Work);
    let presenter = HtmlPresenter::new();

    // Act
    let html = presenter.render(&note);

    // Assert
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Quarterly report</title>"));
    assert!(html.contains(r#"<span class="tag">Work</span>"#));
    assert!(html.contains("Note ID: 65f1a2b3"));
    assert!(html.contains("Created: 2025-01-01 00:00 UTC"));
}

#[test]
fn given_ampersand_in_title_when_rendering_then_escaped_once() {
    let note = sample_note("1", "Trees & Graphs", Tag::Todo);

    let html = HtmlPresenter::new().render(&note);

    assert!(html.contains("Trees &amp; Graphs"));
    assert!(!html.contains("&amp;amp;"));
}
