//! End-to-end CLI tests: DOCX fixture on disk to generated site

use std::fs;
use std::path::{Path, PathBuf};

use folio_cli::{build_command, inspect_report};
use folio_core::SectionId;
use folio_ooxml::test_utils::{build_docx, wrap_body};

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:style w:type="paragraph" w:styleId="Normal" w:default="1"><w:name w:val="Normal"/></w:style>
    <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
    <w:style w:type="paragraph" w:styleId="BodyText"><w:name w:val="Body Text"/></w:style>
</w:styles>"#;

const CONFIG: &str = r#"
title = "Tides"
base_url = ""
download_name = "Tides.docx"

[structure]
preface = { start = 1, end = 3 }

[[chapters]]
number = 0
title = "Beginnings"
part = { number = "I", name = "Origins" }

[[chapters]]
number = 1
title = "Currents"
part = { number = "II", name = "Flow" }
"#;

fn p(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
}

fn styled(style: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
        style, text
    )
}

fn manuscript() -> String {
    let mut body = String::new();
    body.push_str(&p("Tides"));
    body.push_str(&p("PREFACE"));
    body.push_str(&p("Why tides matter."));
    body.push_str(&styled("Heading1", "PART I: ORIGINS"));
    body.push_str(&styled("Heading1", "Chapter 0: Beginnings"));
    body.push_str(&p("Where water starts"));
    body.push_str(&styled("BodyText", "0.1 First Motion"));
    body.push_str(
        r#"<w:p><m:oMathPara><m:oMath><m:f>
             <m:num><m:r><m:t>a</m:t></m:r></m:num>
             <m:den><m:r><m:t>b</m:t></m:r></m:den>
           </m:f></m:oMath></m:oMathPara></w:p>"#,
    );
    body.push_str(&styled("Heading1", "PART II: FLOW"));
    body.push_str(&styled("Heading1", "Chapter 1: Currents"));
    body.push_str(&p("Moving water"));
    body.push_str(&p("Plain body."));
    body.push_str(&p("APPENDIX A"));
    body.push_str(&p("Constants"));
    body.push_str(&p("g = 9.81"));
    wrap_body(&body)
}

fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let input = dir.join("tides.docx");
    let docx = build_docx(manuscript().as_bytes(), Some(STYLES.as_bytes())).unwrap();
    fs::write(&input, docx).unwrap();

    let config = dir.join("folio.toml");
    fs::write(&config, CONFIG).unwrap();
    (input, config)
}

#[test]
fn test_build_writes_pages_and_download() {
    let dir = tempfile::tempdir().unwrap();
    let (input, config) = write_fixture(dir.path());
    let output = dir.path().join("site");

    build_command(&input, &output, Some(&config)).unwrap();

    for name in [
        "index.html",
        "preface.html",
        "chapter-0.html",
        "chapter-1.html",
        "appendix-a.html",
        "Tides.docx",
    ] {
        assert!(output.join(name).exists(), "missing {}", name);
    }
    // no APPENDIX B marker in the fixture
    assert!(!output.join("appendix-b.html").exists());
    assert_eq!(
        fs::read(&input).unwrap(),
        fs::read(output.join("Tides.docx")).unwrap()
    );
}

#[test]
fn test_build_chapter_page_content() {
    let dir = tempfile::tempdir().unwrap();
    let (input, config) = write_fixture(dir.path());
    let output = dir.path().join("site");

    build_command(&input, &output, Some(&config)).unwrap();

    let chapter = fs::read_to_string(output.join("chapter-0.html")).unwrap();
    assert!(chapter.contains(r#"<h1 class="page-title">Chapter 0: Beginnings</h1>"#));
    assert!(chapter.contains(r#"<p class="subtitle">Where water starts</p>"#));
    assert!(chapter.contains("<h3>0.1 First Motion</h3>"));
    assert!(chapter.contains(r#"<div class="math-display">\[\frac{a}{b}\]</div>"#));
    assert!(chapter.contains("katex.min.js"));
    // the part heading belongs to the next chapter, not this one
    assert!(!chapter.contains("PART II"));

    let next = fs::read_to_string(output.join("chapter-1.html")).unwrap();
    assert!(next.contains("<p>Plain body.</p>"));
    assert!(!next.contains("katex"));

    let appendix = fs::read_to_string(output.join("appendix-a.html")).unwrap();
    assert!(appendix.contains("<p>g = 9.81</p>"));
    assert!(!appendix.contains("<p>Constants</p>"));

    let preface = fs::read_to_string(output.join("preface.html")).unwrap();
    assert!(preface.contains("<p>Why tides matter.</p>"));
    assert!(!preface.contains("<p>PREFACE</p>"));
}

#[test]
fn test_build_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = build_command(&dir.path().join("none.docx"), &dir.path().join("out"), None)
        .unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_build_rejects_non_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    fs::write(&input, "not a zip").unwrap();

    let err = build_command(&input, &dir.path().join("out"), None).unwrap_err();
    assert!(err.to_string().contains("Failed to read DOCX file"));
}

#[test]
fn test_inspect_report() {
    let dir = tempfile::tempdir().unwrap();
    let (input, config) = write_fixture(dir.path());

    let report = inspect_report(&input, Some(&config)).unwrap();
    assert_eq!(report.blocks, 15);
    assert_eq!(report.paragraphs, 15);
    assert_eq!(report.missing, vec![SectionId::AppendixB]);

    let chapter0 = report
        .sections
        .iter()
        .find(|s| s.name == SectionId::Chapter(0))
        .unwrap();
    assert_eq!((chapter0.start, chapter0.end), (4, 8));
    assert_eq!(chapter0.part.as_deref(), Some("PART I: ORIGINS"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["sections"][0]["name"], "preface");
    assert_eq!(json["missing"][0], "appendix-b");
}
