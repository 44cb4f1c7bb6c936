//! End-to-end loading tests: DOCX package on disk to AST blocks

use folio_ast::{Block, MathNode};
use folio_ooxml::test_utils::{build_docx, wrap_body};
use folio_ooxml::{load_docx, OoxmlError};

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:style w:type="paragraph" w:styleId="Normal" w:default="1"><w:name w:val="Normal"/></w:style>
    <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
    <w:style w:type="paragraph" w:styleId="BodyText"><w:name w:val="Body Text"/></w:style>
</w:styles>"#;

fn write_docx(body: &str, styles: Option<&str>) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.docx");
    let docx = build_docx(wrap_body(body).as_bytes(), styles.map(str::as_bytes)).unwrap();
    std::fs::write(&path, docx).unwrap();
    (dir, path)
}

// =============================================================================
// Style resolution
// =============================================================================

#[test]
fn test_load_resolves_style_display_names() {
    let (_dir, path) = write_docx(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Chapter 1: Waves</w:t></w:r></w:p>
           <w:p><w:pPr><w:pStyle w:val="BodyText"/></w:pPr><w:r><w:t>1.1 Surface</w:t></w:r></w:p>
           <w:p><w:r><w:t>Plain</w:t></w:r></w:p>"#,
        Some(STYLES),
    );

    let blocks = load_docx(&path).unwrap();
    let styles: Vec<&str> = blocks
        .iter()
        .filter_map(Block::as_paragraph)
        .map(|p| p.style.as_str())
        .collect();
    assert_eq!(styles, vec!["Heading 1", "Body Text", "Normal"]);
}

#[test]
fn test_load_without_styles_part_keeps_ids() {
    let (_dir, path) = write_docx(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
           <w:p><w:r><w:t>Body</w:t></w:r></w:p>"#,
        None,
    );

    let blocks = load_docx(&path).unwrap();
    assert_eq!(blocks[0].as_paragraph().unwrap().style, "Heading1");
    assert_eq!(blocks[1].as_paragraph().unwrap().style, "Normal");
}

// =============================================================================
// Content
// =============================================================================

#[test]
fn test_load_preserves_reading_order_and_formatting() {
    let (_dir, path) = write_docx(
        r#"<w:p>
             <w:r><w:rPr><w:b/></w:rPr><w:t>1.2 </w:t></w:r>
             <w:r><w:rPr><w:b/><w:i/></w:rPr><w:t>Energy</w:t></w:r>
           </w:p>
           <w:tbl>
             <w:tr><w:tc><w:p><w:r><w:t>g</w:t></w:r></w:p></w:tc>
                   <w:tc><w:p><w:r><w:t>9.81</w:t></w:r></w:p></w:tc></w:tr>
           </w:tbl>
           <w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        Some(STYLES),
    );

    let blocks = load_docx(&path).unwrap();
    assert_eq!(blocks.len(), 3);

    let Block::Paragraph(p) = &blocks[0] else {
        panic!("Expected paragraph");
    };
    let runs: Vec<_> = p.runs().collect();
    assert!(runs[0].bold && !runs[0].italic);
    assert!(runs[1].bold && runs[1].italic);
    assert_eq!(p.text(), "1.2 Energy");

    let Block::Table(t) = &blocks[1] else {
        panic!("Expected table");
    };
    assert_eq!(t.rows[0], vec!["g".to_string(), "9.81".to_string()]);
}

#[test]
fn test_load_display_math() {
    let (_dir, path) = write_docx(
        r#"<w:p><m:oMathPara><m:oMath>
             <m:f><m:num><m:r><m:t>a</m:t></m:r></m:num><m:den><m:r><m:t>b</m:t></m:r></m:den></m:f>
           </m:oMath></m:oMathPara></w:p>"#,
        None,
    );

    let blocks = load_docx(&path).unwrap();
    let p = blocks[0].as_paragraph().unwrap();
    assert!(p.has_display_math());
    assert!(!p.has_visible_text());

    let math = p.math().next().unwrap();
    assert_eq!(math.root.plain_text(), "ab");
    let MathNode::Container(outer) = &math.root else {
        panic!("Expected container root");
    };
    assert_eq!(outer.len(), 1);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_load_missing_file() {
    let err = load_docx("/nonexistent/book.docx").unwrap_err();
    assert!(matches!(err, OoxmlError::Io(_)));
}

#[test]
fn test_load_not_a_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.docx");
    std::fs::write(&path, b"plain text, not a package").unwrap();

    let err = load_docx(&path).unwrap_err();
    assert!(matches!(err, OoxmlError::Archive(_)));
}
