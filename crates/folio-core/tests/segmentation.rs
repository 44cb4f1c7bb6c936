//! Partition tests over a synthetic manuscript laid out like the real book:
//! front matter, a preface at fixed paragraph offsets, fifteen chapters
//! grouped under part headings, and two appendices.

use folio_ast::{Block, Paragraph, Run, Table};
use folio_core::config::{BookConfig, ParagraphRange};
use folio_core::segment::{locate_anchors, segment, SectionId};

fn para(style: &str, text: &str) -> Block {
    Block::Paragraph(Paragraph::new(style).with_run(Run::plain(text)))
}

/// Returns the blocks and a config whose preface offsets match them
fn manuscript() -> (Vec<Block>, BookConfig) {
    let config = BookConfig::default();
    let mut blocks = vec![
        para("Title", "Ocean From Motion"),
        para("TOC 1", "Preface"),
        para("TOC 1", "Chapter 0"),
    ];

    let preface_start = blocks.len();
    blocks.push(para("Normal", "PREFACE"));
    blocks.push(para("Normal", "Why this book."));
    blocks.push(Block::Paragraph(Paragraph::new("Normal")));
    let preface_end = blocks.len();

    for chapter in &config.chapters {
        let starts_part = config
            .chapters
            .iter()
            .find(|c| c.part == chapter.part)
            .is_some_and(|first| first.number == chapter.number);
        if starts_part {
            blocks.push(para(
                "Heading 1",
                &format!("PART {}: {}", chapter.part.number, chapter.part.name.to_uppercase()),
            ));
        }
        blocks.push(para("Heading 1", &format!("Chapter {}", chapter.number)));
        blocks.push(para("Normal", &chapter.title));
        blocks.push(para("Body Text", &format!("{}.1 Overview", chapter.number)));
        blocks.push(Block::Table(Table {
            rows: vec![vec!["k".to_string(), "v".to_string()]],
        }));
    }

    blocks.push(para("Normal", "APPENDIX A"));
    blocks.push(para("Normal", "Mathematical Constants"));
    blocks.push(para("Normal", "APPENDIX B"));
    blocks.push(para("Normal", "Notation Reference"));

    let mut config = config;
    // paragraph index equals block index before the first table
    config.structure.preface = ParagraphRange {
        start: preface_start,
        end: preface_end,
    };
    (blocks, config)
}

#[test]
fn test_chapters_partition_the_chapter_span() {
    let (blocks, config) = manuscript();
    let anchors = locate_anchors(&blocks, &config.structure);
    let seg = segment(&anchors, &config.structure);

    let chapters: Vec<_> = seg.chapters().collect();
    assert_eq!(chapters.len(), 15);

    for (n, range) in &chapters {
        let Block::Paragraph(first) = &blocks[range.start] else {
            panic!("Expected paragraph at chapter start");
        };
        assert!(first.text().starts_with(&format!("Chapter {}", n)));
    }

    // Each chapter ends where the next begins, or at the part heading just before it
    for pair in chapters.windows(2) {
        let (_, prev) = &pair[0];
        let (_, next) = &pair[1];
        if prev.end != next.start {
            assert_eq!(prev.end + 1, next.start);
            let Block::Paragraph(part) = &blocks[prev.end] else {
                panic!("Expected part heading");
            };
            assert!(part.text().starts_with("PART"));
        }
    }

    let last = chapters.last().unwrap().1;
    assert_eq!(Some(last.end), anchors.appendix_a);
}

#[test]
fn test_parts_follow_part_headings() {
    let (blocks, config) = manuscript();
    let seg = segment(&locate_anchors(&blocks, &config.structure), &config.structure);

    assert_eq!(seg.parts.get(&0).map(String::as_str), Some("PART I: ORIENTATION"));
    assert_eq!(seg.parts.get(&6).map(String::as_str), Some("PART II: THE MOTION CALENDAR"));
    assert_eq!(seg.parts.get(&7).map(String::as_str), Some("PART III: SYSTEMS"));
    assert_eq!(seg.parts.get(&14).map(String::as_str), Some("PART IV: MEANING"));
}

#[test]
fn test_preface_and_appendices() {
    let (blocks, config) = manuscript();
    let seg = segment(&locate_anchors(&blocks, &config.structure), &config.structure);

    assert_eq!(seg.range(SectionId::Preface), Some(3..6));

    let a = seg.range(SectionId::AppendixA).unwrap();
    let b = seg.range(SectionId::AppendixB).unwrap();
    assert_eq!(a.end, b.start);
    assert_eq!(b.end, blocks.len());
    assert_eq!(a.len(), 2);
}

#[test]
fn test_segmentation_is_deterministic() {
    let (blocks, config) = manuscript();
    let first = segment(&locate_anchors(&blocks, &config.structure), &config.structure);
    let second = segment(&locate_anchors(&blocks, &config.structure), &config.structure);
    assert_eq!(first, second);
}

#[test]
fn test_section_ids_serialize_as_page_names() {
    let ids = SectionId::all(1);
    let json = serde_json::to_string(&ids).unwrap();
    assert_eq!(json, r#"["preface","chapter-0","appendix-a","appendix-b"]"#);
}
