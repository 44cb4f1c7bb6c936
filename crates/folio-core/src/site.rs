//! Page assembly
//!
//! Wraps rendered sections in full HTML pages with navigation, and builds
//! the cover page. KaTeX is only pulled in on pages that contain math.

use folio_ast::Block;

use crate::config::BookConfig;
use crate::segment::{
    escape_html, extract_subtitle, render_section, segment_blocks, SectionId,
};

/// KaTeX release loaded from the CDN
pub const KATEX_VERSION: &str = "0.16.9";

/// Name of the cover page file
pub const INDEX_FILE: &str = "index.html";

/// One generated HTML file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Section this page renders; `None` for the cover page
    pub id: Option<SectionId>,
    /// File name relative to the output directory
    pub file_name: String,
    pub title: String,
    pub html: String,
    /// Whether the page loads KaTeX
    pub has_math: bool,
}

/// All pages of a book, plus the sections that could not be located
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    pub pages: Vec<Page>,
    pub missing: Vec<SectionId>,
}

impl Site {
    /// Page for a section, if one was generated
    pub fn page(&self, id: SectionId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == Some(id))
    }
}

/// Reading order of section pages
pub fn nav_order(config: &BookConfig) -> Vec<SectionId> {
    SectionId::all(config.chapter_count())
}

/// Segment the document and render every page of the book
pub fn build_site(blocks: &[Block], config: &BookConfig) -> Site {
    let settings = &config.structure;
    let segmentation = segment_blocks(blocks, settings);

    let mut site = Site::default();
    site.pages.push(Page {
        id: None,
        file_name: INDEX_FILE.to_string(),
        title: config.title.clone(),
        html: index_html(config),
        has_math: false,
    });

    for id in nav_order(config) {
        let Some(section) = segmentation.blocks(blocks, id) else {
            tracing::warn!(section = %id, "section not found, skipping page");
            site.missing.push(id);
            continue;
        };

        let (title, subtitle, skip) = match id {
            SectionId::Preface => ("Preface".to_string(), None, settings.preface_skip),
            SectionId::Chapter(n) => (
                config.chapter_title(n),
                extract_subtitle(section, settings),
                settings.chapter_skip,
            ),
            SectionId::AppendixA => (config.appendices.a.clone(), None, settings.appendix_skip),
            SectionId::AppendixB => (config.appendices.b.clone(), None, settings.appendix_skip),
        };

        let rendered = render_section(section, skip, settings);
        tracing::debug!(
            section = %id,
            blocks = section.len(),
            math = rendered.has_math,
            "rendered section"
        );

        site.pages.push(Page {
            id: Some(id),
            file_name: format!("{}.html", id),
            html: page_html(
                config,
                &title,
                &rendered.html,
                id,
                subtitle.as_deref(),
                rendered.has_math,
            ),
            title,
            has_math: rendered.has_math,
        });
    }

    site
}

/// Full HTML page around a rendered section body
pub fn page_html(
    config: &BookConfig,
    title: &str,
    body: &str,
    page_id: SectionId,
    subtitle: Option<&str>,
    needs_math: bool,
) -> String {
    let base = escape_html(&config.base_url);
    let order = nav_order(config);
    let position = order.iter().position(|id| *id == page_id);

    let prev_link = position
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| order.get(i))
        .map(|prev| {
            format!(
                r#"<a href="{base}/{prev}.html">&larr; {}</a>"#,
                escape_html(&prev.label())
            )
        })
        .unwrap_or_default();
    let next_link = position
        .and_then(|i| order.get(i + 1))
        .map(|next| {
            format!(
                r#"<a href="{base}/{next}.html">{} &rarr;</a>"#,
                escape_html(&next.label())
            )
        })
        .unwrap_or_default();

    let subtitle_html = subtitle
        .map(|s| format!(r#"<p class="subtitle">{}</p>"#, escape_html(s)))
        .unwrap_or_default();
    let math_head = if needs_math { katex_head() } else { String::new() };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} &mdash; {book}</title>
<link rel="stylesheet" href="{base}/style.css">
{math_head}</head>
<body>
<header>
  <nav class="top-nav">
    <a href="{base}/" class="nav-title">{book}</a>
    <div class="nav-links">
      <a href="{base}/">Contents</a>
      <a href="{base}/{download}" class="download-link">Download .docx</a>
    </div>
  </nav>
</header>
<main>
  <h1 class="page-title">{title}</h1>
  {subtitle_html}
  {body}
</main>
<footer>
  <nav class="chapter-nav">
    <div class="nav-prev">{prev_link}</div>
    <div class="nav-toc"><a href="{base}/">Table of Contents</a></div>
    <div class="nav-next">{next_link}</div>
  </nav>
</footer>
</body>
</html>
"#,
        title = escape_html(title),
        book = escape_html(&config.title),
        download = escape_html(&config.download_name),
    )
}

/// Cover page with the table of contents grouped by part
pub fn index_html(config: &BookConfig) -> String {
    let base = escape_html(&config.base_url);
    let mut toc_items = Vec::new();

    let mut current_part = None;
    for chapter in &config.chapters {
        if current_part != Some(&chapter.part) {
            current_part = Some(&chapter.part);
            toc_items.push(format!(
                r#"<li class="part-header">{}</li>"#,
                escape_html(&chapter.part.label())
            ));
        }
        toc_items.push(format!(
            r#"<li><a href="{base}/{}.html">{}</a></li>"#,
            SectionId::Chapter(chapter.number),
            escape_html(&config.chapter_title(chapter.number))
        ));
    }

    toc_items.push(r#"<li class="part-header">Appendices</li>"#.to_string());
    for (id, title) in [
        (SectionId::AppendixA, &config.appendices.a),
        (SectionId::AppendixB, &config.appendices.b),
    ] {
        toc_items.push(format!(
            r#"<li><a href="{base}/{id}.html">{}</a></li>"#,
            escape_html(title)
        ));
    }

    let tagline = match config.tagline.split_last() {
        Some((last, rest)) => {
            let mut lines: Vec<String> = rest.iter().map(|l| escape_html(l)).collect();
            lines.push(format!("<em>{}</em>", escape_html(last)));
            format!(
                r#"<p class="book-subtitle-secondary">{}</p>"#,
                lines.join("<br>")
            )
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{book}</title>
<link rel="stylesheet" href="{base}/style.css">
</head>
<body>
<main class="cover">
  <h1 class="book-title">{book}</h1>
  <p class="book-subtitle">{subtitle}</p>
  {tagline}

  <div class="download-section">
    <a href="{base}/{download}" class="btn-download">Download Original (.docx)</a>
  </div>

  <nav class="toc">
    <h2>Contents</h2>
    <ol>
      <li><a href="{base}/preface.html">Preface</a></li>
      {items}
    </ol>
  </nav>
</main>
</body>
</html>
"#,
        book = escape_html(&config.title),
        subtitle = escape_html(&config.subtitle),
        download = escape_html(&config.download_name),
        items = toc_items.join(""),
    )
}

fn katex_head() -> String {
    format!(
        r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@{v}/dist/katex.min.css">
<script defer src="https://cdn.jsdelivr.net/npm/katex@{v}/dist/katex.min.js"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@{v}/dist/contrib/auto-render.min.js"
  onload="renderMathInElement(document.body, {{delimiters: [{{left: '\\[', right: '\\]', display: true}}, {{left: '\\(', right: '\\)', display: false}}]}});"></script>
"#,
        v = KATEX_VERSION
    )
}
