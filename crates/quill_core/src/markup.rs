//! Block-level markup: one pass over lines, with an open list run as the
//! only parser state.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::{SanitizedHtml, render_inline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaBlockKind {
    Image,
    Video,
    Embed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub html: SanitizedHtml,
    pub indent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph {
        alignment: Option<Alignment>,
        html: SanitizedHtml,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem>,
    },
    Media {
        kind: MediaBlockKind,
        src: String,
        caption: Option<String>,
    },
}

static LIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([-*•]|\d+\.)\s+(.*)$").expect("list pattern"));
static IMAGE_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[image:\s*(.+?)\s*\]$").expect("image pattern"));
static VIDEO_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[video:\s*(.+?)\s*\]$").expect("video pattern"));
static EMBED_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[embed:\s*(.+?)\s*\]$").expect("embed pattern"));
static ALIGN_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[align=(left|center|right)\](.*)\[/align\]$").expect("align pattern"));

struct ListRun {
    kind: ListKind,
    items: Vec<ListItem>,
}

/// Parses raw entry text into content blocks. Never fails; malformed
/// markup degrades to literal text.
pub fn parse(raw: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut open_run: Option<ListRun> = None;

    for line in raw.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_run(&mut blocks, &mut open_run);
            continue;
        }

        // Indentation lives in the untrimmed line.
        if let Some(caps) = LIST_LINE.captures(line) {
            let indent = caps[1].chars().count() / 2;
            let kind = if caps[2].ends_with('.') {
                ListKind::Ordered
            } else {
                ListKind::Unordered
            };
            let item = ListItem {
                html: render_inline(&caps[3]),
                indent,
            };
            match open_run.as_mut() {
                Some(run) if run.kind == kind => run.items.push(item),
                _ => {
                    flush_run(&mut blocks, &mut open_run);
                    open_run = Some(ListRun {
                        kind,
                        items: vec![item],
                    });
                }
            }
            continue;
        }

        flush_run(&mut blocks, &mut open_run);

        if let Some(caps) = IMAGE_DIRECTIVE.captures(trimmed) {
            let (src, caption) = split_image_payload(&caps[1]);
            blocks.push(ContentBlock::Media {
                kind: MediaBlockKind::Image,
                src,
                caption,
            });
        } else if let Some(caps) = VIDEO_DIRECTIVE.captures(trimmed) {
            blocks.push(ContentBlock::Media {
                kind: MediaBlockKind::Video,
                src: caps[1].to_string(),
                caption: None,
            });
        } else if let Some(caps) = EMBED_DIRECTIVE.captures(trimmed) {
            blocks.push(ContentBlock::Media {
                kind: MediaBlockKind::Embed,
                src: caps[1].to_string(),
                caption: None,
            });
        } else if let Some(caps) = ALIGN_DIRECTIVE.captures(trimmed) {
            blocks.push(ContentBlock::Paragraph {
                alignment: parse_alignment(&caps[1]),
                html: render_inline(&caps[2]),
            });
        } else {
            blocks.push(ContentBlock::Paragraph {
                alignment: None,
                html: render_inline(line),
            });
        }
    }

    flush_run(&mut blocks, &mut open_run);
    blocks
}

fn flush_run(blocks: &mut Vec<ContentBlock>, open_run: &mut Option<ListRun>) {
    if let Some(run) = open_run.take() {
        blocks.push(ContentBlock::List {
            kind: run.kind,
            items: run.items,
        });
    }
}

fn split_image_payload(payload: &str) -> (String, Option<String>) {
    match payload.split_once('|') {
        Some((src, caption)) => {
            let caption = caption.trim();
            (
                src.trim().to_string(),
                if caption.is_empty() {
                    None
                } else {
                    Some(caption.to_string())
                },
            )
        }
        None => (payload.trim().to_string(), None),
    }
}

fn parse_alignment(value: &str) -> Option<Alignment> {
    match value.to_ascii_lowercase().as_str() {
        "left" => Some(Alignment::Left),
        "center" => Some(Alignment::Center),
        "right" => Some(Alignment::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_html(block: &ContentBlock) -> &str {
        match block {
            ContentBlock::Paragraph { html, .. } => html.as_str(),
            _ => panic!("expected paragraph"),
        }
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n\t\n").is_empty());
    }

    #[test]
    fn plain_lines_become_paragraphs_in_order() {
        let blocks = parse("first\nsecond\n\nthird");
        assert_eq!(blocks.len(), 3);
        assert_eq!(paragraph_html(&blocks[0]), "first");
        assert_eq!(paragraph_html(&blocks[1]), "second");
        assert_eq!(paragraph_html(&blocks[2]), "third");
        for block in &blocks {
            match block {
                ContentBlock::Paragraph { alignment, .. } => assert!(alignment.is_none()),
                _ => panic!("expected paragraph"),
            }
        }
    }

    #[test]
    fn consecutive_list_lines_collapse() {
        let blocks = parse("- one\n- two\n- three");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            ContentBlock::List { kind, items } => {
                assert_eq!(*kind, ListKind::Unordered);
                assert_eq!(items.len(), 3);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn blank_line_splits_list_runs() {
        let blocks = parse("- one\n\n- two");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], ContentBlock::List { .. }));
        assert!(matches!(blocks[1], ContentBlock::List { .. }));
    }

    #[test]
    fn kind_change_starts_a_new_list() {
        let blocks = parse("- a\n* b\n1. c\n2. d");
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            ContentBlock::List { kind, items } => {
                assert_eq!(*kind, ListKind::Unordered);
                assert_eq!(items.len(), 2);
            }
            _ => panic!("expected list"),
        }
        match &blocks[1] {
            ContentBlock::List { kind, items } => {
                assert_eq!(*kind, ListKind::Ordered);
                assert_eq!(items.len(), 2);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn indent_counts_pairs_of_leading_spaces() {
        let blocks = parse("- top\n    - nested\n      - deeper");
        match &blocks[0] {
            ContentBlock::List { items, .. } => {
                assert_eq!(items[0].indent, 0);
                assert_eq!(items[1].indent, 2);
                assert_eq!(items[2].indent, 3);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn bullet_character_is_a_list_marker() {
        let blocks = parse("• dot");
        assert!(matches!(
            &blocks[0],
            ContentBlock::List {
                kind: ListKind::Unordered,
                ..
            }
        ));
    }

    #[test]
    fn image_directive_with_caption() {
        let blocks = parse("[image: /uploads/a.jpg | A caption]");
        assert_eq!(
            blocks[0],
            ContentBlock::Media {
                kind: MediaBlockKind::Image,
                src: "/uploads/a.jpg".to_string(),
                caption: Some("A caption".to_string()),
            }
        );
    }

    #[test]
    fn image_directive_without_caption() {
        let blocks = parse("[image: photo.png]");
        assert_eq!(
            blocks[0],
            ContentBlock::Media {
                kind: MediaBlockKind::Image,
                src: "photo.png".to_string(),
                caption: None,
            }
        );
    }

    #[test]
    fn video_and_embed_directives() {
        let blocks = parse("[video: https://example.com/v.mp4]\n[embed: https://youtu.be/abc]");
        assert_eq!(
            blocks[0],
            ContentBlock::Media {
                kind: MediaBlockKind::Video,
                src: "https://example.com/v.mp4".to_string(),
                caption: None,
            }
        );
        assert_eq!(
            blocks[1],
            ContentBlock::Media {
                kind: MediaBlockKind::Embed,
                src: "https://youtu.be/abc".to_string(),
                caption: None,
            }
        );
    }

    #[test]
    fn directives_are_case_insensitive() {
        let blocks = parse("[IMAGE: a.jpg]\n[Align=CENTER]middled[/ALIGN]");
        assert!(matches!(blocks[0], ContentBlock::Media { .. }));
        match &blocks[1] {
            ContentBlock::Paragraph { alignment, html } => {
                assert_eq!(*alignment, Some(Alignment::Center));
                assert_eq!(html.as_str(), "middled");
            }
            _ => panic!("expected paragraph"),
        }
    }

    #[test]
    fn aligned_text_is_inline_rendered() {
        let blocks = parse("[align=right][u]hi[/u][/align]");
        match &blocks[0] {
            ContentBlock::Paragraph { alignment, html } => {
                assert_eq!(*alignment, Some(Alignment::Right));
                assert_eq!(html.as_str(), "<u>hi</u>");
            }
            _ => panic!("expected paragraph"),
        }
    }

    #[test]
    fn list_line_wins_over_directives() {
        // The marker makes it a list item even though the text would
        // otherwise match the image directive.
        let blocks = parse("- [image: a.jpg]");
        assert!(matches!(blocks[0], ContentBlock::List { .. }));
    }

    #[test]
    fn list_flushes_before_media_block() {
        let blocks = parse("- a\n[image: pic.jpg]\n- b");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], ContentBlock::List { .. }));
        assert!(matches!(blocks[1], ContentBlock::Media { .. }));
        assert!(matches!(blocks[2], ContentBlock::List { .. }));
    }

    #[test]
    fn paragraph_keeps_untrimmed_line_for_inline_rendering() {
        let blocks = parse("  padded  ");
        assert_eq!(paragraph_html(&blocks[0]), "  padded  ");
    }

    #[test]
    fn unterminated_directive_is_a_paragraph() {
        let blocks = parse("[image: broken");
        assert_eq!(paragraph_html(&blocks[0]), "[image: broken");
    }
}
