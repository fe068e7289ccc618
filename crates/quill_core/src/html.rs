//! Maps content blocks onto HTML elements

use crate::inline::escape_html;
use crate::markup::{Alignment, ContentBlock, ListKind};
use crate::media::{MediaType, classify, embed_url, resolve_path};

/// Renders a parsed entry body. Paragraph and list item fragments are
/// already sanitized; only attribute values built here get escaped.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        if !out.is_empty() {
            out.push('\n');
        }
        match block {
            ContentBlock::Paragraph { alignment, html } => {
                out.push_str("<p class=\"entry-paragraph");
                if let Some(alignment) = alignment {
                    out.push_str(" align-");
                    out.push_str(alignment_name(*alignment));
                }
                out.push_str("\">");
                out.push_str(html.as_str());
                out.push_str("</p>");
            }
            ContentBlock::List { kind, items } => {
                let tag = match kind {
                    ListKind::Ordered => "ol",
                    ListKind::Unordered => "ul",
                };
                out.push_str("<");
                out.push_str(tag);
                out.push_str(" class=\"entry-list\">");
                for item in items {
                    if item.indent > 0 {
                        out.push_str(&format!(
                            "<li style=\"margin-left:{}px\">",
                            item.indent * 16
                        ));
                    } else {
                        out.push_str("<li>");
                    }
                    out.push_str(item.html.as_str());
                    out.push_str("</li>");
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            ContentBlock::Media { src, caption, .. } => {
                out.push_str(&render_media_card(src, caption.as_deref()));
            }
        }
    }
    out
}

pub fn alignment_name(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}

/// One media element: platform links become privacy-hardened iframes,
/// video files a native player, everything else an image.
pub fn render_media_card(src: &str, caption: Option<&str>) -> String {
    let resolved = resolve_path(src);
    let alt = caption.unwrap_or("");
    let mut out = String::from("<figure class=\"media-card\">");
    if let Some(embed) = embed_url(&resolved) {
        out.push_str("<iframe src=\"");
        out.push_str(&escape_html(&embed));
        out.push_str("\" title=\"");
        if alt.is_empty() {
            out.push_str("Embedded video");
        } else {
            out.push_str(&escape_html(alt));
        }
        out.push_str("\" frameborder=\"0\" allow=\"encrypted-media; gyroscope; picture-in-picture; web-share\" referrerpolicy=\"strict-origin-when-cross-origin\" allowfullscreen></iframe>");
    } else if classify(&resolved) == MediaType::Video {
        out.push_str("<video controls playsinline preload=\"metadata\">");
        out.push_str("<source src=\"");
        out.push_str(&escape_html(&resolved));
        out.push_str("\" type=\"video/mp4\">");
        out.push_str("<source src=\"");
        out.push_str(&escape_html(&resolved));
        out.push_str("\" type=\"video/webm\">");
        out.push_str("Your browser does not support the video tag.");
        out.push_str("</video>");
    } else {
        out.push_str("<img src=\"");
        out.push_str(&escape_html(&resolved));
        out.push_str("\" alt=\"");
        out.push_str(&escape_html(alt));
        out.push_str("\" loading=\"lazy\" decoding=\"async\">");
    }
    if let Some(caption) = caption {
        out.push_str("<figcaption class=\"media-caption\">");
        out.push_str(&escape_html(caption));
        out.push_str("</figcaption>");
    }
    out.push_str("</figure>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    #[test]
    fn paragraph_alignment_becomes_a_class() {
        let html = render_blocks(&parse("[align=center]hi[/align]"));
        assert_eq!(html, "<p class=\"entry-paragraph align-center\">hi</p>");
    }

    #[test]
    fn plain_paragraph_has_no_alignment_class() {
        let html = render_blocks(&parse("hello"));
        assert_eq!(html, "<p class=\"entry-paragraph\">hello</p>");
    }

    #[test]
    fn list_items_indent_in_steps_of_16() {
        let html = render_blocks(&parse("- top\n    - nested"));
        assert_eq!(
            html,
            "<ul class=\"entry-list\"><li>top</li><li style=\"margin-left:32px\">nested</li></ul>"
        );
    }

    #[test]
    fn ordered_list_uses_ol() {
        let html = render_blocks(&parse("1. one\n2. two"));
        assert!(html.starts_with("<ol class=\"entry-list\">"));
        assert!(html.ends_with("</ol>"));
    }

    #[test]
    fn image_block_renders_figure_with_caption() {
        let html = render_blocks(&parse("[image: photo.jpg | At the lake]"));
        assert!(html.contains("<img src=\"/uploads/photo.jpg\" alt=\"At the lake\""));
        assert!(html.contains("loading=\"lazy\""));
        assert!(html.contains("<figcaption class=\"media-caption\">At the lake</figcaption>"));
    }

    #[test]
    fn video_file_renders_native_player() {
        let html = render_blocks(&parse("[video: /uploads/clip.mp4]"));
        assert!(html.contains("<video controls playsinline preload=\"metadata\">"));
        assert!(html.contains("<source src=\"/uploads/clip.mp4\" type=\"video/mp4\">"));
    }

    #[test]
    fn platform_link_renders_iframe() {
        let html = render_blocks(&parse("[embed: https://youtu.be/dQw4w9WgXcQ]"));
        assert!(html.contains("<iframe src=\"https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?"));
        assert!(html.contains("referrerpolicy=\"strict-origin-when-cross-origin\""));
        assert!(html.contains("allowfullscreen"));
    }

    #[test]
    fn embed_url_ampersands_are_escaped_in_attribute() {
        let html = render_media_card("https://youtu.be/abc123", None);
        assert!(html.contains("rel=0&amp;modestbranding=1"));
    }

    #[test]
    fn caption_text_is_escaped() {
        let html = render_media_card("a.jpg", Some("5 < 6 & \"quoted\""));
        assert!(html.contains("5 &lt; 6 &amp; &quot;quoted&quot;"));
    }
}
