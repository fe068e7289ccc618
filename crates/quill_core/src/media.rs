use once_cell::sync::Lazy;
use regex::Regex;

/// Served when an image fails to resolve. Substituted at most once; the
/// fallback itself is never replaced.
pub const FALLBACK_IMAGE: &str = "/images/posts/fallback.svg";

/// Prefix for bare uploaded filenames.
pub const UPLOADS_PREFIX: &str = "/uploads/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Youtube,
    Vimeo,
    Embed,
    Unknown,
}

static YOUTUBE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)").expect("youtube pattern"),
        Regex::new(r"youtube\.com/embed/([^&\n?#]+)").expect("youtube embed pattern"),
    ]
});

static VIMEO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"vimeo\.com/(\d+)").expect("vimeo pattern"),
        Regex::new(r"player\.vimeo\.com/video/(\d+)").expect("vimeo player pattern"),
    ]
});

const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "ogg", "mov"];
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn vimeo_id(url: &str) -> Option<&str> {
    VIMEO_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Classifies a media URL. A platform video id wins over the file
/// extension.
pub fn classify(url: &str) -> MediaType {
    if url.is_empty() {
        return MediaType::Unknown;
    }
    if youtube_id(url).is_some() {
        return MediaType::Youtube;
    }
    if vimeo_id(url).is_some() {
        return MediaType::Vimeo;
    }
    let extension = url
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        return MediaType::Video;
    }
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return MediaType::Image;
    }
    if url.contains("/embed/") {
        return MediaType::Embed;
    }
    MediaType::Unknown
}

/// Rewrites a bare uploaded filename to the upload storage path.
/// Absolute URLs, rooted paths, and platform links pass through.
pub fn resolve_path(src: &str) -> String {
    if src.is_empty() {
        return FALLBACK_IMAGE.to_string();
    }
    let is_bare = !src.starts_with("http")
        && !src.starts_with('/')
        && !src.contains("youtu")
        && !src.contains("vimeo");
    if is_bare {
        format!("{UPLOADS_PREFIX}{src}")
    } else {
        src.to_string()
    }
}

/// Upgrades protocol-relative URLs; everything else is returned as is.
pub fn absolute_url(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_string()
    }
}

/// Privacy-hardened iframe source for a platform video link. The exact
/// query parameters are part of the contract.
pub fn embed_url(url: &str) -> Option<String> {
    if let Some(id) = youtube_id(url) {
        return Some(format!(
            "https://www.youtube-nocookie.com/embed/{id}?rel=0&modestbranding=1&autoplay=0&controls=1&iv_load_policy=3&fs=0&playsinline=1&disablekb=1&cc_load_policy=0"
        ));
    }
    if let Some(id) = vimeo_id(url) {
        return Some(format!(
            "https://player.vimeo.com/video/{id}?title=0&byline=0&portrait=0&badge=0&controls=1&autopause=1&dnt=1"
        ));
    }
    None
}

/// The replacement for a source that failed to load, or `None` when the
/// current source already is the fallback.
pub fn fallback_src(current: &str) -> Option<&'static str> {
    if current == FALLBACK_IMAGE {
        None
    } else {
        Some(FALLBACK_IMAGE)
    }
}
