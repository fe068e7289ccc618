//! Presentation clamps and badge colors carried with the entry model

const TITLE_SIZE_RANGE: (f64, f64) = (20.0, 56.0);
const LINE_HEIGHT_RANGE: (f64, f64) = (1.2, 2.6);

pub fn clamped_title_size(value: Option<f64>) -> Option<f64> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(TITLE_SIZE_RANGE.0, TITLE_SIZE_RANGE.1))
}

pub fn clamped_line_height(value: Option<f64>) -> Option<f64> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(LINE_HEIGHT_RANGE.0, LINE_HEIGHT_RANGE.1))
}

pub fn mood_color(mood: &str) -> &'static str {
    match mood {
        "happy" => "#4CAF50",
        "sad" => "#2196F3",
        "excited" => "#FF9800",
        "calm" => "#9C27B0",
        "reflective" => "#607D8B",
        "adventurous" => "#FF5722",
        _ => "#666",
    }
}
