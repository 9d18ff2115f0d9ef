use complexity_evaluation::normalize_label;

/// One `raw => class` line per label.
pub fn render(labels: &[String]) -> String {
    labels
        .iter()
        .map(|raw| format!("{raw:?} => {}\n", normalize_label(raw)))
        .collect()
}
