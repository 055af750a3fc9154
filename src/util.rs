use unicode_width::UnicodeWidthChar;

/// `part / total * 100`, or 0 when there is nothing to divide by
pub fn percent(part: usize, total: usize) -> f64 {
    match total {
        positive if positive > 0 => part as f64 / total as f64 * 100.0,
        _ => 0.0,
    }
}

/// Render a minute count as `"{h}h {m}m"`
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Cut `text` so it occupies at most `max_width` terminal cells, appending an
/// ellipsis when anything was dropped. Wide (CJK) characters count as two cells.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
