//! Cell formatting shared by the text and short renderers

use std::borrow::Cow;
use std::fmt::Display;

use crate::model::{ProcessInfo, UNKNOWN};

/// Longest command shown before truncating with `...`
pub(crate) const MAX_COMMAND_CHARS: usize = 80;

/// Display a value or the unknown marker
pub(crate) fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string())
}

/// Like [`or_unknown`], also treating an empty string as missing.
/// Control characters come back escaped.
pub(crate) fn text_or_unknown(value: Option<&str>) -> Cow<'_, str> {
    value
        .filter(|v| !v.is_empty())
        .map_or(Cow::Borrowed(UNKNOWN), escape_control)
}

/// Replace control characters (ESC, newline, tab, ...) with their escaped
/// form so a collected string can neither start an SGR sequence nor break
/// the one-line-per-entity layout.
pub(crate) fn escape_control(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Scale kilobytes to KB/MB/GB with one decimal above KB.
/// The unit is chosen after rounding, so nothing prints as `1024.0 MB`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_memory(kb: u64) -> String {
    if kb < 1024 {
        return format!("{kb} KB");
    }
    let mb = kb as f64 / 1024.0;
    if (mb * 10.0).round() / 10.0 < 1024.0 {
        format!("{mb:.1} MB")
    } else {
        format!("{:.1} GB", mb / 1024.0)
    }
}

pub(crate) fn format_cpu(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// CPU cell; NaN and infinities count as unknown
pub(crate) fn cpu_or_unknown(percent: Option<f64>) -> String {
    or_unknown(percent.filter(|p| p.is_finite()).map(format_cpu))
}

/// Cut `text` to at most `max` chars, ending in `...` when shortened.
/// Counts chars, not bytes, so multi-byte text never splits.
pub(crate) fn truncate(text: &str, max: usize) -> Cow<'_, str> {
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    Cow::Owned(format!("{kept}..."))
}

/// Display name with control characters escaped
pub(crate) fn name_of(info: &ProcessInfo) -> Cow<'_, str> {
    escape_control(info.display_name())
}

/// Command line if known, else the display name; escaped and truncated
pub(crate) fn command_of(info: &ProcessInfo) -> String {
    let command = info
        .cmdline
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| info.display_name());
    truncate(&escape_control(command), MAX_COMMAND_CHARS).into_owned()
}
