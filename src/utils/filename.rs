//! Upload name handling: sanitizing client-supplied names and deriving
//! the type tag that goes out with `file_uploaded`.

const WINDOWS_DEVICES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduce a client filename to a flat, ASCII-only name that is safe to
/// join onto the uploads directory. May return an empty string.
pub fn secure_filename(raw: &str) -> String {
    let flat: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flat.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let name = kept.trim_matches(|c| c == '.' || c == '_');

    let stem = name.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if !name.is_empty() && WINDOWS_DEVICES.contains(&stem.as_str()) {
        return format!("_{name}");
    }
    name.to_string()
}

/// Lower-cased extension including the dot, or "" when there is none.
/// Leading dots belong to the name (`.bashrc` has no extension).
pub fn file_type(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let body = base.trim_start_matches('.');
    match body.rfind('.') {
        Some(i) => body[i..].to_lowercase(),
        None    => String::new(),
    }
}
