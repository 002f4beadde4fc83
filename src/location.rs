//! Call-site names for context-tagged logging
//!
//! [`function_name!`](crate::function_name) expands to the full path of the
//! enclosing function, e.g. `my_app::worker::Worker::run`. The helpers here
//! cut that path into the pieces the façade prefixes messages with: the
//! function itself (`run`) and the type or module that owns it (`Worker`).

const MARKER_SUFFIX: &str = "::__logger_manager_marker";
const CLOSURE_SUFFIX: &str = "::{{closure}}";

/// Strip the marker function and any closure frames from a raw type name
pub fn enclosing_function(raw: &'static str) -> &'static str {
    let mut path = raw.strip_suffix(MARKER_SUFFIX).unwrap_or(raw);
    while let Some(stripped) = path.strip_suffix(CLOSURE_SUFFIX) {
        path = stripped;
    }
    path
}

/// Split a path on `::`, ignoring separators nested inside `<...>`
fn segments(path: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = path.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                parts.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&path[start..]);
    parts
}

/// Last segment of a function path: `app::Worker::run` -> `run`
pub fn function_name(path: &str) -> &str {
    segments(path).last().copied().unwrap_or(path)
}

/// Owner of a function path: the impl type for methods, the module for
/// free functions. `app::Worker::run` -> `Worker`,
/// `<app::Worker as Display>::fmt` -> `Worker`, `run` -> `run`.
pub fn component_name(path: &str) -> &str {
    let parts = segments(path);
    let owner = match parts.len() {
        0 | 1 => return path,
        n => parts[n - 2],
    };

    // `<Type as Trait>` impl blocks
    let owner = match owner.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => inner.split(" as ").next().unwrap_or(inner),
        None => owner,
    };

    // Drop generic arguments, then any leading module path
    let owner = owner.split('<').next().unwrap_or(owner);
    owner.rsplit("::").next().unwrap_or(owner)
}
