//! Filesystem path types.
//!
//! `Dir`, `File`, `Path` and `ExistingPath` are `Valid` types whose base is
//! a conversion function: a value is expanded (`$VAR`, `${VAR}`, leading
//! `~`) and made canonical before the existence predicate runs. A value is
//! an instance only if it is already in canonical form.

use std::path::{Component, Path, PathBuf};

use vela_value::{builtins, Callable, Value};

use crate::factories::Valid;
use crate::synth::SynthesizedType;

/// Module that the path functions are registered under.
pub const PATH_MODULE: &str = "vela.path";

/// Expand and canonicalize `path` using the process environment.
pub fn expand_path(path: &str) -> String {
    expand_path_with(path, |name| std::env::var(name).ok())
}

/// Expand and canonicalize `path`, reading variables through `lookup`.
///
/// Unknown variables are left in place. `~` is replaced with `HOME`.
pub fn expand_path_with(path: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let expanded = expand_vars(path, &lookup);
    let expanded = expand_user(&expanded, &lookup);
    canonicalize(Path::new(&expanded))
        .to_string_lossy()
        .into_owned()
}

fn expand_vars(path: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];
        let (name, consumed) = match after.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            },
            None => {
                let end = after
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                (&after[..end], end)
            }
        };
        match Some(name).filter(|n| !n.is_empty()).and_then(lookup) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('$');
                out.push_str(&after[..consumed]);
            }
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

fn expand_user(path: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let Some(tail) = path.strip_prefix('~') else {
        return path.to_string();
    };
    if !(tail.is_empty() || tail.starts_with('/')) {
        return path.to_string();
    }
    match lookup("HOME") {
        Some(home) => format!("{}{tail}", home.trim_end_matches('/')),
        None => path.to_string(),
    }
}

/// Resolve symlinks when the path exists; otherwise make it absolute and
/// drop `.` and `..` lexically.
fn canonicalize(path: &Path) -> PathBuf {
    if let Ok(real) = std::fs::canonicalize(path) {
        return real;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn path_arg(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected str, found {}", value.type_name()))
}

fn expander() -> Callable {
    Callable::new(PATH_MODULE, "expand_path", |v| {
        Ok(Value::string(expand_path(path_arg(v)?)))
    })
}

fn path_predicate(name: &str, test: fn(&Path) -> bool) -> Callable {
    Callable::new(PATH_MODULE, name, move |v| {
        Ok(Value::Bool(test(Path::new(path_arg(v)?))))
    })
}

/// An existing directory.
pub fn dir() -> SynthesizedType {
    Valid::typed(expander(), path_predicate("is_dir", Path::is_dir)).renamed("Dir")
}

/// An existing regular file.
pub fn file() -> SynthesizedType {
    Valid::typed(expander(), path_predicate("is_file", Path::is_file)).renamed("File")
}

/// Any canonical path, existing or not.
pub fn path() -> SynthesizedType {
    Valid::typed(expander(), builtins::bool()).renamed("Path")
}

/// A path that exists.
pub fn existing_path() -> SynthesizedType {
    Valid::typed(expander(), path_predicate("exists", Path::exists)).renamed("ExistingPath")
}

/// Every path type with its name.
pub fn all() -> Vec<(&'static str, SynthesizedType)> {
    vec![
        ("Dir", dir()),
        ("File", file()),
        ("Path", path()),
        ("ExistingPath", existing_path()),
    ]
}
