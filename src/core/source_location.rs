//! Call site capture for `logging.googleapis.com/sourceLocation`
//!
//! File and line come from `#[track_caller]`. The function name is looked up
//! by walking the stack for the frame at that file and line, once per call
//! site; later records from the same call site reuse the cached name.

use super::keys;
use super::value::Attr;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::HashMap;
use std::panic::Location;
use std::path::Path;
use std::sync::OnceLock;

type CallSite = (&'static str, u32);

static FUNCTIONS: OnceLock<RwLock<HashMap<CallSite, Option<String>>>> = OnceLock::new();

/// File, line and function of the call that produced a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: Option<Cow<'static, str>>,
}

impl SourceLocation {
    pub fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function: function.map(Cow::Borrowed),
        }
    }

    /// Capture the caller of the outermost `#[track_caller]` function.
    ///
    /// Every public logging entry point is `#[track_caller]`, so this is the
    /// only place the call site is read. The function is omitted when the
    /// binary carries no debug info for the call site.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        let (file, line) = (location.file(), location.line());
        Self {
            file,
            line,
            function: function_at(file, line).map(Cow::Owned),
        }
    }

    /// Render as the `sourceLocation` group. `line` is a decimal string.
    pub fn to_attr(&self) -> Attr {
        let mut attrs = vec![
            Attr::new("file", self.file),
            Attr::new("line", self.line.to_string()),
        ];
        if let Some(function) = &self.function {
            attrs.push(Attr::new("function", function.clone()));
        }
        Attr::group(keys::SOURCE_LOCATION, attrs)
    }
}

fn function_at(file: &'static str, line: u32) -> Option<String> {
    let cache = FUNCTIONS.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(function) = cache.read().get(&(file, line)) {
        return function.clone();
    }

    let function = resolve_function(file, line);
    cache.write().insert((file, line), function.clone());
    function
}

/// Name of the function whose code sits at `file:line` on the current stack.
fn resolve_function(file: &str, line: u32) -> Option<String> {
    let mut found = None;
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if found.is_some() || symbol.lineno() != Some(line) {
                return;
            }
            let same_file = symbol
                .filename()
                .is_some_and(|path| path.ends_with(Path::new(file)));
            if same_file {
                found = symbol.name().map(|name| function_name(&format!("{:#}", name)));
            }
        });
        found.is_none()
    });
    found
}

/// Strip closure markers so a call inside a closure reports its enclosing function.
fn function_name(symbol: &str) -> String {
    let mut name = symbol;
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;

    #[test]
    fn test_caller() {
        let line = line!() + 1;
        let loc = SourceLocation::caller();
        assert_eq!(loc.file, file!());
        assert_eq!(loc.line, line);
        let function = loc.function.expect("function resolved from debug info");
        assert!(
            function.ends_with("source_location::tests::test_caller"),
            "{}",
            function
        );
    }

    #[test]
    fn test_caller_in_closure() {
        let loc = (|| SourceLocation::caller())();
        let function = loc.function.expect("function resolved from debug info");
        assert!(
            function.ends_with("source_location::tests::test_caller_in_closure"),
            "{}",
            function
        );
    }

    #[test]
    fn test_unknown_call_site() {
        assert_eq!(function_at("no/such/file.rs", 1), None);
        assert_eq!(function_at("no/such/file.rs", 1), None);
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name("app::main::{{closure}}::{{closure}}"), "app::main");
        assert_eq!(function_name("app::main"), "app::main");
    }

    #[test]
    fn test_to_attr() {
        let attr = SourceLocation::new("src/main.rs", 12, Some("app::main")).to_attr();
        assert_eq!(attr.key, keys::SOURCE_LOCATION);
        assert_eq!(
            attr.value,
            Value::Group(vec![
                Attr::new("file", "src/main.rs"),
                Attr::new("line", "12"),
                Attr::new("function", "app::main"),
            ])
        );
    }
}
