//! Project name validation.
//!
//! Generated projects are npm packages, so the directory name doubles as the
//! package name and must satisfy npm's naming rules for *new* packages. The
//! rules below follow `validate-npm-package-name`: its hard errors and its
//! legacy warnings both reject a name, since a legacy-only name cannot be
//! published fresh.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Names that would shadow a core dependency of the generated project.
pub const RESERVED_NAMES: &[&str] = &["react", "react-dom"];

const BLOCKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

const MAX_LENGTH: usize = 214;

const SPECIAL_CHARACTERS: &[char] = &['~', '\'', '!', '(', ')', '*'];

// Node core modules. A package with one of these names can never be
// `require`d by its bare name.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// A validated project name. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate `name` against the npm rules and the reserved-name list.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidName`] with every violated rule
    /// - [`DomainError::ReservedName`] when the name is in [`RESERVED_NAMES`]
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();

        let problems = naming_problems(&name);
        if !problems.is_empty() {
            return Err(DomainError::InvalidName { name, problems });
        }

        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(DomainError::ReservedName { name });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Every npm naming rule `name` violates, in rule order. Empty when valid.
pub fn naming_problems(name: &str) -> Vec<String> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lowered = name.to_lowercase();
    if BLOCKLISTED_NAMES.contains(&lowered.as_str()) {
        problems.push(format!("{name} is a blocklisted name"));
    }
    if NODE_BUILTINS.contains(&lowered.as_str()) {
        problems.push(format!("{name} is a core module name"));
    }
    if name.chars().count() > MAX_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {MAX_LENGTH} characters"
        ));
    }
    if lowered != name {
        problems.push("name can no longer contain capital letters".to_string());
    }

    let unscoped = name.rsplit('/').next().unwrap_or(name);
    if unscoped.contains(SPECIAL_CHARACTERS) {
        problems.push(r#"name can no longer contain special characters ("~'!()*")"#.to_string());
    }

    if !is_url_friendly(name) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    problems
}

// Characters `encodeURIComponent` leaves untouched.
fn is_uri_component_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}

fn is_url_friendly(name: &str) -> bool {
    if name.chars().all(is_uri_component_char) {
        return true;
    }

    // `@scope/package` is fine as long as each half is.
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, package)) => {
            !scope.is_empty()
                && !package.is_empty()
                && scope.chars().all(is_uri_component_char)
                && package.chars().all(is_uri_component_char)
        }
        None => false,
    }
}
