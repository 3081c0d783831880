//! Fully-qualified names.
//!
//! FQNs are dotted paths (`com.acme.Widget`). The top-level package is the
//! empty string, so `package_name("Widget") == ""`.

use smol_str::SmolStr;

use super::constants::PACKAGE_SEPARATOR;

/// A fully-qualified name. Cheap to clone; short names are stored inline.
pub type Fqn = SmolStr;

/// The package part of an FQN (everything before the last separator).
pub fn package_name(fqn: &str) -> &str {
    match fqn.rfind(PACKAGE_SEPARATOR) {
        Some(pos) => &fqn[..pos],
        None => "",
    }
}

/// The last segment of an FQN.
pub fn short_name(fqn: &str) -> &str {
    match fqn.rfind(PACKAGE_SEPARATOR) {
        Some(pos) => &fqn[pos + 1..],
        None => fqn,
    }
}

/// Join a package and a simple name. An empty package yields the bare name.
pub fn qualified_name(package: &str, name: &str) -> Fqn {
    if package.is_empty() {
        SmolStr::new(name)
    } else {
        smol_str::format_smolstr!("{package}{PACKAGE_SEPARATOR}{name}")
    }
}

/// True if `fqn` lies strictly below `package` (at any depth).
pub fn is_nested_in(fqn: &str, package: &str) -> bool {
    fqn.len() > package.len() + 1
        && fqn.starts_with(package)
        && fqn[package.len()..].starts_with(PACKAGE_SEPARATOR)
}

/// Whether referencing `referenced` from code in `context` requires an import.
///
/// Top-level symbols and symbols from the same package never do.
pub fn needs_import(context: &str, referenced: &str) -> bool {
    let package = package_name(referenced);
    !package.is_empty() && package != package_name(context)
}
