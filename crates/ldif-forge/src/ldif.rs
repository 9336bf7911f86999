//! LDIF serialization of a directory tree.
//!
//! Records are written depth-first from the root: the root itself, the
//! people unit and its people, then the groups unit and its groups. Each
//! record starts with its `dn:` line, lists every attribute value on its own
//! line, and ends with one blank line.
//!
//! Values are written verbatim. There is no escaping, line folding or
//! base64 encoding; generated values never contain line breaks.

use std::io::{self, Write};

use camino::Utf8Path;

use crate::atomic_io::write_atomic;
use crate::entry::Entry;
use crate::error::OutputError;
use crate::tree::DirectoryTree;

/// Returns every entry of `tree` in serialization order.
#[must_use]
pub fn entries_in_order(tree: &DirectoryTree) -> Vec<&dyn Entry> {
    let mut entries = Vec::new();
    collect_depth_first(tree.root(), &mut entries);
    entries
}

fn collect_depth_first<'a>(entry: &'a dyn Entry, entries: &mut Vec<&'a dyn Entry>) {
    entries.push(entry);
    for child in entry.children() {
        collect_depth_first(child, entries);
    }
}

/// Renders one record, including its trailing blank line.
///
/// # Example
///
/// ```
/// use ldif_forge::{Group, render_record};
///
/// let group = Group {
///     dn: "cn=groupa,ou=groups,dc=example,dc=test".to_owned(),
///     cn: "groupa".to_owned(),
///     members: vec!["uid=ada,ou=people,dc=example,dc=test".to_owned()],
/// };
///
/// assert_eq!(
///     render_record(&group),
///     "dn: cn=groupa,ou=groups,dc=example,dc=test\n\
///      objectClass: groupOfNames\n\
///      cn: groupa\n\
///      member: uid=ada,ou=people,dc=example,dc=test\n\
///      \n"
/// );
/// ```
#[must_use]
pub fn render_record(entry: &dyn Entry) -> String {
    let mut record = String::new();
    push_line(&mut record, "dn", entry.dn());
    for attribute in entry.attributes() {
        for value in attribute.values() {
            push_line(&mut record, attribute.name(), value);
        }
    }
    record.push('\n');
    record
}

fn push_line(record: &mut String, name: &str, value: &str) {
    record.push_str(name);
    record.push_str(": ");
    record.push_str(value);
    record.push('\n');
}

/// Streams the whole tree as LDIF into `writer`.
///
/// # Errors
///
/// Returns any I/O error raised by `writer`.
pub fn write_ldif<W: Write + ?Sized>(tree: &DirectoryTree, writer: &mut W) -> io::Result<()> {
    for entry in entries_in_order(tree) {
        writer.write_all(render_record(entry).as_bytes())?;
    }
    Ok(())
}

/// Renders the whole tree as an LDIF string.
#[must_use]
pub fn to_ldif_string(tree: &DirectoryTree) -> String {
    entries_in_order(tree)
        .into_iter()
        .map(render_record)
        .collect()
}

/// Writes the tree to `path`, replacing any existing file atomically.
///
/// # Errors
///
/// Returns [`OutputError`] if the destination directory cannot be opened or
/// the file cannot be written. An existing file is left untouched on error.
pub fn write_ldif_file(tree: &DirectoryTree, path: &Utf8Path) -> Result<(), OutputError> {
    write_atomic(path, |writer| write_ldif(tree, writer))
}
