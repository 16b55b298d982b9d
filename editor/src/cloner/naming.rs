//! Collision-free names for duplicated assets.
//!
//! A trailing `" <digits>"` on an asset name is treated as a generated
//! suffix. All names sharing the same base form a family, and a new member
//! of a family takes the lowest free suffix.

use std::collections::HashSet;

/// Name with a trailing `" <digits>"` suffix removed.
///
/// Only one suffix is stripped, and the remaining base is never empty.
///
/// ```
/// use unshare_editor::cloner::base_name;
///
/// assert_eq!(base_name("Metal 12"), "Metal");
/// assert_eq!(base_name("Metal"), "Metal");
/// assert_eq!(base_name("Metal Sheet 2"), "Metal Sheet");
/// assert_eq!(base_name("Metal 1 2"), "Metal 1");
/// assert_eq!(base_name("42"), "42");
/// ```
pub fn base_name(name: &str) -> &str {
    let digits = name.len() - name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return name;
    }
    let head = &name[..name.len() - digits];
    match head.strip_suffix(' ') {
        Some(base) if !base.is_empty() => base,
        _ => name,
    }
}

/// Case-insensitive name comparison used for asset and folder names.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// First free name for `desired` among `existing`.
///
/// If `desired` is free it is returned unchanged, otherwise `"{desired} 1"`,
/// `"{desired} 2"`, ... are probed in order. A candidate equal to any
/// existing name is taken, whatever family that name belongs to, so a
/// numbered `desired` such as `"Metal 1"` never lands on an existing
/// `"Metal 1"` of the `"Metal"` family. Comparisons ignore case,
/// so the result never clashes with an existing name on a case-insensitive
/// file system.
pub fn allocate_name<S: AsRef<str>>(desired: &str, existing: &[S]) -> String {
    let taken: HashSet<String> = existing
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();
    if !taken.contains(&desired.to_lowercase()) {
        return desired.to_owned();
    }

    // At most `existing.len() + 1` probes.
    let mut number = 1usize;
    loop {
        let candidate = format!("{desired} {number}");
        if !taken.contains(&candidate.to_lowercase()) {
            return candidate;
        }
        number += 1;
    }
}
