//! Material assets and variant resolution.
//!
//! - [`MaterialHandle`]: identity of a material inside an asset store
//! - [`Material`]: name, shader and property overrides, optional parent
//! - [`MaterialValue`]: typed property value
//! - [`MaterialLookup`]: read access to materials by handle, implemented
//!   by asset stores
//!
//! Variants store only what they override. [`resolve_property`] and
//! [`resolve_shader`] walk the parent chain to find the effective value.

mod types;

pub use types::{Material, MaterialHandle, MaterialValue};

/// Maximum parent-chain length followed during resolution.
///
/// Chains longer than this (or cyclic chains produced by hand-edited files)
/// resolve to `None`.
pub const MAX_VARIANT_DEPTH: usize = 32;

/// Read access to materials by handle.
pub trait MaterialLookup {
    /// Returns the material for `handle`, if it is known.
    fn material(&self, handle: MaterialHandle) -> Option<&Material>;
}

/// Effective value of `key` on `handle`, following variant parents.
pub fn resolve_property<'a>(
    lookup: &'a (impl MaterialLookup + ?Sized),
    handle: MaterialHandle,
    key: &str,
) -> Option<&'a MaterialValue> {
    resolve_with(lookup, handle, |m| m.properties.get(key))
}

/// Effective shader of `handle`, following variant parents.
pub fn resolve_shader(
    lookup: &(impl MaterialLookup + ?Sized),
    handle: MaterialHandle,
) -> Option<&str> {
    resolve_with(lookup, handle, |m| m.shader.as_deref())
}

fn resolve_with<'a, L, R>(
    lookup: &'a L,
    handle: MaterialHandle,
    pick: impl Fn(&'a Material) -> Option<R>,
) -> Option<R>
where
    L: MaterialLookup + ?Sized,
{
    let mut current = handle;
    for _ in 0..MAX_VARIANT_DEPTH {
        let material = lookup.material(current)?;
        if let Some(found) = pick(material) {
            return Some(found);
        }
        current = material.parent?;
    }
    log::warn!("Variant chain of {handle} exceeds {MAX_VARIANT_DEPTH} levels");
    None
}
