//! Material data types.
//!
//! A [`Material`] is a named bag of shader properties. When it has a
//! [`parent`](Material::parent) it is a *variant*: only the fields it sets
//! explicitly are stored, everything else is read from the parent chain.

use std::collections::BTreeMap;
use std::fmt;

/// Opaque, identity-comparable handle to a material known to an asset store.
///
/// Two handles are the same material if and only if they compare equal.
/// Handles are minted by the asset store; this crate never interprets the
/// raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(u64);

impl MaterialHandle {
    /// Wraps a raw id issued by an asset store.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material#{}", self.0)
    }
}

/// A typed material property value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MaterialValue {
    /// Single float (metallic, roughness, alpha cutoff).
    Float(f32),
    /// 3-component vector (emissive color).
    Vec3([f32; 3]),
    /// 4-component vector (base color).
    Vec4([f32; 4]),
    /// Texture referenced by asset path.
    Texture(String),
}

/// CPU-side material asset.
///
/// # Example
///
/// ```
/// use unshare_core::material::{Material, MaterialValue};
///
/// let metal = Material::new("Metal")
///     .with_shader("pbr/standard")
///     .with_property("metallic", MaterialValue::Float(1.0));
/// assert_eq!(metal.property("metallic"), Some(&MaterialValue::Float(1.0)));
/// assert!(!metal.is_variant());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Display name. Asset stores keep it equal to the file stem.
    pub name: String,
    /// Shader name. `None` on a variant means "inherit from the parent".
    pub shader: Option<String>,
    /// Explicitly set properties, ordered by key.
    pub properties: BTreeMap<String, MaterialValue>,
    /// Base material for variants.
    pub parent: Option<MaterialHandle>,
}

impl Material {
    /// Creates an empty, non-variant material.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a variant of `parent` with no overrides.
    pub fn variant_of(parent: MaterialHandle, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shader(mut self, shader: impl Into<String>) -> Self {
        self.shader = Some(shader.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: MaterialValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn is_variant(&self) -> bool {
        self.parent.is_some()
    }

    /// Property set on this material itself (an override, for variants).
    pub fn property(&self, key: &str) -> Option<&MaterialValue> {
        self.properties.get(key)
    }

    /// Sets or overrides a property. Returns the previous local value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: MaterialValue,
    ) -> Option<MaterialValue> {
        self.properties.insert(key.into(), value)
    }

}
