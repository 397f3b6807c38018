//! User-defined object payloads and the class registry.
//!
//! A [`VariantObject`] converts itself to and from a variant tree (deflate /
//! inflate), so any user type can travel through both wire formats. When a
//! decoder meets a class with no registered constructor it can fall back to
//! an [`ObjectProxy`], which carries the class name, version, and raw
//! parameter tree losslessly until a registry that knows the class picks it
//! up.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::value::Variant;

/// A user-defined type that can cross the wire as a variant.
///
/// `inflate` must be an exact left inverse of `deflate` for every version the
/// type accepts; version migration belongs to the implementing type.
pub trait VariantObject: Send + Sync {
    /// Stable class name used for registry lookup and on the wire.
    fn class_name(&self) -> &str;

    /// Version of the deflated representation this instance produces.
    fn version(&self) -> i32;

    /// Captures all persistent state as a variant tree (by convention a
    /// Mapping).
    fn deflate(&self) -> Variant;

    /// Restores state from a deflated tree written at `version`.
    fn inflate(&mut self, params: Variant, version: i32) -> Result<()>;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Placeholder for an object whose class is not registered.
///
/// Re-encoding a proxy writes back exactly what was read.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectProxy {
    /// Class name from the wire.
    pub class_name: String,
    /// Version from the wire.
    pub version: i32,
    /// The deflated parameter tree, untouched.
    pub params: Box<Variant>,
}

/// The object payload of a variant: a live typed instance or a proxy.
#[derive(Clone)]
pub enum ObjectData {
    /// A registered, constructed instance.
    Typed(Arc<dyn VariantObject>),
    /// An unknown class carried opaquely.
    Proxy(ObjectProxy),
}

impl ObjectData {
    /// Wraps a typed instance.
    #[must_use]
    pub fn typed(instance: impl VariantObject + 'static) -> Self {
        Self::Typed(Arc::new(instance))
    }

    /// The class name, whichever side it lives on.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Self::Typed(instance) => instance.class_name(),
            Self::Proxy(proxy) => &proxy.class_name,
        }
    }

    /// The representation version.
    #[must_use]
    pub fn version(&self) -> i32 {
        match self {
            Self::Typed(instance) => instance.version(),
            Self::Proxy(proxy) => proxy.version,
        }
    }

    /// The deflated parameter tree.
    #[must_use]
    pub fn deflate(&self) -> Variant {
        match self {
            Self::Typed(instance) => instance.deflate(),
            Self::Proxy(proxy) => (*proxy.params).clone(),
        }
    }

    /// True if this payload is a proxy.
    #[must_use]
    pub fn is_proxy(&self) -> bool {
        matches!(self, Self::Proxy(_))
    }
}

impl std::fmt::Debug for ObjectData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Typed(instance) => f
                .debug_struct("Typed")
                .field("class_name", &instance.class_name())
                .field("version", &instance.version())
                .finish(),
            Self::Proxy(proxy) => proxy.fmt(f),
        }
    }
}

/// Constructor registry, keyed by class name.
///
/// Populated once at startup and then shared read-only across decodes.
#[derive(Default)]
pub struct ObjectFactory {
    constructors: HashMap<String, fn() -> Box<dyn VariantObject>>,
}

impl ObjectFactory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its own class name. A later registration for the
    /// same name replaces the earlier one.
    pub fn register<T>(&mut self)
    where
        T: VariantObject + Default + 'static,
    {
        let name = T::default().class_name().to_string();
        self.constructors
            .insert(name, || Box::new(T::default()) as Box<dyn VariantObject>);
    }

    /// Constructs a default instance of `class_name`, if registered.
    #[must_use]
    pub fn create(&self, class_name: &str) -> Option<Box<dyn VariantObject>> {
        self.constructors.get(class_name).map(|ctor| ctor())
    }

    /// True if `class_name` is registered.
    #[must_use]
    pub fn is_registered(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }
}
