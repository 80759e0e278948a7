//! Class lookup by name.
//!
//! [`ClassRegistry`] is the read-only interface a [`Callback`](crate::Callback) consumes: resolve an identifier to a
//! [`ClassHandle`] and ask whether a class declares a method. [`Registry`] is the in-memory implementation: an
//! explicitly constructed table that is filled once (`&mut self`) and then shared read-only, typically behind an
//! `Arc`. There is no process-wide registry; tests build their own.
//!
//! ## Notes
//! - Identifiers are canonicalized with `bayrell_core::names`, so `Runtime.Greeter`, `Runtime\Greeter` and
//!   `\Runtime\Greeter` all resolve to the same class.
//! - Lookups never mutate the registry.

use std::collections::HashMap;
use std::sync::Arc;

use bayrell_core::names;

use crate::class::{ClassDescriptor, ClassHandle, RuntimeClass};
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::errors::RegistryError;

/// Read-only class lookup.
pub trait ClassRegistry {
    /// Resolve an identifier to a class, or `None` if nothing is registered under it.
    fn resolve(&self, identifier: &str) -> Option<ClassHandle>;

    /// Return true if `class` declares a method called `name`.
    fn has_method(&self, class: &ClassHandle, name: &str) -> bool {
        class.has_method(name)
    }
}

impl<R: ClassRegistry + ?Sized> ClassRegistry for &R {
    fn resolve(&self, identifier: &str) -> Option<ClassHandle> {
        (**self).resolve(identifier)
    }

    fn has_method(&self, class: &ClassHandle, name: &str) -> bool {
        (**self).has_method(class, name)
    }
}

impl<R: ClassRegistry + ?Sized> ClassRegistry for Arc<R> {
    fn resolve(&self, identifier: &str) -> Option<ClassHandle> {
        (**self).resolve(identifier)
    }

    fn has_method(&self, class: &ClassHandle, name: &str) -> bool {
        (**self).has_method(class, name)
    }
}

impl<R: ClassRegistry + ?Sized> ClassRegistry for Box<R> {
    fn resolve(&self, identifier: &str) -> Option<ClassHandle> {
        (**self).resolve(identifier)
    }

    fn has_method(&self, class: &ClassHandle, name: &str) -> bool {
        (**self).has_method(class, name)
    }
}

/// In-memory class registry keyed by canonical class name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: HashMap<String, ClassHandle>,
    config: RegistryConfig,
}

impl Registry {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            classes: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a class descriptor under its canonical name.
    ///
    /// ## Errors
    /// - [`RegistryError::InvalidClassName`] if the descriptor's name does not canonicalize.
    /// - [`RegistryError::InvalidMethodName`] if a declared method name is not an identifier.
    /// - [`RegistryError::DuplicateClass`] if the name is taken and the policy is [`DuplicatePolicy::Reject`].
    pub fn register(&mut self, descriptor: ClassDescriptor) -> Result<ClassHandle, RegistryError> {
        let Some(canonical) = names::canonical_class_name(descriptor.name()) else {
            return Err(RegistryError::InvalidClassName {
                name: descriptor.name().to_string(),
            });
        };
        if let Some(bad) = descriptor.method_names().into_iter().find(|m| !names::is_identifier(m)) {
            return Err(RegistryError::InvalidMethodName {
                class: canonical,
                method: bad.to_string(),
            });
        }

        if self.classes.contains_key(&canonical) {
            match self.config.on_duplicate {
                DuplicatePolicy::Reject => return Err(RegistryError::DuplicateClass { name: canonical }),
                DuplicatePolicy::Replace => {
                    tracing::warn!(class = %canonical, "replacing registered class");
                }
            }
        }

        let handle = Arc::new(descriptor.renamed(canonical.clone()));
        tracing::debug!(class = %canonical, methods = handle.method_names().len(), "registered class");
        self.classes.insert(canonical, Arc::clone(&handle));
        Ok(handle)
    }

    /// Register a type that describes itself (see `#[runtime_class]`).
    pub fn register_class<T: RuntimeClass>(&mut self) -> Result<ClassHandle, RegistryError> {
        self.register(T::describe())
    }

    /// Return true if `identifier` resolves to a registered class.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Canonical names of all registered classes, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ClassRegistry for Registry {
    fn resolve(&self, identifier: &str) -> Option<ClassHandle> {
        let canonical = names::canonical_class_name(identifier)?;
        self.classes.get(&canonical).cloned()
    }
}
