//! Configuration for callbacks and registries.

/// When a callback bound to an object instance checks that the method exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceValidation {
    /// No check at construction; a missing method surfaces as `UndefinedMethod` when invoked.
    ///
    /// Class-name targets are always checked at construction, so this keeps the historical asymmetry.
    #[default]
    Deferred,
    /// Check with `Object::has_method` at construction and fail with `MethodNotFound`, like class-name targets.
    Eager,
}

/// Callback construction settings.
#[derive(Debug, Clone, Default)]
pub struct CallbackConfig {
    /// Validation policy for instance targets
    pub instance_validation: InstanceValidation,
}

impl CallbackConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the instance validation policy
    pub fn with_instance_validation(mut self, policy: InstanceValidation) -> Self {
        self.instance_validation = policy;
        self
    }
}

/// What a registry does when a class name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Replace,
}

/// Registry settings.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Behavior on duplicate class names
    pub on_duplicate: DuplicatePolicy,
}

impl RegistryConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate registration policy
    pub fn with_on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }
}
