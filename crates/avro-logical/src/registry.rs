//! Name → implementation bindings for logical types.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use log::{debug, trace, warn};

use crate::error::LogicalTypeError;
use crate::logical::{Builtin, LogicalType};
use crate::schema::Schema;

/// Resolves `logicalType` names to shared implementations.
///
/// Bindings are append-only: a name, once bound, keeps its implementation
/// for the life of the registry. Build the registry fully before parsing
/// schemas with it; lookups take `&self` and are safe to share across threads.
#[derive(Debug, Clone)]
pub struct LogicalTypeRegistry {
    types: HashMap<String, Arc<dyn LogicalType>>,
}

impl Default for LogicalTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicalTypeRegistry {
    /// A registry holding every [`Builtin`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for builtin in Builtin::ALL {
            registry
                .types
                .insert(builtin.name().to_string(), builtin.implementation());
        }
        debug!("registered builtin logical types: {:?}", registry.names());
        registry
    }

    /// A registry with no bindings.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Process-wide default registry with the builtin set. Never mutated.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<LogicalTypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Binds `logical_type` under its own name.
    pub fn register(&mut self, logical_type: Arc<dyn LogicalType>) -> Result<(), LogicalTypeError> {
        let name = logical_type.name().to_string();
        if self.types.contains_key(&name) {
            return Err(LogicalTypeError::AlreadyRegistered(name));
        }
        debug!("registered logical type '{name}'");
        self.types.insert(name, logical_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn LogicalType>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Looks up `name` and validates it against the physical `base` schema.
    pub fn resolve(
        &self,
        name: &str,
        base: &Schema,
    ) -> Result<Arc<dyn LogicalType>, LogicalTypeError> {
        let logical_type = self
            .types
            .get(name)
            .ok_or_else(|| LogicalTypeError::UnsupportedLogicalType(name.to_string()))?;
        logical_type.validate_schema(base)?;
        trace!("resolved logical type '{name}' on {}", base.kind());
        Ok(Arc::clone(logical_type))
    }

    /// Like [`resolve`](Self::resolve), but an unknown name or an invalid
    /// combination yields `None` and the logical type is dropped.
    pub fn resolve_lenient(&self, name: &str, base: &Schema) -> Option<Arc<dyn LogicalType>> {
        match self.resolve(name, base) {
            Ok(logical_type) => Some(logical_type),
            Err(err) => {
                warn!("dropping logical type '{name}', reading as {}: {err}", base.kind());
                None
            }
        }
    }

    /// Strict or lenient resolution selected by `ignore_invalid_or_unknown`.
    pub fn resolve_with(
        &self,
        name: &str,
        base: &Schema,
        ignore_invalid_or_unknown: bool,
    ) -> Result<Option<Arc<dyn LogicalType>>, LogicalTypeError> {
        if ignore_invalid_or_unknown {
            Ok(self.resolve_lenient(name, base))
        } else {
            self.resolve(name, base).map(Some)
        }
    }
}
