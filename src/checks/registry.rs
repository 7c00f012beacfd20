use std::sync::Arc;

use indexmap::IndexMap;

use super::{Check, CheckError, CheckInput, CheckResult, Fix};

/// Checks partitioned by fail-fast flag, each side sorted by `(priority, name)`.
#[derive(Clone, Default)]
pub struct Partition {
    pub critical: Vec<Arc<dyn Check>>,
    pub normal: Vec<Arc<dyn Check>>,
}

impl Partition {
    #[must_use]
    pub fn len(&self) -> usize {
        self.critical.len() + self.normal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.normal.is_empty()
    }
}

/// Mutable set of checks keyed by name.
///
/// Registering a name that is already present replaces the earlier
/// definition. Build it, then take a [`RegistrySnapshot`] for a run.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: IndexMap<String, Arc<dyn Check>>,
}

impl CheckRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by name. Returns the replaced definition, if any.
    pub fn register<C: Check + 'static>(&mut self, check: C) -> Option<Arc<dyn Check>> {
        self.register_arc(Arc::new(check))
    }

    pub fn register_arc(&mut self, check: Arc<dyn Check>) -> Option<Arc<dyn Check>> {
        let name = check.name().to_string();
        self.checks.insert(name, check)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Check>> {
        self.checks.shift_remove(name)
    }

    /// Override the priority of a registered check. Returns `false` if unknown.
    pub fn set_priority(&mut self, name: &str, priority: i32) -> bool {
        let Some(slot) = self.checks.get_mut(name) else {
            return false;
        };
        let inner = Arc::clone(slot);
        *slot = Arc::new(Reprioritized { inner, priority });
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Check>> {
        self.checks.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// All checks in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<dyn Check>> {
        self.checks.values().cloned().collect()
    }

    /// Split into critical and normal checks.
    ///
    /// `fail_fast()` is read exactly once per check, so every check lands in
    /// exactly one side. The returned vectors are fresh copies.
    #[must_use]
    pub fn split(&self) -> Partition {
        let (mut critical, mut normal): (Vec<_>, Vec<_>) =
            self.checks.values().cloned().partition(|c| c.fail_fast());
        sort_checks(&mut critical);
        sort_checks(&mut normal);
        Partition { critical, normal }
    }

    /// Remove every check.
    pub fn reset(&mut self) {
        self.checks.clear();
    }

    /// Freeze the current set for a run.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            partition: Arc::new(self.split()),
        }
    }
}

fn sort_checks(checks: &mut [Arc<dyn Check>]) {
    checks.sort_by(|a, b| {
        a.priority()
            .cmp(&b.priority())
            .then_with(|| a.name().cmp(b.name()))
    });
}

/// Read-only, cheaply cloneable view of a registry, shared by all workers.
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
    partition: Arc<Partition>,
}

impl RegistrySnapshot {
    #[must_use]
    pub fn critical(&self) -> &[Arc<dyn Check>] {
        &self.partition.critical
    }

    #[must_use]
    pub fn normal(&self) -> &[Arc<dyn Check>] {
        &self.partition.normal
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.partition.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partition.is_empty()
    }

    #[must_use]
    pub fn is_critical(&self, name: &str) -> bool {
        self.partition.critical.iter().any(|c| c.name() == name)
    }

    /// Critical checks followed by normal checks, in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Check>> {
        self.partition
            .critical
            .iter()
            .chain(self.partition.normal.iter())
    }
}

struct Reprioritized {
    inner: Arc<dyn Check>,
    priority: i32,
}

impl Check for Reprioritized {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn fail_fast(&self) -> bool {
        self.inner.fail_fast()
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckResult, CheckError> {
        self.inner.run(input)
    }

    fn fixer(&self) -> Option<&dyn Fix> {
        self.inner.fixer()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
