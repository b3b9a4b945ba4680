//! The main `Container` struct and its associated methods.

use crate::core::{Kind, ResolutionGuard, Value};
use crate::definition::{share, Definition, Entry};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use std::any::{self, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

// One stored entry. `instance` is replaced together with the entry, so a cached
// shared instance can never outlive the definition that produced it. Protected
// definitions are wrapped once here so every `get` hands out the same `Value`.
struct Slot {
  entry: Entry,
  instance: Rc<OnceCell<Value>>,
}

impl Slot {
  fn new(entry: Entry) -> Self {
    let instance = match &entry {
      Entry::Definition(definition) if definition.kind() == Kind::Protected => {
        OnceCell::with_value(Value::new(definition.clone()))
      }
      _ => OnceCell::new(),
    };
    Self {
      entry,
      instance: Rc::new(instance),
    }
  }
}

#[derive(Default)]
struct Inner {
  slots: RefCell<IndexMap<String, Slot>>,
  resolving: RefCell<HashSet<String>>,
}

/// A string-keyed dependency injection container.
///
/// `Container` is a cheap handle: cloning it yields another handle to the same
/// registry. All methods take `&self`, so definitions receive the container
/// they are resolved from and may read or register other entries.
///
/// It is single-threaded by construction; values are shared through `Rc`.
#[derive(Clone, Default)]
pub struct Container {
  inner: Rc<Inner>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container populated from `values`, applying [`Container::set`]
  /// to each pair in iteration order.
  pub fn with_values<I, K, E>(values: I) -> Self
  where
    I: IntoIterator<Item = (K, E)>,
    K: Into<String>,
    E: Into<Entry>,
  {
    let container = Self::new();
    for (id, entry) in values {
      container.set(id, entry);
    }
    container
  }

  /// Returns `true` if both handles refer to the same container.
  pub fn ptr_eq(this: &Self, other: &Self) -> bool {
    Rc::ptr_eq(&this.inner, &other.inner)
  }

  // --- PRIVATE HELPERS ---

  fn invoke(&self, id: &str, definition: &Definition) -> Result<Value> {
    debug!(id, kind = %definition.kind(), "invoking definition");
    definition.invoke(self)
  }

  // Only shared definitions are guarded: their instance cell cannot be
  // initialised re-entrantly. Factories may recurse into their own identifier.
  fn invoke_shared(&self, id: &str, definition: &Definition) -> Result<Value> {
    let _guard = ResolutionGuard::new(&self.inner.resolving, id);
    self.invoke(id, definition)
  }

  fn undefined(id: &str) -> Error {
    Error::UndefinedIdentifier(id.to_owned())
  }

  // --- Registration ---

  /// Stores `entry` under `id`, replacing any previous entry together with its
  /// cached instance. A replaced key keeps its original position in
  /// [`Container::keys`].
  pub fn set(&self, id: impl Into<String>, entry: impl Into<Entry>) {
    let id = id.into();
    let entry = entry.into();
    trace!(id = %id, kind = entry.describe(), "set");
    let previous = self.inner.slots.borrow_mut().insert(id, Slot::new(entry));
    // Dropped outside the borrow: the old entry may own values whose
    // destructors reach back into this container.
    drop(previous);
  }

  /// Stores a plain value under `id`.
  pub fn set_value<T: Any>(&self, id: impl Into<String>, value: T) {
    self.set(id, Value::new(value));
  }

  /// Stores a shared definition under `id`.
  pub fn set_definition<F>(&self, id: impl Into<String>, definition: F)
  where
    F: Fn(&Container) -> Result<Value> + 'static,
  {
    self.set(id, share(definition));
  }

  /// Removes `id`, its classification and any cached instance. Removing an
  /// identifier that is not set does nothing.
  pub fn unset(&self, id: &str) {
    let removed = self.inner.slots.borrow_mut().shift_remove(id);
    if removed.is_some() {
      trace!(id, "unset");
    }
  }

  /// Replaces the definition stored under `id` with one that passes the
  /// original result through `extension`.
  ///
  /// The new definition keeps the original's kind and any cached instance is
  /// discarded, so the next [`Container::get`] resolves through the new chain.
  ///
  /// # Errors
  ///
  /// [`Error::UndefinedIdentifier`] if `id` is not set, and
  /// [`Error::InvalidExtension`] if it holds a plain value or a protected
  /// definition.
  pub fn extend<F>(&self, id: &str, extension: F) -> Result<()>
  where
    F: Fn(Value, &Container) -> Result<Value> + 'static,
  {
    let original = match self.raw(id)? {
      Entry::Definition(definition) if definition.kind() != Kind::Protected => definition,
      _ => return Err(Error::InvalidExtension(id.to_owned())),
    };
    trace!(id, kind = %original.kind(), "extend");
    self.set(id, original.extended(extension));
    Ok(())
  }

  // --- Inspection ---

  /// Returns `true` if `id` has an entry, including one holding null.
  pub fn has(&self, id: &str) -> bool {
    self.inner.slots.borrow().contains_key(id)
  }

  /// All identifiers, in the order they were first set.
  pub fn keys(&self) -> Vec<String> {
    self.inner.slots.borrow().keys().cloned().collect()
  }

  pub fn len(&self) -> usize {
    self.inner.slots.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the entry stored under `id` exactly as it was set. Definitions are
  /// never invoked and cached instances are never substituted.
  pub fn raw(&self, id: &str) -> Result<Entry> {
    self
      .inner
      .slots
      .borrow()
      .get(id)
      .map(|slot| slot.entry.clone())
      .ok_or_else(|| Self::undefined(id))
  }

  // --- Resolution ---

  /// Resolves `id`.
  ///
  /// Plain values are returned as stored. Protected definitions are returned
  /// themselves, wrapped in a [`Value`] that downcasts to [`Definition`]; the
  /// same `Value` is returned on every call until `id` is replaced. Factory
  /// definitions are invoked on every call. Shared definitions are invoked on
  /// the first call and the same instance is returned afterwards.
  ///
  /// Errors returned by a definition are passed through unchanged.
  ///
  /// # Panics
  ///
  /// Panics if a shared definition for `id` ends up resolving `id` again.
  pub fn get(&self, id: &str) -> Result<Value> {
    // The borrow must end before any definition runs.
    let (entry, instance) = {
      let slots = self.inner.slots.borrow();
      let slot = slots.get(id).ok_or_else(|| Self::undefined(id))?;
      (slot.entry.clone(), Rc::clone(&slot.instance))
    };

    let definition = match entry {
      Entry::Value(value) => return Ok(value),
      Entry::Definition(definition) => definition,
    };

    match definition.kind() {
      Kind::Protected => Ok(instance.get_or_init(|| Value::new(definition)).clone()),
      Kind::Factory => self.invoke(id, &definition),
      Kind::Shared => {
        let value = instance.get_or_try_init(|| {
          let value = self.invoke_shared(id, &definition)?;
          debug!(id, "cached shared instance");
          Ok::<_, Error>(value)
        })?;
        Ok(value.clone())
      }
    }
  }

  /// Resolves `id` and downcasts the result to `T`.
  ///
  /// # Errors
  ///
  /// Everything [`Container::get`] returns, plus [`Error::TypeMismatch`] when
  /// the resolved value is not a `T`.
  pub fn get_as<T: Any>(&self, id: &str) -> Result<Rc<T>> {
    self
      .get(id)?
      .downcast::<T>()
      .ok_or_else(|| Error::TypeMismatch {
        id: id.to_owned(),
        expected: any::type_name::<T>(),
      })
  }
}

impl<K, E> FromIterator<(K, E)> for Container
where
  K: Into<String>,
  E: Into<Entry>,
{
  fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
    Self::with_values(iter)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let slots = self.inner.slots.borrow();
    f.debug_map()
      .entries(slots.iter().map(|(id, slot)| (id, slot.entry.describe())))
      .finish()
  }
}
