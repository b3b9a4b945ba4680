//! Core data structures shared by the container and its definitions.

use std::any::{self, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// A dynamically typed, cheaply clonable handle to a stored or resolved value.
///
/// Cloning a `Value` never clones the underlying data; two clones are the same
/// instance as far as [`Value::ptr_eq`] is concerned.
#[derive(Clone)]
pub struct Value {
  inner: Rc<dyn Any>,
  type_name: &'static str,
}

// Marker stored for `Value::null()`.
struct Null;

impl Value {
  /// Wraps `value` in a new reference-counted allocation.
  pub fn new<T: Any>(value: T) -> Self {
    Self::from_rc(Rc::new(value))
  }

  /// Wraps an existing `Rc` without reallocating, preserving its identity.
  pub fn from_rc<T: Any>(value: Rc<T>) -> Self {
    Self {
      inner: value,
      type_name: any::type_name::<T>(),
    }
  }

  /// The null value.
  pub fn null() -> Self {
    Self {
      inner: Rc::new(Null),
      type_name: "null",
    }
  }

  pub fn is_null(&self) -> bool {
    self.inner.is::<Null>()
  }

  pub fn is<T: Any>(&self) -> bool {
    self.inner.is::<T>()
  }

  /// Returns a typed handle to the same instance, or `None` if the value is
  /// not a `T`.
  pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
    Rc::clone(&self.inner).downcast::<T>().ok()
  }

  /// Name of the type this value was created from.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Returns `true` if both handles point to the same instance.
  pub fn ptr_eq(this: &Self, other: &Self) -> bool {
    Rc::ptr_eq(&this.inner, &other.inner)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_null() {
      f.write_str("Value(null)")
    } else {
      write!(f, "Value({})", self.type_name)
    }
  }
}

/// How the container treats a definition when it is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
  /// Invoked once; the result is cached until the identifier is replaced.
  #[default]
  Shared,
  /// Invoked on every resolution, never cached.
  Factory,
  /// Never invoked; resolution returns the definition itself.
  Protected,
}

impl Kind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Kind::Shared => "shared",
      Kind::Factory => "factory",
      Kind::Protected => "protected",
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An RAII guard to detect and prevent circular dependencies.
///
/// When created, it adds an identifier to the container's resolution stack.
/// If the identifier is already present, a definition is resolving itself
/// (directly or through others) and it panics. When the guard is dropped, it
/// removes the identifier from the stack.
pub(crate) struct ResolutionGuard<'a> {
  stack: &'a RefCell<HashSet<String>>,
  id: String,
}

impl<'a> ResolutionGuard<'a> {
  pub(crate) fn new(stack: &'a RefCell<HashSet<String>>, id: &str) -> Self {
    // `insert` returns `false` if the value was already present.
    let inserted = stack.borrow_mut().insert(id.to_owned());
    if !inserted {
      panic!(
        "Circular dependency detected while resolving identifier \"{}\"",
        id
      );
    }
    Self {
      stack,
      id: id.to_owned(),
    }
  }
}

impl Drop for ResolutionGuard<'_> {
  fn drop(&mut self) {
    self.stack.borrow_mut().remove(&self.id);
  }
}
