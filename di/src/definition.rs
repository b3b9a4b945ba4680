//! Definitions and the decorators that classify them.

use crate::container::Container;
use crate::core::{Kind, Value};
use crate::error::Result;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

type Callable = dyn Fn(&Container) -> Result<Value>;

/// A callable that produces a value when invoked with the container.
///
/// The [`Kind`] is fixed when the definition is created through [`share`],
/// [`factory`] or [`protect`] and decides how [`Container::get`] treats it.
/// Cloning a definition keeps the same callable; use [`Definition::ptr_eq`] to
/// compare identities.
#[derive(Clone)]
pub struct Definition {
  kind: Kind,
  callable: Rc<Callable>,
}

impl Definition {
  fn new<F>(kind: Kind, callable: F) -> Self
  where
    F: Fn(&Container) -> Result<Value> + 'static,
  {
    Self {
      kind,
      callable: Rc::new(callable),
    }
  }

  pub fn kind(&self) -> Kind {
    self.kind
  }

  /// Calls the definition directly, regardless of its kind.
  pub fn invoke(&self, container: &Container) -> Result<Value> {
    (self.callable)(container)
  }

  /// Returns `true` if both definitions wrap the same callable.
  pub fn ptr_eq(this: &Self, other: &Self) -> bool {
    Rc::ptr_eq(&this.callable, &other.callable)
  }

  /// Composes `extension` over this definition, keeping its kind.
  pub(crate) fn extended<F>(self, extension: F) -> Self
  where
    F: Fn(Value, &Container) -> Result<Value> + 'static,
  {
    let original = self.callable;
    Self::new(self.kind, move |container| {
      let value = original(container)?;
      extension(value, container)
    })
  }
}

impl fmt::Debug for Definition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Definition")
      .field("kind", &self.kind)
      .field("callable", &Rc::as_ptr(&self.callable))
      .finish()
  }
}

/// Marks `callable` as a shared definition: invoked once, then cached.
///
/// This is also what [`Container::set_definition`] does; `share` exists to make
/// the intent explicit at the registration site.
pub fn share<F>(callable: F) -> Definition
where
  F: Fn(&Container) -> Result<Value> + 'static,
{
  Definition::new(Kind::Shared, callable)
}

/// Marks `callable` as a factory: invoked afresh on every resolution.
pub fn factory<F>(callable: F) -> Definition
where
  F: Fn(&Container) -> Result<Value> + 'static,
{
  Definition::new(Kind::Factory, callable)
}

/// Marks `callable` as protected: the container stores and returns it as an
/// opaque value and never invokes it.
pub fn protect<F>(callable: F) -> Definition
where
  F: Fn(&Container) -> Result<Value> + 'static,
{
  Definition::new(Kind::Protected, callable)
}

/// What is stored under an identifier, exactly as it was set.
#[derive(Debug, Clone)]
pub enum Entry {
  Value(Value),
  Definition(Definition),
}

impl Entry {
  /// Shorthand for `Entry::Value(Value::new(value))`.
  pub fn value<T: Any>(value: T) -> Self {
    Entry::Value(Value::new(value))
  }

  pub fn null() -> Self {
    Entry::Value(Value::null())
  }

  pub fn as_value(&self) -> Option<&Value> {
    match self {
      Entry::Value(value) => Some(value),
      Entry::Definition(_) => None,
    }
  }

  pub fn as_definition(&self) -> Option<&Definition> {
    match self {
      Entry::Definition(definition) => Some(definition),
      Entry::Value(_) => None,
    }
  }

  // Label used in trace events.
  pub(crate) fn describe(&self) -> &'static str {
    match self {
      Entry::Value(_) => "value",
      Entry::Definition(definition) => definition.kind().as_str(),
    }
  }
}

impl From<Value> for Entry {
  fn from(value: Value) -> Self {
    Entry::Value(value)
  }
}

impl From<Definition> for Entry {
  fn from(definition: Definition) -> Self {
    Entry::Definition(definition)
  }
}
