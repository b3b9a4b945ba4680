//! Public macros for ergonomic, typed resolution.

/// Resolves `id` from the given container as an `Rc<T>`.
///
/// # Panics
///
/// Panics if `id` is not defined, its definition fails, or the resolved value
/// is not a `T`. For a non-panicking version, use [`maybe_resolve_from!`] or
/// `Container::get_as` directly.
///
/// # Examples
///
/// ```
/// use fibre_di::{resolve_from, Container};
///
/// let container = Container::new();
/// container.set_value("port", 8080u16);
///
/// let port = resolve_from!(container, u16, "port");
/// assert_eq!(*port, 8080);
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, $type:ty, $id:expr) => {{
    let id: &str = $id;
    match $container.get_as::<$type>(id) {
      Ok(service) => service,
      Err(err) => panic!(
        "Failed to resolve required service \"{}\" as {}: {}",
        id,
        std::any::type_name::<$type>(),
        err
      ),
    }
  }};
}

/// Resolves `id` from the thread's global container as an `Rc<T>`.
///
/// # Panics
///
/// Same conditions as [`resolve_from!`].
///
/// # Examples
///
/// ```
/// use fibre_di::{global, resolve, Value};
///
/// global().set_definition("message", |_| Ok(Value::new(String::from("hello"))));
///
/// let message = resolve!(String, "message");
/// assert_eq!(*message, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty, $id:expr) => {
    $crate::resolve_from!($crate::global(), $type, $id)
  };
}

/// Resolves `id` from the given container, returning `None` on any failure.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, $type:ty, $id:expr) => {
    $container.get_as::<$type>($id).ok()
  };
}

/// Resolves `id` from the thread's global container, returning `None` on any
/// failure.
#[macro_export]
macro_rules! maybe_resolve {
  ($type:ty, $id:expr) => {
    $crate::maybe_resolve_from!($crate::global(), $type, $id)
  };
}
