//! The per-thread default container and its access function.

use crate::container::Container;

thread_local! {
  // Created on first access from each thread. `Container` is `Rc`-based, so a
  // single process-wide instance is not possible.
  static GLOBAL_CONTAINER: Container = Container::new();
}

/// Returns a handle to this thread's default container.
///
/// Every call on the same thread yields a handle to the same registry, so
/// services can be registered in one place and resolved in another.
///
/// # Examples
///
/// ```
/// use fibre_di::{global, Container};
///
/// fn register_services() {
///   global().set_value("greeting", String::from("Hello from global!"));
/// }
///
/// register_services();
/// assert!(global().has("greeting"));
/// assert!(Container::ptr_eq(&global(), &global()));
/// ```
pub fn global() -> Container {
  GLOBAL_CONTAINER.with(Container::clone)
}
