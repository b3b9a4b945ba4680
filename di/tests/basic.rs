use fibre_di::{factory, protect, share, Container, Definition, Entry, Error, Value};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

// --- Test Fixtures ---

#[derive(Debug)]
struct Service;

// Counts how often a definition runs.
fn counting_service(counter: Rc<Cell<u32>>) -> impl Fn(&Container) -> fibre_di::Result<Value> {
  move |_: &Container| {
    counter.set(counter.get() + 1);
    Ok(Value::new(Service))
  }
}

// --- Plain Values ---

#[test]
fn test_with_string() {
  let container = Container::new();
  container.set_value("param", String::from("value"));

  let param = container.get_as::<String>("param").unwrap();
  assert_eq!(*param, "value");
}

#[test]
fn test_plain_value_is_returned_as_stored() {
  let container = Container::new();
  let value = Value::new(vec![1, 2, 3]);
  container.set("list", value.clone());

  let resolved = container.get("list").unwrap();
  assert!(Value::ptr_eq(&value, &resolved));
}

#[test]
fn test_get_honors_null_values() {
  let container = Container::new();
  container.set("foo", Value::null());

  assert!(container.has("foo"));
  assert!(container.get("foo").unwrap().is_null());
}

#[test]
fn test_has() {
  let container = Container::new();
  container.set_value("param", "value");
  container.set_definition("service", |_| Ok(Value::new(Service)));
  container.set("null", Entry::null());

  assert!(container.has("param"));
  assert!(container.has("service"));
  assert!(container.has("null"));
  assert!(!container.has("non_existent"));
}

#[test]
fn test_get_validates_key_is_present() {
  let container = Container::new();

  let err = container.get("foo").unwrap_err();
  assert!(matches!(err, Error::UndefinedIdentifier(ref id) if id == "foo"));
  assert_eq!(err.to_string(), "Identifier \"foo\" is not defined.");
}

// --- Shared Definitions ---

#[test]
fn test_with_closure() {
  let container = Container::new();
  container.set_definition("service", |_| Ok(Value::new(Service)));

  assert!(container.get("service").unwrap().is::<Service>());
}

#[test]
fn test_shared_definition_is_invoked_once() {
  // Arrange
  let calls = Rc::new(Cell::new(0));
  let container = Container::new();
  container.set_definition("service", counting_service(Rc::clone(&calls)));

  // Act
  let one = container.get("service").unwrap();
  let two = container.get("service").unwrap();

  // Assert
  assert!(Value::ptr_eq(&one, &two));
  assert_eq!(calls.get(), 1);
}

#[test]
fn test_share_is_the_default() {
  let container = Container::new();
  container.set("shared_service", share(|_| Ok(Value::new(Service))));

  let one = container.get_as::<Service>("shared_service").unwrap();
  let two = container.get_as::<Service>("shared_service").unwrap();
  assert!(Rc::ptr_eq(&one, &two));
}

#[test]
fn test_definition_is_not_invoked_until_resolved() {
  let calls = Rc::new(Cell::new(0));
  let container = Container::new();
  container.set_definition("service", counting_service(Rc::clone(&calls)));

  assert_eq!(calls.get(), 0);
}

// --- Factories ---

#[test]
fn test_factories_should_be_different() {
  // Arrange
  let calls = Rc::new(Cell::new(0));
  let container = Container::new();
  container.set("service", factory(counting_service(Rc::clone(&calls))));

  // Act
  let one = container.get("service").unwrap();
  let two = container.get("service").unwrap();

  // Assert
  assert!(one.is::<Service>());
  assert!(two.is::<Service>());
  assert!(!Value::ptr_eq(&one, &two));
  assert_eq!(calls.get(), 2);
}

// --- Protected Definitions ---

#[test]
fn test_protect() {
  // Arrange
  let calls = Rc::new(Cell::new(0));
  let callback = protect(counting_service(Rc::clone(&calls)));
  let container = Container::new();
  container.set("protected", callback.clone());

  // Act
  let resolved = container.get("protected").unwrap();

  // Assert
  let returned = resolved.downcast::<Definition>().unwrap();
  assert!(Definition::ptr_eq(&returned, &callback));
  assert_eq!(calls.get(), 0);

  // The caller may still invoke it explicitly.
  assert!(returned.invoke(&container).unwrap().is::<Service>());
  assert_eq!(calls.get(), 1);
}

#[test]
fn test_protected_value_keeps_identity_across_gets() {
  let container = Container::new();
  let callback = protect(|_| Ok(Value::new("foo")));
  container.set("protected", callback.clone());

  let one = container.get("protected").unwrap();
  let two = container.get("protected").unwrap();
  assert!(Value::ptr_eq(&one, &two));

  // Replacing the key hands out a new wrapper.
  container.set("protected", callback);
  let three = container.get("protected").unwrap();
  assert!(!Value::ptr_eq(&one, &three));
}

// --- Raw ---

#[test]
fn test_raw() {
  let container = Container::new();
  let definition = share(|_| Ok(Value::new("foo")));
  container.set("service", definition.clone());

  let raw = container.raw("service").unwrap();
  assert!(Definition::ptr_eq(raw.as_definition().unwrap(), &definition));
}

#[test]
fn test_raw_never_invokes_or_substitutes_instances() {
  let calls = Rc::new(Cell::new(0));
  let container = Container::new();
  let definition = share(counting_service(Rc::clone(&calls)));
  container.set("service", definition.clone());

  container.get("service").unwrap();
  let raw = container.raw("service").unwrap();

  assert!(raw.as_value().is_none());
  assert!(Definition::ptr_eq(raw.as_definition().unwrap(), &definition));
  assert_eq!(calls.get(), 1);
}

#[test]
fn test_raw_of_factory_and_protected() {
  let container = Container::new();
  let made = factory(|_| Ok(Value::new(1)));
  let kept = protect(|_| Ok(Value::new(2)));
  container.set("made", made.clone());
  container.set("kept", kept.clone());

  assert!(Definition::ptr_eq(
    container.raw("made").unwrap().as_definition().unwrap(),
    &made
  ));
  assert!(Definition::ptr_eq(
    container.raw("kept").unwrap().as_definition().unwrap(),
    &kept
  ));
}

#[test]
fn test_raw_honors_null_values() {
  let container = Container::new();
  container.set("foo", Value::null());

  assert!(container.raw("foo").unwrap().as_value().unwrap().is_null());
}

#[test]
fn test_raw_validates_key_is_present() {
  let container = Container::new();

  let err = container.raw("foo").unwrap_err();
  assert_eq!(err.to_string(), "Identifier \"foo\" is not defined.");
}

// --- Unset ---

#[test]
fn test_unset() {
  let container = Container::new();
  container.set_value("param", "value");
  container.set_definition("service", |_| Ok(Value::new(Service)));

  container.unset("param");
  container.unset("service");

  assert!(!container.has("param"));
  assert!(!container.has("service"));
  assert!(container.is_empty());
}

#[test]
fn test_unset_absent_key_is_a_no_op() {
  let container = Container::new();
  container.set_value("kept", 1u8);

  container.unset("missing");

  assert_eq!(container.keys(), vec!["kept".to_string()]);
  assert_eq!(*container.get_as::<u8>("kept").unwrap(), 1);
}

#[test]
fn test_unset_invalidates_cached_instance() {
  // Arrange
  let calls = Rc::new(Cell::new(0));
  let container = Container::new();
  let definition = share(counting_service(Rc::clone(&calls)));
  container.set("service", definition.clone());
  let first = container.get("service").unwrap();

  // Act
  container.unset("service");
  container.set("service", definition);
  let second = container.get("service").unwrap();

  // Assert
  assert!(!Value::ptr_eq(&first, &second));
  assert_eq!(calls.get(), 2);
}

#[test]
fn test_overwrite_invalidates_cached_instance_and_classification() {
  let container = Container::new();
  container.set("service", factory(|_| Ok(Value::new(Service))));
  container.get("service").unwrap();

  container.set_definition("service", |_| Ok(Value::new(Service)));
  let one = container.get("service").unwrap();
  let two = container.get("service").unwrap();
  assert!(Value::ptr_eq(&one, &two));

  container.set_value("service", 5u32);
  assert_eq!(*container.get_as::<u32>("service").unwrap(), 5);
}

// --- Keys & Construction ---

#[test]
fn test_keys() {
  let container = Container::new();
  container.set_value("foo", 123);
  container.set_value("bar", 123);

  assert_eq!(container.keys(), vec!["foo".to_string(), "bar".to_string()]);
}

#[test]
fn test_keys_keep_first_insertion_order() {
  let container = Container::new();
  container.set_value("foo", 1);
  container.set_value("bar", 2);
  container.set_value("foo", 3);

  assert_eq!(container.keys(), vec!["foo".to_string(), "bar".to_string()]);
  assert_eq!(container.len(), 2);
  assert_eq!(*container.get_as::<i32>("foo").unwrap(), 3);
}

#[test]
fn test_constructor_injection() {
  let container = Container::with_values([
    ("param", Entry::value("value")),
    ("service", share(|_| Ok(Value::new(Service))).into()),
  ]);

  assert_eq!(*container.get_as::<&str>("param").unwrap(), "value");
  assert!(container.get("service").unwrap().is::<Service>());
  assert_eq!(container.keys(), vec!["param".to_string(), "service".to_string()]);
}

#[test]
fn test_collect_into_container() {
  let container: Container = vec![("a", Value::new(1u8)), ("b", Value::null())]
    .into_iter()
    .collect();

  assert!(container.has("a"));
  assert!(container.get("b").unwrap().is_null());
}

#[test]
fn test_get_as_reports_type_mismatch() {
  let container = Container::new();
  container.set_value("port", 8080u16);

  let err = container.get_as::<String>("port").unwrap_err();
  assert!(matches!(err, Error::TypeMismatch { ref id, .. } if id == "port"));
}
