use fibre_di::{factory, global, resolve, Value};
use std::cell::Cell;
use std::rc::Rc;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

fn main() {
  // A counter shared by both definitions to generate unique IDs.
  let next_id = Rc::new(Cell::new(0usize));

  // --- Shared Registration ---
  // This definition will only be called ONCE.
  let counter = Rc::clone(&next_id);
  global().set_definition("singleton_tracker", move |_| {
    println!("Creating SHARED RequestTracker...");
    let id = counter.get();
    counter.set(id + 1);
    Ok(Value::new(RequestTracker { id }))
  });

  // --- Factory Registration ---
  // This definition will be called EVERY time the service is resolved.
  let counter = Rc::clone(&next_id);
  global().set(
    "transient_tracker",
    factory(move |_| {
      println!("Creating FACTORY RequestTracker...");
      let id = counter.get();
      counter.set(id + 1);
      Ok(Value::new(RequestTracker { id }))
    }),
  );

  println!("--- Resolving Shared ---");
  let s1 = resolve!(RequestTracker, "singleton_tracker");
  let s2 = resolve!(RequestTracker, "singleton_tracker");
  println!("Shared 1 ID: {}, Shared 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s2.id, 0);
  assert!(Rc::ptr_eq(&s1, &s2), "Shared instances should be identical");
  println!("Shared instances are the same pointer, as expected.\n");

  println!("--- Resolving Factories ---");
  let t1 = resolve!(RequestTracker, "transient_tracker");
  let t2 = resolve!(RequestTracker, "transient_tracker");
  println!("Factory 1 ID: {}, Factory 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(!Rc::ptr_eq(&t1, &t2), "Factory instances should be different");
  println!("Factory instances are different pointers, as expected.");
}
