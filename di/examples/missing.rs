use fibre_di::{global, resolve, Error};
use std::panic;

struct UnregisteredService;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService, "unregistered");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get()` method ---
  println!("\nNow, attempting to resolve using the fallible `get()` method...");

  match global().get("unregistered") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err @ Error::UndefinedIdentifier(_)) => println!("Correctly received: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
