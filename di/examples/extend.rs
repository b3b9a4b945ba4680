use fibre_di::{protect, Container, Definition, Value};
use std::cell::RefCell;

// A mailer whose transports are configured after registration.
#[derive(Default)]
struct Mailer {
  transports: RefCell<Vec<String>>,
}

fn main() {
  let container = Container::new();
  container.set_definition("mailer", |_| Ok(Value::new(Mailer::default())));

  // A third-party module decorates the mailer without knowing how it is built.
  container
    .extend("mailer", |mailer, _| {
      if let Some(m) = mailer.downcast::<Mailer>() {
        m.transports.borrow_mut().push("smtp".to_string());
      }
      Ok(mailer)
    })
    .expect("mailer is a definition");

  // Protected callables are stored as-is and handed back untouched.
  container.set(
    "mailer.formatter",
    protect(|_| Ok(Value::new(String::from("<html>")))),
  );

  let mailer = container.get_as::<Mailer>("mailer").expect("mailer resolves");
  println!("Transports: {:?}", mailer.transports.borrow());

  let formatter = container
    .get_as::<Definition>("mailer.formatter")
    .expect("formatter is stored");
  let rendered = formatter.invoke(&container).expect("formatter runs");
  println!("Formatter output: {:?}", rendered.downcast::<String>());

  println!("Registered: {:?}", container.keys());
}
