use fibre_di::{Container, Value};

struct Database {
  dsn: String,
}

fn main() -> fibre_di::Result<()> {
  let container = Container::from_json_str(
    r#"{
      "db.host": "localhost",
      "db.port": 5432
    }"#,
  )?;

  container.set_definition("db", |c| {
    let host = c.get_as::<serde_json::Value>("db.host")?;
    let port = c.get_as::<serde_json::Value>("db.port")?;
    Ok(Value::new(Database {
      dsn: format!("postgres://{}:{}", host.as_str().unwrap_or("localhost"), port),
    }))
  });

  let db = container.get_as::<Database>("db")?;
  println!("Connecting to {}", db.dsn);
  Ok(())
}
