//! Person payloads served by the mock source

use person_roster::Person;

/// Two complete records in the shape of the public dummy-data file
pub const SAMPLE_DATA: &str = r#"[
  {
    "name": "Adeel Solangi",
    "language": "Sindhi",
    "id": "V59OF92YF627HFY0",
    "bio": "Donec lobortis eleifend condimentum. Cras dictum dolor lacinia lectus vehicula rutrum.",
    "version": 6.1
  },
  {
    "name": "Afzal Ghaffar",
    "language": "Sindhi",
    "id": "ENTOCR13RSCLZ6KU",
    "bio": "Aliquam sollicitudin ante ligula, eget malesuada nibh efficitur et.",
    "version": 1.88
  }
]"#;

/// Records with missing fields
pub const PARTIAL_DATA: &str =
    r#"[{"name":"First Last"},{"name":"First"},{"language":"one"},{}]"#;

/// JSON array of objects holding only the given names
pub fn names_payload(names: &[&str]) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name }))
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Parse report output back into records, one per line
pub fn parse_report(output: &[u8]) -> Vec<Person> {
    std::str::from_utf8(output)
        .expect("report is not UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("report line is not a person"))
        .collect()
}

/// Names from parsed report records
pub fn report_names(people: &[Person]) -> Vec<String> {
    people
        .iter()
        .map(|p| p.name.clone().unwrap_or_default())
        .collect()
}
