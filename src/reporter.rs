//! Report output: one JSON line per person

use crate::Result;
use crate::types::Person;
use std::io::Write;

/// Writes person records to an injected sink
pub struct Reporter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> Reporter<W> {
    /// Wrap an output sink
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Write one record as a single compact JSON line
    ///
    /// Absent fields are written as `null`; non-ASCII text is written as-is.
    pub fn report(&mut self, person: &Person) -> Result<()> {
        serde_json::to_writer(&mut self.out, person)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Write every record in order and flush
    pub fn report_all<'a>(&mut self, people: impl IntoIterator<Item = &'a Person>) -> Result<()> {
        for person in people {
            self.report(person)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Lines written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Recover the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn render(people: &[Person]) -> String {
        let mut reporter = Reporter::new(Vec::new());
        reporter.report_all(people).unwrap();
        assert_eq!(reporter.written(), people.len());
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn full_record_is_one_line() {
        let output = render(&[Person {
            name: Some("Afzal Ghaffar".to_string()),
            language: Some("Sindhi".to_string()),
            id: Some("ENTOCR13RSCLZ6KU".to_string()),
            bio: Some("Aliquam sollicitudin ante ligula.".to_string()),
            version: Some(1.88),
        }]);

        assert_eq!(
            output,
            "{\"name\":\"Afzal Ghaffar\",\"language\":\"Sindhi\",\"id\":\"ENTOCR13RSCLZ6KU\",\"bio\":\"Aliquam sollicitudin ante ligula.\",\"version\":1.88}\n"
        );
    }

    #[test]
    fn absent_fields_are_null() {
        let output = render(&[Person::default()]);
        assert_eq!(
            output,
            "{\"name\":null,\"language\":null,\"id\":null,\"bio\":null,\"version\":null}\n"
        );
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let output = render(&[Person {
            name: Some("Ingibjörg Ólafsdóttir".to_string()),
            ..Person::default()
        }]);
        assert!(output.contains("Ingibjörg Ólafsdóttir"));
        assert!(!output.contains("\\u"));
    }

    #[test]
    fn version_prints_shortest_float_form() {
        let parsed = crate::fetcher::parse_people(r#"[{"version": 1.10}]"#).unwrap();
        let output = render(&parsed);
        assert!(output.ends_with("\"version\":1.1}\n"), "got {}", output);
    }

    #[test]
    fn embedded_newlines_stay_on_one_line() {
        let output = render(&[
            Person {
                bio: Some("line one\nline two".to_string()),
                ..Person::default()
            },
            Person::default(),
        ]);
        assert_eq!(output.lines().count(), 2);
    }
}
