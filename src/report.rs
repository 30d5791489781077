use crate::engine::Gradebook;
use crate::errors::ReportError;
use csv::QuoteStyle;
use serde::{Serialize, Serializer};
use std::io;
use std::path::Path;

pub const DETAILS_HEADER: [&str; 5] = ["ID", "Name", "Category", "Assignment", "Score"];
pub const SUMMARY_HEADER: [&str; 3] = ["ID", "Name", "Overall(%)"];

/// One line of the per-assignment breakdown.
#[derive(Debug, Serialize)]
struct DetailRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    assignment: &'a str,
    #[serde(serialize_with = "two_decimals")]
    score: f64,
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_score(*value))
}

fn format_score(value: f64) -> String {
    format!("{:.2}", value)
}

/// Reports are plain comma joined text: nothing is ever quoted, even a name
/// that contains a comma.
fn report_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer)
}

/// Render a report into memory and return it as a string.
fn render<F>(write: F) -> Result<String, ReportError>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), ReportError>,
{
    let mut buf = Vec::new();
    write(&mut buf)?;

    Ok(String::from_utf8(buf)?)
}

impl Gradebook {
    /// Write the per-assignment breakdown: one row per student, category and
    /// assignment, in the order they were first merged.
    pub fn write_details<W: io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut wtr = report_writer(writer);
        wtr.write_record(DETAILS_HEADER)?;

        for student in self.students() {
            for (category, assignments) in student.detailed_scores().iter() {
                for (assignment, score) in assignments.iter() {
                    wtr.serialize(DetailRow {
                        id: student.id(),
                        name: student.name(),
                        category,
                        assignment,
                        score: *score,
                    })?;
                }
            }
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the per-student summary: the overall percentage followed by the
    /// raw cumulative total of every category.
    pub fn write_summary<W: io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let categories = self.categories();

        let mut wtr = report_writer(writer);
        let mut header: Vec<&str> = SUMMARY_HEADER.to_vec();
        header.extend(categories.iter().copied());
        wtr.write_record(&header)?;

        for student in self.students() {
            let mut record = vec![
                student.id().to_string(),
                student.name().to_string(),
                format_score(self.overall_percentage(student, &categories)),
            ];
            record.extend(
                categories
                    .iter()
                    .map(|category| format_score(student.category_score(category))),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn generate_details_report(&self) -> Result<String, ReportError> {
        render(|buf| self.write_details(buf))
    }

    pub fn generate_summary_report(&self) -> Result<String, ReportError> {
        render(|buf| self.write_summary(buf))
    }

    /// Create (or truncate) `path` and write the detail report to it.
    pub fn write_details_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let file = std::fs::File::create(path)?;
        self.write_details(io::BufWriter::new(file))
    }

    /// Create (or truncate) `path` and write the summary report to it.
    pub fn write_summary_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let file = std::fs::File::create(path)?;
        self.write_summary(io::BufWriter::new(file))
    }
}
