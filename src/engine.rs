use crate::errors::IngestError;
use crate::ordered::OrderedMap;
use crate::parser::{parse_line, parse_number, split_lines};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Assignment names start at this column in the header, and the max-points
/// row contributes from this column onward.
const FIRST_ASSIGNMENT_COLUMN: usize = 3;

/// A header row, a max-points row and at least one student row.
const MIN_LINES: usize = 3;

/// Everything known about one student, merged across every gradebook file
/// that mentioned their ID.
#[derive(Clone, Debug)]
pub struct StudentRecord {
    id: String,

    /// Set by the first file that introduced this ID and never changed.
    name: String,

    /// The cumulative category total per category. Totals from several files
    /// of the same category are summed.
    category_scores: OrderedMap<f64>,

    /// Individual assignment scores grouped by category. A later value for
    /// the same assignment replaces the earlier one.
    detailed_scores: OrderedMap<OrderedMap<f64>>,
}

impl StudentRecord {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category_scores: OrderedMap::new(),
            detailed_scores: OrderedMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_scores(&self) -> &OrderedMap<f64> {
        &self.category_scores
    }

    pub fn detailed_scores(&self) -> &OrderedMap<OrderedMap<f64>> {
        &self.detailed_scores
    }

    /// The student's cumulative total for `category`, zero if they have none.
    pub fn category_score(&self, category: &str) -> f64 {
        self.category_scores.get(category).copied().unwrap_or(0.0)
    }

    pub fn add_category_score(&mut self, category: &str, score: f64) {
        *self.category_scores.get_or_insert_with(category, || 0.0) += score;
    }

    pub fn add_assignment(&mut self, category: &str, assignment: &str, score: f64) {
        self.detailed_scores
            .get_or_insert_with(category, OrderedMap::new)
            .insert(assignment, score);
    }

    /// The sum of all category totals, unnormalized.
    pub fn total_score(&self) -> f64 {
        self.category_scores.values().sum()
    }
}

/// Derive the grading category from a gradebook path: the part of the file
/// name before the first `_`, or the whole file name when there is none.
pub fn category_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    match file_name.find('_') {
        Some(idx) => file_name[..idx].to_string(),
        None => file_name,
    }
}

/// A Gradebook folds any number of per-category gradebook files into one
/// record per student, while tracking the maximum achievable points of
/// every category.
#[derive(Debug, Default)]
pub struct Gradebook {
    students: OrderedMap<StudentRecord>,
    category_max_totals: OrderedMap<f64>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the gradebook file at `path` into memory and merge it.
    ///
    /// The category is taken from the file name. Failing to read the file is
    /// the only error; malformed content is skipped row by row.
    pub fn ingest<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IngestError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| IngestError::Unreadable(path.to_path_buf(), err))?;

        let category = category_from_path(path);
        debug!("ingesting {} as category {}", path.display(), category);
        self.ingest_str(&category, &contents);

        Ok(())
    }

    /// Merge the already loaded contents of one gradebook file belonging to
    /// `category`.
    ///
    /// Files with fewer than three lines are ignored entirely. Rows that are
    /// too short, or whose category total isn't numeric, are skipped without
    /// touching the student. Max-points cells that aren't numeric count as
    /// zero.
    pub fn ingest_str(&mut self, category: &str, contents: &str) {
        let lines = split_lines(contents);
        if lines.len() < MIN_LINES {
            info!(
                "skipping {} gradebook with only {} line(s)",
                category,
                lines.len()
            );
            return;
        }

        let headers: Vec<String> = parse_line(lines[0])
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let category_max: f64 = parse_line(lines[1])
            .iter()
            .skip(FIRST_ASSIGNMENT_COLUMN)
            .filter_map(|cell| parse_number(cell))
            .sum();

        let mut accepted = 0usize;
        let mut skipped = 0usize;
        for (line_no, line) in lines.iter().enumerate().skip(2) {
            if self.ingest_row(category, &headers, line) {
                accepted += 1;
            } else {
                debug!("skipping malformed {} row {}: {:?}", category, line_no + 1, line);
                skipped += 1;
            }
        }

        *self
            .category_max_totals
            .get_or_insert_with(category, || 0.0) += category_max;

        info!(
            "merged {} gradebook: {} row(s) accepted, {} skipped, max points {}",
            category, accepted, skipped, category_max
        );
    }

    /// Fold a single student row into the gradebook, returning whether the
    /// row was usable.
    fn ingest_row(&mut self, category: &str, headers: &[String], line: &str) -> bool {
        let fields = parse_line(line);
        if fields.len() < 3 {
            return false;
        }

        let id = fields[0].trim();
        let name = fields[1].trim();
        let category_total = match parse_number(&fields[2]) {
            Some(total) => total,
            None => return false,
        };

        let student = self
            .students
            .get_or_insert_with(id, || StudentRecord::new(id, name));
        student.add_category_score(category, category_total);

        let last_column = fields.len().min(headers.len());
        for column in FIRST_ASSIGNMENT_COLUMN..last_column {
            let value = fields[column].trim();
            if value.is_empty() {
                continue;
            }

            if let Some(score) = parse_number(value) {
                student.add_assignment(category, &headers[column], score);
            }
        }

        true
    }

    /// All students in the order they were first seen.
    pub fn students(&self) -> impl Iterator<Item = &StudentRecord> {
        self.students.values()
    }

    pub fn student(&self, id: &str) -> Option<&StudentRecord> {
        self.students.get(id)
    }

    /// The cumulative max points of `category`, if any file of that category
    /// has been merged.
    pub fn category_max(&self, category: &str) -> Option<f64> {
        self.category_max_totals.get(category).copied()
    }

    /// The distinct categories any student has a total in, in the order they
    /// were first seen while walking the students.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for student in self.students.values() {
            for category in student.category_scores.keys() {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }

        categories
    }

    /// The student's overall percentage across `categories`.
    ///
    /// Every category with positive max points carries the same weight,
    /// regardless of how many points it is worth. A category with no known
    /// max is treated as having a max of one point. If no category carries
    /// any weight the overall percentage is zero.
    pub fn overall_percentage(&self, student: &StudentRecord, categories: &[&str]) -> f64 {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for category in categories {
            let score = student.category_score(category);
            let max = self.category_max(category).unwrap_or(1.0);
            if max > 0.0 {
                weighted_sum += score / max;
                total_weight += 1.0;
            }
        }

        if total_weight == 0.0 {
            return 0.0;
        }

        (weighted_sum / total_weight) * 100.0
    }
}

impl TryFrom<Vec<PathBuf>> for Gradebook {
    type Error = IngestError;

    /// Merges every gradebook file in the given order into a newly allocated
    /// Gradebook, stopping at the first file that can't be read.
    fn try_from(paths: Vec<PathBuf>) -> Result<Self, Self::Error> {
        let mut gradebook = Gradebook::new();

        for path in paths.iter() {
            gradebook.ingest(path)?;
        }

        for student in gradebook.students() {
            debug!(
                "student {} ({}) has {} total point(s)",
                student.id(),
                student.name(),
                student.total_score()
            );
        }

        Ok(gradebook)
    }
}
