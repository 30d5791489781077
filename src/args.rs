use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_DETAILS_FILE: &str = "master_details.csv";
pub const DEFAULT_SUMMARY_FILE: &str = "summary.csv";
pub const USAGE: &str = "Usage: gradebook_merger <csv1> <csv2> ...";

pub struct Args {
    pub csv_files: Vec<PathBuf>,
    pub details_file: PathBuf,
    pub summary_file: PathBuf,
}

fn app() -> App<'static, 'static> {
    App::new("gradebook_merger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merges per-category gradebook CSV files into detail and summary reports")
        .arg(
            Arg::with_name("csv_files")
                .takes_value(true)
                .multiple(true)
                .help("gradebook CSV files to merge, one category per file prefix (e.g. hw_1.csv)"),
        )
        .arg(
            Arg::with_name("details")
                .short("d")
                .long("details")
                .takes_value(true)
                .default_value(DEFAULT_DETAILS_FILE)
                .help("path of the per-assignment report to write"),
        )
        .arg(
            Arg::with_name("summary")
                .short("s")
                .long("summary")
                .takes_value(true)
                .default_value(DEFAULT_SUMMARY_FILE)
                .help("path of the per-student summary report to write"),
        )
}

impl Args {
    pub fn parse() -> Self {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from(args);

        Self {
            csv_files: matches
                .values_of("csv_files")
                .map(|files| files.map(PathBuf::from).collect())
                .unwrap_or_default(),
            details_file: PathBuf::from(matches.value_of("details").unwrap_or(DEFAULT_DETAILS_FILE)),
            summary_file: PathBuf::from(matches.value_of("summary").unwrap_or(DEFAULT_SUMMARY_FILE)),
        }
    }
}
