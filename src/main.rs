use gradebook_merger::args::{Args, USAGE};
use gradebook_merger::engine::Gradebook;
use log::info;
use std::error::Error;
use std::process;

/// Print the error followed by every underlying cause, then abort the run.
fn fail(context: &str, err: &dyn Error) -> ! {
    eprintln!("{}: {}", context, err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    process::exit(1);
}

fn main() {
    // RUST_LOG overrides the default warn level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.csv_files.is_empty() {
        println!("{}", USAGE);
        return;
    }

    info!("merging {} gradebook file(s)", args.csv_files.len());
    let gradebook = match Gradebook::try_from(args.csv_files) {
        Ok(gradebook) => gradebook,
        Err(err) => fail("failed to process input file", &err),
    };

    if let Err(err) = gradebook.write_details_file(&args.details_file) {
        fail("failed to generate details report", &err);
    }
    if let Err(err) = gradebook.write_summary_file(&args.summary_file) {
        fail("failed to generate summary report", &err);
    }

    println!(
        "{} and {} generated successfully!",
        args.details_file.display(),
        args.summary_file.display()
    );
}
