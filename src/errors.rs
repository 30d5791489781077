use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

/// Failure to load a gradebook file. Always fatal for the run.
#[derive(Debug)]
pub enum IngestError {
    Unreadable(PathBuf, io::Error),
}

#[derive(Debug)]
pub enum ReportError {
    Io(io::Error),
    SerializeError(csv::Error),
    EncodingError(FromUtf8Error),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Unreadable(path, _) => {
                write!(f, "unable to read gradebook file {}", path.display())
            }
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Io(_) => write!(f, "failed to write report"),
            ReportError::SerializeError(_) => write!(f, "failed to serialize report record"),
            ReportError::EncodingError(_) => write!(f, "failed to encode csv report"),
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::SerializeError(err)
    }
}

impl From<FromUtf8Error> for ReportError {
    fn from(err: FromUtf8Error) -> Self {
        ReportError::EncodingError(err)
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IngestError::Unreadable(_, err) => Some(err),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReportError::Io(err) => Some(err),
            ReportError::SerializeError(err) => Some(err),
            ReportError::EncodingError(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_unreadable_file() {
        let err = IngestError::Unreadable(
            PathBuf::from("hw_1.csv"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );

        assert_eq!(err.to_string(), "unable to read gradebook file hw_1.csv");
        assert_eq!(err.source().unwrap().to_string(), "missing");
    }

    #[test]
    fn should_wrap_io_errors_for_reports() {
        let err: ReportError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();

        assert!(matches!(err, ReportError::Io(_)));
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }
}
