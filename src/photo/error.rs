use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Exiftool failed to execute or process the file")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No capture time found in {0}")]
    MissingCaptureTime(String),

    #[error("Exiftool did not update {file}: {output}")]
    WriteRejected { file: String, output: String },

    #[error("Cannot derive a tagged file name for {0}")]
    InvalidFileName(String),
}
