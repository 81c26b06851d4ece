use indicatif::{ProgressBar, ProgressStyle};

/// Builds the progress display for a download once its size is known.
///
/// Receives the `Content-Length` of the response, or 0 when the server did
/// not send one.
pub type ProgressFactory = dyn Fn(u64) -> ProgressBar + Send + Sync;

/// A byte-counting progress bar for terminal output.
pub fn byte_progress_bar(len: u64) -> ProgressBar {
    if len == 0 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        return pb;
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// A progress bar that draws nothing, for quiet mode and tests.
pub fn hidden_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::hidden();
    pb.set_length(len);
    pb
}
