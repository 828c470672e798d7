//! Human-readable rendering of a [`RunSummary`].

use crate::geotagger::{PhotoSummary, RunOutcome, RunSummary, TrackSummary};
use crate::matching::Report;
use crate::photo::PhotoIssue;
use std::fmt;

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Read tracks...{} found...ok", self.files)?;
        if !self.unreadable_files.is_empty() {
            writeln!(
                f,
                "Unreadable track files skipped: {}",
                self.unreadable_files.join(", ")
            )?;
        }
        if self.malformed > 0 {
            writeln!(f, "Malformed points skipped: {}", self.malformed)?;
        }
        writeln!(f, "Duplicates removed: {}", self.duplicates_removed)?;
        writeln!(
            f,
            "Got {} gps points with dates in local time ({})",
            self.points, self.zone
        )?;
        writeln!(f, "FROM: {}", self.first)?;
        write!(f, "TO  : {}", self.last)
    }
}

impl fmt::Display for PhotoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Got {} photos in folder", self.found)?;
        if let (Some(first), Some(last)) = (self.first, self.last) {
            writeln!(f, "Got {} timestamps in photos", self.readable())?;
            writeln!(f, "FROM: {first}")?;
            write!(f, "TO  : {last}")?;
        } else {
            write!(f, "No readable timestamps in photos")?;
        }
        if !self.unreadable.is_empty() {
            writeln!(f)?;
            write_issues(f, "skipped, capture time unreadable", &self.unreadable)?;
        }
        Ok(())
    }
}

fn write_issues(f: &mut fmt::Formatter<'_>, what: &str, issues: &[PhotoIssue]) -> fmt::Result {
    write!(f, "{} file(s) {what}:", issues.len())?;
    for issue in issues {
        write!(f, "\n  {}: {}", issue.id, issue.reason)?;
    }
    Ok(())
}

fn write_report(f: &mut fmt::Formatter<'_>, report: &Report, dry_run: bool) -> fmt::Result {
    match (report.matched_count(), dry_run) {
        (0, _) => write!(f, "Finished, but no files updated :(")?,
        (n, true) => write!(f, "Dry run. {n} files would be updated")?,
        (n, false) => write!(f, "Nice. {n} files updated")?,
    }
    if !report.before.is_empty() {
        write!(
            f,
            "\n{} file(s) not updated, seemed made before tracking: {}",
            report.before.len(),
            report.before.join(", ")
        )?;
    }
    if !report.after.is_empty() {
        write!(
            f,
            "\n{} file(s) not updated, seemed made after tracking: {}",
            report.after.len(),
            report.after.join(", ")
        )?;
    }
    if !report.failed.is_empty() {
        writeln!(f)?;
        write_issues(f, "matched but not updated", &report.failed)?;
    }
    Ok(())
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            RunOutcome::NoTrackFiles { dir } => {
                writeln!(f, "No track files found in {}", dir.display())?;
            }
            RunOutcome::NoTrackPoints {
                track_files,
                unreadable_files,
                malformed,
            } => {
                writeln!(
                    f,
                    "Read tracks...{track_files} found, but no usable points \
                     ({unreadable_files} unreadable, {malformed} malformed)"
                )?;
            }
            RunOutcome::NoPhotos { track } => {
                writeln!(f, "{track}")?;
                writeln!(f)?;
                writeln!(f, "No photos in folder!")?;
            }
            RunOutcome::Completed {
                track,
                photos,
                report,
            } => {
                writeln!(f, "{track}")?;
                writeln!(f)?;
                writeln!(f, "{photos}")?;
                writeln!(f)?;
                write_report(f, report, self.dry_run)?;
                writeln!(f)?;
            }
        }
        write!(f, "It took {:.2} seconds", self.elapsed_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::path::PathBuf;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn track() -> TrackSummary {
        TrackSummary {
            files: 2,
            records: 10,
            malformed: 1,
            duplicates_removed: 2,
            points: 7,
            first: at(10, 0),
            last: at(10, 45),
            zone: "+03:00".to_string(),
            unreadable_files: vec![],
        }
    }

    fn summary(outcome: RunOutcome, dry_run: bool) -> RunSummary {
        RunSummary {
            outcome,
            dry_run,
            elapsed_seconds: 1.234,
        }
    }

    fn completed(report: Report) -> RunOutcome {
        RunOutcome::Completed {
            track: track(),
            photos: PhotoSummary {
                found: 3,
                first: Some(at(9, 30)),
                last: Some(at(11, 30)),
                unreadable: vec![],
            },
            report,
        }
    }

    #[test]
    fn test_completed_run() {
        let report = Report {
            matched: vec!["b.jpg".to_string()],
            before: vec!["a.jpg".to_string()],
            after: vec!["c.jpg".to_string(), "d.jpg".to_string()],
            failed: vec![],
        };
        let text = summary(completed(report), false).to_string();

        assert!(text.starts_with("Read tracks...2 found...ok\n"));
        assert!(text.contains("Malformed points skipped: 1\n"));
        assert!(text.contains("Duplicates removed: 2\n"));
        assert!(text.contains("Got 7 gps points with dates in local time (+03:00)\n"));
        assert!(text.contains("FROM: 2021-07-10 10:00:00\nTO  : 2021-07-10 10:45:00\n"));
        assert!(text.contains("Got 3 photos in folder\n"));
        assert!(text.contains("Nice. 1 files updated\n"));
        assert!(text.contains("1 file(s) not updated, seemed made before tracking: a.jpg\n"));
        assert!(
            text.contains("2 file(s) not updated, seemed made after tracking: c.jpg, d.jpg\n")
        );
        assert!(text.ends_with("It took 1.23 seconds"));
    }

    #[test]
    fn test_nothing_updated_and_failures() {
        let report = Report {
            failed: vec![PhotoIssue {
                id: "b.jpg".to_string(),
                reason: "Exiftool did not update b.jpg: 0 image files updated".to_string(),
            }],
            ..Default::default()
        };
        let text = summary(completed(report), false).to_string();

        assert!(text.contains("Finished, but no files updated :(\n"));
        assert!(text.contains("1 file(s) matched but not updated:\n  b.jpg: Exiftool"));
        assert!(!text.contains("seemed made"));
    }

    #[test]
    fn test_dry_run_wording() {
        let report = Report {
            matched: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            ..Default::default()
        };
        let text = summary(completed(report), true).to_string();
        assert!(text.contains("Dry run. 2 files would be updated\n"));
    }

    #[test]
    fn test_early_returns() {
        let text = summary(
            RunOutcome::NoTrackFiles {
                dir: PathBuf::from("trips/ural"),
            },
            false,
        )
        .to_string();
        assert_eq!(text, "No track files found in trips/ural\nIt took 1.23 seconds");

        let text = summary(RunOutcome::NoPhotos { track: track() }, false).to_string();
        assert!(text.contains("TO  : 2021-07-10 10:45:00\n\nNo photos in folder!\n"));

        let text = summary(
            RunOutcome::NoTrackPoints {
                track_files: 3,
                unreadable_files: 1,
                malformed: 2,
            },
            false,
        )
        .to_string();
        assert!(text.starts_with(
            "Read tracks...3 found, but no usable points (1 unreadable, 2 malformed)\n"
        ));
    }

    #[test]
    fn test_unreadable_track_files_are_listed() {
        let track = TrackSummary {
            unreadable_files: vec!["broken.gpx".to_string(), "empty.gpx".to_string()],
            ..track()
        };
        assert!(
            track
                .to_string()
                .starts_with("Read tracks...2 found...ok\nUnreadable track files skipped: broken.gpx, empty.gpx\n")
        );
    }

    #[test]
    fn test_unreadable_photos_are_listed() {
        let photos = PhotoSummary {
            found: 2,
            first: Some(at(9, 30)),
            last: Some(at(9, 30)),
            unreadable: vec![PhotoIssue {
                id: "IMG_0007.jpeg".to_string(),
                reason: "No capture time found in IMG_0007.jpeg".to_string(),
            }],
        };
        assert_eq!(
            photos.to_string(),
            "Got 2 photos in folder\n\
             Got 1 timestamps in photos\n\
             FROM: 2021-07-10 09:30:00\n\
             TO  : 2021-07-10 09:30:00\n\
             1 file(s) skipped, capture time unreadable:\n  \
             IMG_0007.jpeg: No capture time found in IMG_0007.jpeg"
        );
    }
}
