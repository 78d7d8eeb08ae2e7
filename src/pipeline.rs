use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::error::{ExtractError, Result};
use crate::loader::{self, ReadPolicy};
use crate::model::{ArtworkRecord, Medium};
use crate::{output, parser};

pub const DEFAULT_INPUT_DIR: &str = "../oliviermenge_backup";
pub const DEFAULT_OUTPUT_PATH: &str = "src/data/artworks.json";

pub struct ExtractOptions {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub on_unreadable: ReadPolicy,
    pub show_progress: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            on_unreadable: ReadPolicy::default(),
            show_progress: true,
        }
    }
}

/// Everything one pass over the input directory produced.
#[derive(Debug)]
pub struct Collected {
    pub records: Vec<ArtworkRecord>,
    pub files: usize,
    pub skipped: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub files: usize,
    pub skipped: Vec<PathBuf>,
    pub total: usize,
    pub by_medium: BTreeMap<Medium, usize>,
}

impl RunSummary {
    pub fn print(&self) {
        println!("Processed {} html files", self.files);
        println!("Extracted {} artworks", self.total);
        for (medium, count) in &self.by_medium {
            println!("  {:<12} {:>5}", medium.as_str(), count);
        }
        if !self.skipped.is_empty() {
            println!("Skipped {} unreadable files:", self.skipped.len());
            for path in &self.skipped {
                println!("  {}", path.display());
            }
        }
    }
}

/// Read every html page in `input_dir`, in file-name order, and extract
/// its records. Records keep page order, then image order within a page.
/// Each file is announced on stdout before it is read.
pub fn collect(opts: &ExtractOptions) -> Result<Collected> {
    collect_to(opts, &mut io::stdout())
}

/// Like [`collect`], with the per-file `Processing <file>...` lines going to
/// `report`. They are written even when the progress bar is hidden.
pub fn collect_to<W: Write>(opts: &ExtractOptions, report: &mut W) -> Result<Collected> {
    let files = loader::list_html_files(&opts.input_dir)?;
    info!("Found {} html files in {}", files.len(), opts.input_dir.display());

    let pb = if opts.show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.suspend(|| writeln!(report, "Processing {}...", name))
            .map_err(ExtractError::Progress)?;
        pb.set_message(name);

        let doc = match loader::read_document(path) {
            Ok(doc) => doc,
            Err(e) if opts.on_unreadable == ReadPolicy::Skip => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped.push(path.clone());
                pb.inc(1);
                continue;
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        let page_records = parser::extract_document(&doc.file_name, &doc.html);
        info!("{}: {} artworks", doc.file_name, page_records.len());
        records.extend(page_records);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(Collected {
        records,
        files: files.len() - skipped.len(),
        skipped,
    })
}

/// Extract the whole input directory and overwrite the output file.
pub fn run(opts: &ExtractOptions) -> Result<RunSummary> {
    let collected = collect(opts)?;
    output::write_records(&opts.output, &collected.records)?;
    info!(
        "Wrote {} artworks to {}",
        collected.records.len(),
        opts.output.display()
    );

    let mut by_medium = BTreeMap::new();
    for rec in &collected.records {
        *by_medium.entry(rec.medium).or_insert(0) += 1;
    }

    Ok(RunSummary {
        files: collected.files,
        skipped: collected.skipped,
        total: collected.records.len(),
        by_medium,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn opts(input: &Path, output: &Path, policy: ReadPolicy) -> ExtractOptions {
        ExtractOptions {
            input_dir: input.to_path_buf(),
            output: output.to_path_buf(),
            on_unreadable: policy,
            show_progress: false,
        }
    }

    #[test]
    fn fixtures_end_to_end() {
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("artworks.json");
        let summary = run(&opts(Path::new("tests/fixtures"), &output, ReadPolicy::Abort)).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.by_medium.get(&Medium::Bronze), Some(&4));
        assert_eq!(summary.by_medium.get(&Medium::Wood), Some(&1));

        let written: Vec<ArtworkRecord> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        // atelier.html sorts before sculptures-bronze.html
        assert_eq!(written[0].title, "Racines");
        assert_eq!(written[4].title, "Le Penseur du Port");
        assert!(written.iter().all(|r| !r.title.is_empty() && !r.image.is_empty()));
    }

    #[test]
    fn rerun_is_byte_identical() {
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("artworks.json");
        let o = opts(Path::new("tests/fixtures"), &output, ReadPolicy::Abort);

        run(&o).unwrap();
        let first = fs::read(&output).unwrap();
        run(&o).unwrap();
        assert_eq!(first, fs::read(&output).unwrap());
    }

    fn report_lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn announces_each_file_without_a_visible_bar() {
        let out = tempfile::tempdir().unwrap();
        let o = opts(Path::new("tests/fixtures"), &out.path().join("a.json"), ReadPolicy::Abort);
        let mut buf = Vec::new();
        collect_to(&o, &mut buf).unwrap();
        assert_eq!(
            report_lines(buf),
            ["Processing atelier.html...", "Processing sculptures-bronze.html..."]
        );
    }

    #[test]
    fn failing_file_is_announced_before_abort() {
        let input = dir_with_unreadable_page();
        let o = opts(input.path(), &input.path().join("out.json"), ReadPolicy::Abort);
        let mut buf = Vec::new();
        assert!(collect_to(&o, &mut buf).is_err());
        assert_eq!(
            report_lines(buf),
            ["Processing a-bronze.html...", "Processing b.html..."]
        );
    }

    fn dir_with_unreadable_page() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a-bronze.html"),
            r#"<div><img src="a.jpg"></div>"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("b.html")).unwrap();
        fs::write(dir.path().join("c.html"), r#"<div><img src="c.jpg"></div>"#).unwrap();
        dir
    }

    #[test]
    fn abort_policy_stops_on_unreadable_file() {
        let input = dir_with_unreadable_page();
        let output = input.path().join("out.json");
        let err = run(&opts(input.path(), &output, ReadPolicy::Abort)).unwrap_err();
        match err {
            ExtractError::ReadFile { path, .. } => assert!(path.ends_with("b.html")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn skip_policy_continues_past_unreadable_file() {
        let input = dir_with_unreadable_page();
        let output = input.path().join("out.json");
        let summary = run(&opts(input.path(), &output, ReadPolicy::Skip)).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert!(summary.skipped[0].ends_with("b.html"));
    }

    #[test]
    fn missing_input_directory_is_fatal() {
        let out = tempfile::tempdir().unwrap();
        let err = run(&opts(
            &out.path().join("backup"),
            &out.path().join("artworks.json"),
            ReadPolicy::Skip,
        ))
        .unwrap_err();
        assert!(matches!(err, ExtractError::ListDir { .. }));
    }

    #[test]
    fn empty_directory_writes_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("artworks.json");
        let summary = run(&opts(dir.path(), &output, ReadPolicy::Abort)).unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
    }
}
