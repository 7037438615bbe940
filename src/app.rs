// Orchestrator: prompt -> search -> parallel download -> report.
//
// Prompting and searching run on the calling thread. Downloads run on a
// dedicated rayon pool sized by the configured concurrency; the pool's
// `install` call is the join barrier, and collecting from an indexed
// parallel iterator keeps outcomes in search-result order.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::api::{PhotoSearch, SearchResult};
use crate::config::Config;
use crate::download::{DownloadTask, ImageDownloader};
use crate::error::Result;
use crate::slug;
use crate::ui::Prompter;

/// Result of one download, together with what is needed to report it.
#[derive(Debug)]
pub struct ItemOutcome {
    pub task: DownloadTask,
    pub author: String,
    pub caption: Option<String>,
    pub result: Result<PathBuf>,
}

/// Per-item outcomes of a completed run, in search-result order.
#[derive(Debug)]
pub struct Report {
    pub folder: PathBuf,
    pub items: Vec<ItemOutcome>,
}

impl Report {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// The search matched nothing; no download was attempted.
    NoResults { term: String },
    Completed(Report),
}

pub struct App<P, S, D> {
    prompter: P,
    search: S,
    downloader: D,
    output_dir: PathBuf,
    concurrency: usize,
}

impl<P, S, D> App<P, S, D>
where
    P: Prompter,
    S: PhotoSearch,
    D: ImageDownloader + Sync,
{
    pub fn new(prompter: P, search: S, downloader: D, config: &Config) -> Self {
        App {
            prompter,
            search,
            downloader,
            output_dir: config.output_dir.clone(),
            concurrency: config.concurrency.max(1),
        }
    }

    /// Run the whole workflow once. Prompt and search failures abort the
    /// run; download failures are recorded in the report and do not.
    pub fn run(&self) -> Result<RunOutcome> {
        let selection = self.prompter.prompt()?;

        println!("Searching for \"{}\"...", selection.term);
        let response = self.search.search(&selection.term, selection.count)?;
        info!(
            "{} matches across {} pages",
            response.total, response.total_pages
        );

        if response.results.is_empty() {
            println!("No images found for \"{}\".", selection.term);
            return Ok(RunOutcome::NoResults {
                term: selection.term,
            });
        }

        let slug = slug::sanitize(&selection.term);
        let folder = self.output_dir.join(&slug);
        let jobs: Vec<(DownloadTask, &SearchResult)> = response
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let task = DownloadTask::new(&slug, i + 1, result, selection.size, &folder);
                (task, result)
            })
            .collect();

        println!(
            "Downloading {} {} images into {}...",
            jobs.len(),
            selection.size,
            folder.display()
        );
        let items = self.download_all(jobs)?;

        let report = Report { folder, items };
        print_report(&report);
        Ok(RunOutcome::Completed(report))
    }

    fn download_all(&self, jobs: Vec<(DownloadTask, &SearchResult)>) -> Result<Vec<ItemOutcome>> {
        let threads = self.concurrency.min(jobs.len()).max(1);
        info!("starting {} download workers for {} images", threads, jobs.len());
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

        let progress = ProgressBar::new(jobs.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            progress.set_style(style.progress_chars("#>-"));
        }

        let downloader = &self.downloader;
        let items = pool.install(|| {
            jobs.into_par_iter()
                .map(|(task, result)| {
                    let outcome = downloader.download(&task);
                    if let Err(e) = &outcome {
                        warn!("download of {} failed: {}", task.file_name, e);
                    }
                    progress.set_message(task.file_name.clone());
                    progress.inc(1);
                    ItemOutcome {
                        author: result.author().to_string(),
                        caption: result.caption().map(str::to_string),
                        task,
                        result: outcome,
                    }
                })
                .collect::<Vec<_>>()
        });

        progress.finish_and_clear();
        Ok(items)
    }
}

fn print_report(report: &Report) {
    let total = report.items.len();
    for item in &report.items {
        match &item.result {
            Ok(_) => println!("{}", success_line(item, total)),
            Err(e) => eprintln!(
                "  [{}/{}] FAILED {}: {}",
                item.task.position, total, item.task.file_name, e
            ),
        }
    }
    println!(
        "Downloaded {} of {} images into {}",
        report.succeeded(),
        total,
        report.folder.display()
    );
}

fn success_line(item: &ItemOutcome, total: usize) -> String {
    let mut line = format!(
        "  [{}/{}] OK     {} (photo by {})",
        item.task.position, total, item.task.file_name, item.author
    );
    if let Some(caption) = &item.caption {
        line.push_str(&format!(" - {}", caption));
    }
    line
}
