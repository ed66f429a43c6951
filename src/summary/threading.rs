use super::collectors::Accumulator;
use super::core::SummaryProfile;
use super::pipeline::accumulate_path;
use crate::error::Result as SummaryResult;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::thread;

type Finished = Vec<(usize, SummaryResult<Accumulator>)>;

/// Worker threads that each accumulate whole files.
///
/// Every file is handled by exactly one worker, so no accumulator is ever
/// shared. Results carry the submission index and come back in that order.
pub struct FilePool {
    handles: Vec<thread::JoinHandle<Finished>>,
    tx: Sender<(usize, PathBuf)>,
    num_threads: usize,
}

impl FilePool {
    pub fn new(profile: SummaryProfile, num_threads: usize, progress: &ProgressBar) -> Self {
        let num_threads = num_threads.max(1);
        let (tx, rx) = bounded::<(usize, PathBuf)>(num_threads * 2);
        let mut handles = Vec::with_capacity(num_threads);

        for _ in 0..num_threads {
            let rx = rx.clone();
            let profile = profile.clone();
            let progress = progress.clone();
            let handle = thread::spawn(move || {
                let mut finished = Vec::new();
                while let Ok((index, path)) = rx.recv() {
                    progress.set_message(format!("Reading {}", path.display()));
                    finished.push((index, accumulate_path(&path, &profile)));
                    progress.inc(1);
                }
                finished
            });
            handles.push(handle);
        }

        FilePool {
            handles,
            tx,
            num_threads,
        }
    }

    pub fn send(&self, index: usize, path: PathBuf) -> Result<()> {
        self.tx
            .send((index, path))
            .map_err(|_| anyhow!("all summary workers have stopped"))
    }

    /// Wait for the workers and return their results sorted by index.
    pub fn finish(self) -> Result<Finished> {
        drop(self.tx);

        let collect_progress = ProgressBarBuilder::new("Collecting results")
            .with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .build()?;

        let mut results = Vec::new();
        for (idx, handle) in self.handles.into_iter().enumerate() {
            collect_progress.set_message(format!(
                "Collecting worker {} of {}",
                idx + 1,
                self.num_threads
            ));
            let finished = handle
                .join()
                .map_err(|_| anyhow!("summary worker {} panicked", idx + 1))?;
            results.extend(finished);
        }
        collect_progress.finish_and_clear();

        results.sort_by_key(|(index, _)| *index);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn results_come_back_in_submission_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for i in 0..12u64 {
            let path = dir.path().join(format!("sequencing_summary_{}.txt", i));
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "read_id\tsequence_length_template").unwrap();
            for j in 0..=i {
                writeln!(file, "r{}\t{}", j, 100 * (i + 1)).unwrap();
            }
            paths.push(path);
        }
        paths.push(dir.path().join("missing.txt"));

        let pool = FilePool::new(SummaryProfile::reads(), 4, &ProgressBar::hidden());
        for (index, path) in paths.iter().enumerate() {
            pool.send(index, path.clone()).unwrap();
        }
        let results = pool.finish().unwrap();

        assert_eq!(results.len(), 13);
        for (i, (index, outcome)) in results.iter().take(12).enumerate() {
            assert_eq!(*index, i);
            let acc = outcome.as_ref().unwrap();
            assert_eq!(acc.total_reads(), i as u64 + 1);
            assert_eq!(acc.source_names()[0], paths[i].to_string_lossy());
        }
        assert!(results[12].1.is_err());
    }
}
