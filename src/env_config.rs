//! Shared environment configuration for the experiment binaries.
//!
//! Consolidates `PROBSIM_BASE_PATH` and `RAYON_NUM_THREADS` reads shared by
//! all binaries.

use std::path::PathBuf;

/// Read `PROBSIM_BASE_PATH` (default `"."`), chdir. Exits on failure.
pub fn init_base_path() -> PathBuf {
    let base_path = std::env::var("PROBSIM_BASE_PATH").unwrap_or_else(|_| ".".to_string());
    let path = PathBuf::from(&base_path);
    if std::env::set_current_dir(&base_path).is_err() {
        eprintln!("Failed to change directory to {}", base_path);
        std::process::exit(1);
    }
    path
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8).
/// Builds the rayon global thread pool. Returns the thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    num_threads
}
