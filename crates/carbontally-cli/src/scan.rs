use anyhow::{Context, Result};
use carbontally_core::ingest::IngestorRegistry;
use std::fs;
use std::path::{Path, PathBuf};

/// Information about a file discovered during directory scanning
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path to the file
    pub path: PathBuf,

    /// Detected format name
    pub format_name: String,

    /// File size in bytes
    pub size: u64,
}

/// Scan a directory for supported files
pub fn scan_directory(
    dir_path: &Path,
    registry: &IngestorRegistry,
    recursive: bool,
) -> Result<Vec<DiscoveredFile>> {
    let mut discovered = Vec::new();

    let supported_extensions = registry.supported_extensions();

    let entries = fs::read_dir(dir_path)
        .context(format!("Failed to read directory: {}", dir_path.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        // Handle subdirectories if recursive
        if path.is_dir() && recursive {
            let sub_files = scan_directory(&path, registry, recursive)?;
            discovered.extend(sub_files);
            continue;
        }

        // Skip non-files
        if !path.is_file() {
            continue;
        }

        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            if !supported_extensions
                .iter()
                .any(|s| s.eq_ignore_ascii_case(extension))
            {
                continue;
            }

            let metadata = fs::metadata(&path)
                .context(format!("Failed to read file metadata: {}", path.display()))?;

            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                if let Ok(ingestor) = registry.detect_format(file_name) {
                    discovered.push(DiscoveredFile {
                        path: path.clone(),
                        format_name: ingestor.format_name().to_string(),
                        size: metadata.len(),
                    });
                }
            }
        }
    }

    // Directory iteration order varies by filesystem; sorted paths keep
    // seeded batches reproducible
    discovered.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(discovered)
}
