//! ROM file system scanner.
//!
//! Discovers NES ROM files (.nes extension) in directories and extracts
//! basic metadata.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// ROM file entry with metadata
#[derive(Debug, Clone)]
pub struct RomEntry {
    /// Full path to ROM file
    pub path: PathBuf,
    /// Display title (derived from filename)
    pub title: String,
    /// File size in bytes
    pub size: u64,
    /// Optional mapper number (extracted from iNES header)
    pub mapper: Option<u16>,
}

impl RomEntry {
    /// Create ROM entry from file path
    ///
    /// Reads file metadata and attempts to extract mapper information
    /// from the iNES header.
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        // Extract title from filename
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();

        // Get file size
        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        // Try to extract mapper number from iNES header
        let mapper = Self::extract_mapper_number(&path);

        Self {
            path,
            title,
            size,
            mapper,
        }
    }

    /// Extract mapper number from iNES header
    ///
    /// Reads the first 16 bytes of the ROM file and parses the iNES header
    /// to extract the mapper number.
    fn extract_mapper_number(path: &Path) -> Option<u16> {
        // Read first 16 bytes (iNES header)
        let header = fs::read(path).ok()?;
        if header.len() < 16 {
            return None;
        }

        // Check for iNES magic number "NES\x1A"
        if &header[0..4] != b"NES\x1A" {
            return None;
        }

        // Extract mapper number (bits 4-7 of byte 6, bits 4-7 of byte 7)
        let mapper_low = (header[6] & 0xF0) >> 4;
        let mapper_high = header[7] & 0xF0;
        let mapper = u16::from(mapper_high | mapper_low);

        Some(mapper)
    }

    /// Format file size as human-readable string
    #[must_use]
    pub fn size_display(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if self.size >= MB {
            format!("{:.2} MB", self.size as f64 / MB as f64)
        } else if self.size >= KB {
            format!("{:.2} KB", self.size as f64 / KB as f64)
        } else {
            format!("{} B", self.size)
        }
    }

    /// Get mapper display string
    #[must_use]
    pub fn mapper_display(&self) -> String {
        match self.mapper {
            Some(mapper) => format!("Mapper {mapper}"),
            None => "Unknown".to_string(),
        }
    }
}

/// ROM scanner for discovering .nes files
pub struct RomScanner;

impl RomScanner {
    /// Scan directory for .nes files
    ///
    /// Recursively scans the directory (up to 1 level deep) and returns
    /// all discovered ROM files sorted alphabetically.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory to scan
    ///
    /// # Returns
    ///
    /// Vector of ROM entries, sorted by title
    #[must_use]
    pub fn scan_directory(dir: &Path) -> Vec<RomEntry> {
        let mut roms = Vec::new();

        if !dir.exists() {
            warn!("ROM directory does not exist: {}", dir.display());
            return roms;
        }

        if !dir.is_dir() {
            warn!("ROM path is not a directory: {}", dir.display());
            return roms;
        }

        Self::scan_recursive(dir, &mut roms, 0, 1);

        // Sort alphabetically by title
        roms.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

        roms
    }

    /// Recursively scan directory
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory to scan
    /// * `roms` - Vector to accumulate ROM entries
    /// * `depth` - Current recursion depth
    /// * `max_depth` - Maximum recursion depth
    fn scan_recursive(dir: &Path, roms: &mut Vec<RomEntry>, depth: usize, max_depth: usize) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to read directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();

            if path.is_file() {
                // Check for .nes extension
                if let Some(ext) = path.extension() {
                    if ext.eq_ignore_ascii_case("nes") {
                        roms.push(RomEntry::from_path(path));
                    }
                }
            } else if path.is_dir() && depth < max_depth {
                // Recurse into subdirectory
                Self::scan_recursive(&path, roms, depth + 1, max_depth);
            }
        }
    }

    /// Quick scan for ROM count (doesn't extract metadata)
    ///
    /// Useful for showing progress indicators during large scans.
    #[must_use]
    #[allow(dead_code)] // Future: progress bar during library scanning
    pub fn count_roms(dir: &Path) -> usize {
        if !dir.is_dir() {
            return 0;
        }

        let mut count = 0;
        Self::count_recursive(dir, &mut count, 0, 1);
        count
    }

    /// Recursively count ROMs
    #[allow(dead_code)] // Future: used by count_roms for progress indicators
    fn count_recursive(dir: &Path, count: &mut usize, depth: usize, max_depth: usize) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();

                if path.is_file() {
                    if let Some(ext) = path.extension() {
                        if ext.eq_ignore_ascii_case("nes") {
                            *count += 1;
                        }
                    }
                } else if path.is_dir() && depth < max_depth {
                    Self::count_recursive(&path, count, depth + 1, max_depth);
                }
            }
        }
    }
}
