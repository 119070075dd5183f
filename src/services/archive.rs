//! Project archive packing and unpacking.
//!
//! A packed archive is the ASCII magic header followed by a DEFLATE zip of
//! the project directory. Packing replaces an existing archive through a
//! `.bak` sibling, so a failed pack never leaves the destination missing
//! or corrupt; unpacking accepts headerless raw zip files for backwards
//! compatibility.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::constants::ARCHIVE_MAGIC;

/// Packs a project directory into a single archive file.
///
/// When the destination already exists it is renamed to a `.bak` sibling
/// first. On success the backup is removed; on failure the partial output
/// is deleted and the backup renamed back, so the previous archive
/// survives byte for byte.
///
/// # Arguments
///
/// * `project_dir` - Directory tree to pack
/// * `archive_path` - Destination archive file
///
/// # Errors
///
/// Returns the underlying I/O or zip error. The destination is restored
/// to its previous state before the error is returned.
pub fn pack(project_dir: &Path, archive_path: &Path) -> io::Result<PathBuf> {
    let backup_path = backup_path_for(archive_path);
    let had_existing = archive_path.exists();
    if had_existing {
        if backup_path.exists() {
            fs::remove_file(&backup_path)?;
        }
        fs::rename(archive_path, &backup_path)?;
    }

    match write_archive(project_dir, archive_path) {
        Ok(()) => {
            if had_existing {
                if let Err(error) = fs::remove_file(&backup_path) {
                    warn!(
                        "Failed to remove archive backup {}: {}",
                        backup_path.display(),
                        error
                    );
                }
            }
            Ok(archive_path.to_path_buf())
        }
        Err(error) => {
            if archive_path.exists() {
                if let Err(cleanup) = fs::remove_file(archive_path) {
                    warn!(
                        "Failed to remove partial archive {}: {}",
                        archive_path.display(),
                        cleanup
                    );
                }
            }
            if had_existing {
                if let Err(restore) = fs::rename(&backup_path, archive_path) {
                    warn!(
                        "Failed to restore archive backup {}: {}",
                        backup_path.display(),
                        restore
                    );
                }
            }
            Err(error)
        }
    }
}

/// Unpacks an archive into a destination directory.
///
/// The magic header is sniffed first; files without it are treated as raw
/// zip archives. An existing destination directory is replaced wholesale.
/// The zip central directory sits at the end of the file and carries the
/// entry offsets, so the same reader handles both headered and raw files.
///
/// # Arguments
///
/// * `archive_path` - Archive file to unpack
/// * `dest_dir` - Directory to unpack into (recreated from scratch)
///
/// # Errors
///
/// Returns the underlying I/O or zip error, or `InvalidData` when an
/// entry name would escape the destination directory.
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let mut file = File::open(archive_path)?;
    let mut header = vec![0u8; ARCHIVE_MAGIC.len()];
    let has_header = file.read_exact(&mut header).is_ok() && header == ARCHIVE_MAGIC;
    if !has_header {
        debug!(
            "Archive {} has no magic header, reading as raw zip",
            archive_path.display()
        );
    }
    file.seek(SeekFrom::Start(0))?;

    if dest_dir.exists() {
        fs::remove_dir_all(dest_dir)?;
    }
    fs::create_dir_all(dest_dir)?;

    let mut archive = ZipArchive::new(file)?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let Some(relative) = entry.enclosed_name() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("archive entry escapes the destination: {}", entry.name()),
            ));
        };
        let target = dest_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(dest_dir.to_path_buf())
}

/// SHA-1 digest of a file as lowercase hex.
///
/// Returns `None` when the file does not exist or cannot be read; hashing
/// is informational and never fatal.
#[must_use]
pub fn hash(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match hash_file(path) {
        Ok(digest) => Some(digest),
        Err(error) => {
            warn!("Failed to hash {}: {}", path.display(), error);
            None
        }
    }
}

fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn backup_path_for(archive_path: &Path) -> PathBuf {
    let mut name = archive_path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

fn write_archive(project_dir: &Path, archive_path: &Path) -> io::Result<()> {
    let mut file = File::create(archive_path)?;
    file.write_all(ARCHIVE_MAGIC)?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(file);
    add_directory(&mut zip, project_dir, "", options)?;
    zip.finish()?;
    Ok(())
}

/// Recursively adds a directory's files to the zip.
///
/// Entry names are relative to the project directory and use forward
/// slashes on every platform. Entries are added in sorted order so the
/// same tree always packs to the same archive.
fn add_directory(
    zip: &mut ZipWriter<File>,
    dir: &Path,
    base: &str,
    options: SimpleFileOptions,
) -> io::Result<()> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(fs::DirEntry::path);

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_name = if base.is_empty() {
            name
        } else {
            format!("{base}/{name}")
        };
        if path.is_dir() {
            add_directory(zip, &path, &entry_name, options)?;
        } else {
            zip.start_file(entry_name.as_str(), options)?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, zip)?;
        }
    }
    Ok(())
}
