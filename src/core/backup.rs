use crate::db::log::{AuditOp, AuditTarget, ttlog};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write a consistent snapshot of the database to `dest_file`
    /// (`VACUUM INTO`), optionally zipped.
    pub fn backup(pool: &mut DbPool, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() {
            if !force && !confirm_overwrite(dest)? {
                return Err(AppError::from(io::Error::other(
                    "Backup cancelled: existing file not overwritten",
                )));
            }
            fs::remove_file(dest)?;
        }

        pool.conn
            .execute("VACUUM INTO ?1", [dest.to_string_lossy().as_ref()])?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        // audit line is best effort
        if let Err(e) = ttlog(
            &pool.conn,
            AuditOp::Backup,
            &AuditTarget::File(final_path.to_string_lossy().to_string()),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(final_path)
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", dest.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ok = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
    if ok {
        info("Existing file will be overwritten.");
    }
    Ok(ok)
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "holical.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options).map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));
    Ok(zip_path)
}
