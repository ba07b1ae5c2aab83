use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success};
use crate::utils::path::expand_tilde;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;


impl BackupLogic {
    /// Copy the database to `dest_file`, optionally zipping it.
    /// Returns the path of the final backup, or None if the user declined
    /// to overwrite an existing file.
    pub fn backup(
        pool: &mut DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = expand_tilde(dest_file);

        if !src.exists() {
            return Err(AppError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.clone()
        };

        if final_target.exists()
            && !force
            && !confirm(format!(
                "The file '{}' already exists. Overwrite?",
                final_target.display()
            ))?
        {
            info("Backup cancelled by user.");
            return Ok(None);
        }

        // flush WAL pages into the main file before copying
        pool.conn.execute_batch("PRAGMA wal_checkpoint(FULL);").ok();

        let final_path = if compress {
            compress_backup(src, &final_target)?
        } else {
            fs::copy(src, &dest)?;
            dest.clone()
        };

        success(format!("Backup created: {}", final_path.display()));

        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }
}

/// Write `src` into a new zip archive at `zip_path`.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "crewtime.sqlite".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    Ok(zip_path.to_path_buf())
}
