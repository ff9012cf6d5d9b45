use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::fs_utils::ensure_writable;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copies the database file to `dest_file`, optionally compressing it.
    /// Returns the path actually written, or `None` when the user declined
    /// to overwrite an existing file.
    pub fn backup(
        pool: &mut DbPool,
        db_path: &str,
        dest_file: &str,
        compress: Option<ArchiveFormat>,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = expand_tilde(dest_file);

        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        let final_target = match compress {
            Some(format) => format.archive_path(&dest),
            None => dest.clone(),
        };
        if !ensure_writable(&final_target, force)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        // Flush the WAL (if any) so the copied file is self-contained.
        pool.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);").ok();

        fs::copy(src, &dest)?;
        info(format!("Database copied to {}", dest.display()));

        let final_path = match compress {
            Some(format) => {
                let compressed = format.compress(&dest)?;
                if let Err(e) = fs::remove_file(&dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                }
                compressed
            }
            None => dest,
        };

        ttlog_soft(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress.is_some() {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        success(format!("Backup created: {}", final_path.display()));
        Ok(Some(final_path))
    }
}

/// Archive container used by `backup --compress`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArchiveFormat {
    #[value(name = "tar.gz", alias = "targz")]
    TarGz,
    Zip,
}

impl Default for ArchiveFormat {
    /// `.zip` on Windows, `.tar.gz` elsewhere.
    fn default() -> Self {
        if cfg!(target_os = "windows") {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }
}

impl ArchiveFormat {
    /// Archive name next to the plain copy.
    fn archive_path(&self, path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(match self {
            ArchiveFormat::TarGz => ".tar.gz",
            ArchiveFormat::Zip => ".zip",
        });
        PathBuf::from(name)
    }

    fn compress(&self, path: &Path) -> AppResult<PathBuf> {
        let archive = self.archive_path(path);
        let file = fs::File::create(&archive)?;

        match self {
            ArchiveFormat::TarGz => {
                let encoder = GzEncoder::new(file, Compression::default());
                let mut tar = tar::Builder::new(encoder);
                tar.append_path_with_name(path, entry_name(path)?)?;
                tar.into_inner()?.finish()?;
            }
            ArchiveFormat::Zip => {
                let mut zip = ZipWriter::new(file);
                let options: FileOptions<'_, ()> =
                    FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

                let mut f = fs::File::open(path)?;
                zip.start_file(entry_name(path)?, options)
                    .map_err(std::io::Error::other)?;
                std::io::copy(&mut f, &mut zip)?;
                zip.finish().map_err(std::io::Error::other)?;
            }
        }

        info(format!("Compressed: {}", archive.display()));
        Ok(archive)
    }
}

fn entry_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Other(format!("invalid backup path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ritinerary_backup_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn plain_and_compressed_backups() {
        let dir = temp_dir("both");
        let db = dir.join("db.sqlite");
        let db_str = db.to_string_lossy().to_string();
        let mut pool = DbPool::new(&db_str).unwrap();
        init_db(&pool.conn).unwrap();

        let plain = dir.join("copy.sqlite");
        let out = BackupLogic::backup(&mut pool, &db_str, &plain.to_string_lossy(), None, true)
            .unwrap()
            .unwrap();
        assert_eq!(out, plain);
        assert!(plain.exists());

        for format in [ArchiveFormat::TarGz, ArchiveFormat::Zip] {
            let packed = dir.join("packed.sqlite");
            let out = BackupLogic::backup(&mut pool, &db_str, &packed.to_string_lossy(), Some(format), true)
                .unwrap()
                .unwrap();
            assert!(out.exists());
            assert!(!packed.exists());
            assert!(fs::metadata(&out).unwrap().len() > 0);
        }
        assert!(dir.join("packed.sqlite.tar.gz").exists());
        assert!(dir.join("packed.sqlite.zip").exists());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_database_is_an_error() {
        let dir = temp_dir("missing");
        let mut pool = DbPool::in_memory().unwrap();
        let res = BackupLogic::backup(
            &mut pool,
            &dir.join("nope.sqlite").to_string_lossy(),
            &dir.join("out.sqlite").to_string_lossy(),
            None,
            true,
        );
        assert!(res.is_err());
        let _ = fs::remove_dir_all(dir);
    }
}
