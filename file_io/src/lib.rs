use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn create_file_buf_write<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

pub fn open_file_buf_read<P: AsRef<Path>>(path: P) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

// directly copied from [https://doc.rust-lang.org/std/io/trait.BufRead.html#method.has_data_left]
// unfortunately, that method isn't stable yet
pub fn has_data_left<R: BufRead>(mut reader: R) -> io::Result<bool> {
    reader.fill_buf().map(|b| !b.is_empty())
}

fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()),
        )
    })?;
    let mut temp_name = OsString::from(format!(".tmp_{}_", std::process::id()));
    temp_name.push(file_name);
    Ok(match path.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

/// Writes the file through `write` into a temporary sibling, syncs it and
/// renames it over `path`.
///
/// The rename is atomic on POSIX filesystems, so readers either observe the
/// previous contents or the complete new contents, never a partial write.
pub fn replace_file_atomically<P, F>(path: P, write: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let path = path.as_ref();
    let temp_path = temp_sibling(path)?;
    let result = (|| {
        let mut writer = create_file_buf_write(&temp_path)?;
        write(&mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();
    if result.is_err() {
        // the temp file is garbage at this point, the destination is untouched
        let _ = fs::remove_file(&temp_path);
    }
    result
}
