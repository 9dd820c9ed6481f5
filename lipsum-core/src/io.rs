use std::path::{Path, PathBuf};
use std::{fs, io};

/// Extension of the binary dictionary cache.
pub(crate) const CACHE_EXTENSION: &str = "bin";

/// Reads a dictionary source file line by line.
///
/// Both `\n` and `\r\n` line endings are accepted.
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	Ok(read_to_string(filename)?.lines().map(str::to_owned).collect())
}

/// Path of the binary cache kept next to a dictionary source.
///
/// `data/latin.dat` → `data/latin.bin`. A path that already carries the
/// cache extension is returned as is.
pub(crate) fn cache_path<P: AsRef<Path>>(source: P) -> io::Result<PathBuf> {
	let source = source.as_ref();
	if source.file_stem().is_none() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("{} does not name a dictionary file", source.display()),
		));
	}
	Ok(source.with_extension(CACHE_EXTENSION))
}

/// Returns `true` when `derived` exists and was modified no earlier than `source`.
///
/// Any metadata failure counts as stale so the caller rebuilds from source.
pub(crate) fn is_up_to_date<P, Q>(derived: P, source: Q) -> bool
where
	P: AsRef<Path>,
	Q: AsRef<Path>,
{
	let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
	match (modified(derived.as_ref()), modified(source.as_ref())) {
		(Some(derived), Some(source)) => derived >= source,
		_ => false,
	}
}

/// Reads a whole file into a string.
pub(crate) fn read_to_string<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}
