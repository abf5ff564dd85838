use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads everything from `reader` and splits it into whitespace-delimited tokens.
///
/// - Punctuation stays attached to its token
/// - Line breaks count as whitespace
/// - Fails with `InvalidData` on non UTF-8 input
pub(crate) fn read_tokens<R: Read>(mut reader: R) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	reader.read_to_string(&mut contents)?;
	Ok(contents.split_whitespace().map(str::to_owned).collect())
}

/// Reads a whole text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}
