use std::io::Write;

use crate::error::MarkovError;

/// Destination of a finished text.
///
/// Authentication and delivery to a remote service live behind this trait;
/// the generation pipeline only hands over the final string.
pub trait Publisher {
	fn publish(&mut self, text: &str) -> Result<(), MarkovError>;
}

/// Writes each text on its own line to any `Write` sink (stdout by default).
pub struct WritePublisher<W: Write> {
	out: W,
}

impl WritePublisher<std::io::Stdout> {
	pub fn stdout() -> Self {
		Self { out: std::io::stdout() }
	}
}

impl<W: Write> WritePublisher<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Publisher for WritePublisher<W> {
	fn publish(&mut self, text: &str) -> Result<(), MarkovError> {
		writeln!(self.out, "{text}")?;
		self.out.flush()?;
		Ok(())
	}
}
