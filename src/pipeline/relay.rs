//! Forwarding sub-tool output to its destination.

use crate::error::{Result, SdsError};
use std::io::{self, ErrorKind, Read, Write};
use tracing::warn;

/// Bytes inspected before deciding whether to page.
pub const FIRST_BLOCK: usize = 4096;

/// How a relay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Every byte reached the destination.
    Complete,
    /// The destination closed early; the rest was drained and discarded.
    Closed,
}

/// Read up to [`FIRST_BLOCK`] bytes, stopping early only at end of stream.
pub fn read_first_block<R: Read>(source: &mut R) -> Result<Vec<u8>> {
    let mut block = Vec::with_capacity(FIRST_BLOCK);
    source
        .by_ref()
        .take(FIRST_BLOCK as u64)
        .read_to_end(&mut block)?;
    Ok(block)
}

/// Write `first` and then the rest of `source` to `sink`, in order.
///
/// A broken pipe on `sink` is not an error: `source` is read to its end so
/// the producer never blocks, and [`Delivery::Closed`] is returned.
pub fn forward<R: Read, W: Write>(first: &[u8], source: &mut R, sink: &mut W) -> Result<Delivery> {
    match copy_all(first, source, sink) {
        Ok(()) => Ok(Delivery::Complete),
        Err(Failure::Write(e)) if e.kind() == ErrorKind::BrokenPipe => {
            let discarded = io::copy(source, &mut io::sink())?;
            warn!(discarded, "destination closed early, drained remaining output");
            Ok(Delivery::Closed)
        }
        Err(Failure::Write(e)) => Err(SdsError::Relay(e)),
        Err(Failure::Read(e)) => Err(SdsError::Io(e)),
    }
}

enum Failure {
    Read(io::Error),
    Write(io::Error),
}

fn copy_all<R: Read, W: Write>(first: &[u8], source: &mut R, sink: &mut W) -> std::result::Result<(), Failure> {
    sink.write_all(first).map_err(Failure::Write)?;

    let mut buf = [0u8; FIRST_BLOCK];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Failure::Read(e)),
        };
        sink.write_all(&buf[..n]).map_err(Failure::Write)?;
    }
    sink.flush().map_err(Failure::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Subprocess;
    use std::io::Cursor;
    use std::process::Command;

    /// Accepts `limit` bytes, then behaves like a closed pipe.
    struct ClosingSink {
        taken: Vec<u8>,
        limit: usize,
        kind: ErrorKind,
    }

    impl ClosingSink {
        fn new(limit: usize, kind: ErrorKind) -> Self {
            Self {
                taken: Vec::new(),
                limit,
                kind,
            }
        }
    }

    impl Write for ClosingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.taken.len();
            if room == 0 {
                return Err(io::Error::new(self.kind, "closed"));
            }
            let n = room.min(buf.len());
            self.taken.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_block_fills_before_returning() {
        // chain yields short reads at the seam
        let mut source = Cursor::new(vec![b'a'; 100]).chain(Cursor::new(vec![b'b'; 10_000]));
        let block = read_first_block(&mut source).unwrap();
        assert_eq!(block.len(), FIRST_BLOCK);
        assert_eq!(&block[..100], &[b'a'; 100][..]);

        let mut rest = Vec::new();
        source.read_to_end(&mut rest).unwrap();
        assert_eq!(rest.len(), 10_100 - FIRST_BLOCK);
    }

    #[test]
    fn short_output_is_one_block() {
        let mut source = Cursor::new(b"tiny\n".to_vec());
        assert_eq!(read_first_block(&mut source).unwrap(), b"tiny\n");
    }

    #[test]
    fn forwards_everything_in_order() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let mut source = Cursor::new(data.clone());
        let first = read_first_block(&mut source).unwrap();

        let mut sink = Vec::new();
        let delivery = forward(&first, &mut source, &mut sink).unwrap();
        assert_eq!(delivery, Delivery::Complete);
        assert_eq!(sink, data);
    }

    #[test]
    fn broken_pipe_drains_the_source() {
        let mut source = Cursor::new(vec![b'x'; 50_000]);
        let mut sink = ClosingSink::new(1000, ErrorKind::BrokenPipe);

        let delivery = forward(b"head", &mut source, &mut sink).unwrap();
        assert_eq!(delivery, Delivery::Closed);
        assert_eq!(sink.taken.len(), 1000);
        assert_eq!(source.position(), 50_000);
    }

    #[test]
    fn other_write_errors_are_fatal() {
        let mut source = Cursor::new(vec![b'x'; 10]);
        let mut sink = ClosingSink::new(0, ErrorKind::PermissionDenied);
        let err = forward(b"head", &mut source, &mut sink).unwrap_err();
        assert!(matches!(err, SdsError::Relay(_)));
        assert!(err.to_string().starts_with("writing output from command: "));
    }

    #[test]
    fn producer_is_reaped_after_early_close() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("yes | head -n 100000");
        let (producer, mut output) = Subprocess::reading(command, "sh").unwrap();

        let first = read_first_block(&mut output).unwrap();
        let mut sink = ClosingSink::new(10, ErrorKind::BrokenPipe);
        assert_eq!(
            forward(&first, &mut output, &mut sink).unwrap(),
            Delivery::Closed
        );
        drop(output);
        assert!(producer.wait().unwrap().success());
    }

    #[test]
    fn pager_that_exits_early_is_tolerated() {
        let (pager, mut input) = Subprocess::writing(Command::new("true"), "true").unwrap();
        let mut source = Cursor::new(vec![b'y'; 1 << 20]);

        let delivery = forward(b"", &mut source, &mut input).unwrap();
        assert_eq!(delivery, Delivery::Closed);
        drop(input);
        assert!(pager.wait().unwrap().success());
    }
}
