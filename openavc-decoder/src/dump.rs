//! Raw bitstream dump diagnostics.
//!
//! When enabled, every access unit passed to `decode_frame` is mirrored to a
//! `.264` file, with the per-access-unit lengths recorded in a companion
//! `.len` file so the stream can be replayed call by call. Purely
//! diagnostic: write failures are logged and never fail the decode.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

/// Paired bitstream/length dump files for one decoder instance.
#[derive(Debug)]
pub struct BitstreamDump {
    bitstream: BufWriter<File>,
    lengths: BufWriter<File>,
}

impl BitstreamDump {
    /// Create a dump pair in `dir`, named with the current wall-clock time.
    pub fn create(dir: &Path) -> io::Result<Self> {
        let stamp = chrono::Local::now().format("%y%m%d%H%M%S%3f");
        let bs_path = dir.join(format!("bs_{stamp}.264"));
        let len_path = dir.join(format!("bs_{stamp}.len"));

        let dump = Self {
            bitstream: BufWriter::new(File::create(&bs_path)?),
            lengths: BufWriter::new(File::create(&len_path)?),
        };
        debug!(path = %bs_path.display(), "bitstream dump enabled");
        Ok(dump)
    }

    /// Mirror one access unit. Errors are logged, not propagated.
    pub fn record(&mut self, access_unit: &[u8]) {
        if let Err(e) = self.try_record(access_unit) {
            warn!(error = %e, "bitstream dump write failed");
        }
    }

    fn try_record(&mut self, access_unit: &[u8]) -> io::Result<()> {
        self.bitstream.write_all(access_unit)?;
        self.bitstream.flush()?;
        self.lengths
            .write_all(&(access_unit.len() as u32).to_le_bytes())?;
        self.lengths.flush()?;
        Ok(())
    }
}
