//! Record formatting for the final listing.

use std::io::{self, Write};
use std::path::Path;

/// Output options.
#[derive(Debug, Clone, Copy)]
pub struct EmitConfig {
    /// Write `"<label>: <path>"` instead of just `"<path>"`.
    pub mime_format: bool,
    /// Record terminator byte (`b'\n'` or `b'\0'`).
    pub terminator: u8,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            mime_format: false,
            terminator: b'\n',
        }
    }
}

/// Writes one record per path.  Paths containing the terminator byte are
/// written as-is.
pub struct Emitter<W: Write> {
    out: W,
    config: EmitConfig,
    records: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, config: EmitConfig) -> Self {
        Self {
            out,
            config,
            records: 0,
        }
    }

    pub fn emit(&mut self, label: &str, path: &Path) -> io::Result<()> {
        if self.config.mime_format {
            self.out.write_all(label.as_bytes())?;
            self.out.write_all(b": ")?;
        }
        write_path(&mut self.out, path)?;
        self.out.write_all(&[self.config.terminator])?;
        self.records += 1;
        Ok(())
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> io::Result<usize> {
        self.out.flush()?;
        Ok(self.records)
    }
}

#[cfg(unix)]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    out.write_all(path.to_string_lossy().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(config: EmitConfig, records: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut emitter = Emitter::new(&mut buf, config);
        for (label, path) in records {
            emitter.emit(label, Path::new(path)).unwrap();
        }
        assert_eq!(emitter.finish().unwrap(), records.len());
        buf
    }

    #[test]
    fn test_plain_records() {
        let out = render(
            EmitConfig::default(),
            &[("inode/symlink", "dir/link"), ("text/plain", "dir/a.txt")],
        );
        assert_eq!(out, b"dir/link\ndir/a.txt\n");
    }

    #[test]
    fn test_mime_format_records() {
        let config = EmitConfig {
            mime_format: true,
            ..Default::default()
        };
        let out = render(config, &[("inode/symlink", "link"), ("text/plain", "a.txt")]);
        assert_eq!(out, b"inode/symlink: link\ntext/plain: a.txt\n");
    }

    #[test]
    fn test_null_terminator() {
        let config = EmitConfig {
            mime_format: false,
            terminator: 0,
        };
        let out = render(config, &[("text/plain", "a b.txt"), ("text/plain", "c.txt")]);
        assert_eq!(out, b"a b.txt\0c.txt\0");
        assert!(!out.contains(&b'\n'));
    }
}
