use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

const LINE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                self.buf.clear();
                let n = self.reader.read_line(&mut self.buf)?;
                if n == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break rest.trim().to_string();
                }
            }
        };

        // 描述部分不参与组装，只保留 ID
        let id = header.split_whitespace().next().unwrap_or("").to_string();

        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some(rest.trim().to_string());
                break;
            }
            for &b in self.buf.as_bytes() {
                match b {
                    b'\n' | b'\r' | b' ' | b'\t' => {}
                    _ => seq.push(b.to_ascii_uppercase()),
                }
            }
        }

        Ok(Some(FastaRecord { id, seq }))
    }

    pub fn records(mut self) -> Result<Vec<FastaRecord>> {
        let mut out = Vec::new();
        while let Some(rec) = self.next_record()? {
            out.push(rec);
        }
        Ok(out)
    }
}

pub fn read_fasta_file(path: &Path) -> Result<Vec<FastaRecord>> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("cannot open FASTA file '{}'", path.display()))?;
    FastaReader::new(std::io::BufReader::new(fh))
        .records()
        .with_context(|| format!("cannot parse FASTA file '{}'", path.display()))
}

/// Write one record, wrapping the sequence at 60 columns.
pub fn write_record<W: Write>(out: &mut W, id: &str, seq: &[u8]) -> Result<()> {
    writeln!(out, ">{}", id)?;
    for line in seq.chunks(LINE_WIDTH) {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
