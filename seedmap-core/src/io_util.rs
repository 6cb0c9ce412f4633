//! Transparent gzip/plain file opening shared by reference parsing and the
//! partitioner.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::MapperError;

pub fn open_for_read(path: &Path) -> Result<Box<dyn BufRead>, MapperError> {
    open_for_read_at(path, 0)
}

/// Opens `path` positioned at decompressed byte offset `start_byte`.
///
/// Plain files seek directly. Gzip streams aren't randomly addressable, so
/// the decoder is started from the beginning and the prefix is read and
/// discarded; this mirrors how the partitioner's own boundary-finding passes
/// already have to walk the stream sequentially.
pub fn open_for_read_at(path: &Path, start_byte: u64) -> Result<Box<dyn BufRead>, MapperError> {
    if is_gzip(path)? {
        let file = File::open(path)?;
        let mut reader: Box<dyn BufRead> = Box::new(BufReader::new(MultiGzDecoder::new(file)));
        if start_byte > 0 {
            skip_bytes(&mut reader, start_byte)?;
        }
        Ok(reader)
    } else {
        let mut file = File::open(path)?;
        if start_byte > 0 {
            file.seek(SeekFrom::Start(start_byte))?;
        }
        Ok(Box::new(BufReader::new(file)))
    }
}

fn is_gzip(path: &Path) -> Result<bool, MapperError> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let n = file.read(&mut magic)?;
    Ok(n == 2 && magic == [0x1f, 0x8b])
}

fn skip_bytes(reader: &mut Box<dyn BufRead>, mut n: u64) -> Result<(), MapperError> {
    let mut buf = [0u8; 64 * 1024];
    while n > 0 {
        let take = n.min(buf.len() as u64) as usize;
        let read = reader.read(&mut buf[..take])?;
        if read == 0 {
            break;
        }
        n -= read as u64;
    }
    Ok(())
}
