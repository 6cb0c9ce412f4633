//! BED/BEDPE interval record types and their tab-delimited serialization.

use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct BedRecord {
    pub chrom: String,
    pub start: usize,
    pub end: usize,
    pub name: String,
}

impl BedRecord {
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct BedPeRecord {
    pub chrom1: String,
    pub start1: usize,
    pub end1: usize,
    pub chrom2: String,
    pub start2: usize,
    pub end2: usize,
    pub name: String,
    pub score: u8,
    pub strand1: char,
    pub strand2: char,
}

impl BedPeRecord {
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom1,
            self.start1,
            self.end1,
            self.chrom2,
            self.start2,
            self.end2,
            self.name,
            self.score,
            self.strand1,
            self.strand2
        )
    }
}
