//! Library orientation modes and their probe descriptors.
//!
//! Every paired mode reduces to one or two `Probe`s: which mate is searched
//! first (the anchor), whether it's searched as-is or reverse-complemented,
//! the strand label that choice implies for the output record, and whether
//! the mode is an inward- or outward-facing library (which decides both the
//! mate-order constraint and the `--disjoin` sequence-index direction).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Isf,
    Isr,
    Iu,
    Osf,
    Osr,
    Ou,
    Sf,
    Sr,
    U,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Mode> {
        match s {
            "ISF" => Some(Mode::Isf),
            "ISR" => Some(Mode::Isr),
            "IU" => Some(Mode::Iu),
            "OSF" => Some(Mode::Osf),
            "OSR" => Some(Mode::Osr),
            "OU" => Some(Mode::Ou),
            "SF" => Some(Mode::Sf),
            "SR" => Some(Mode::Sr),
            "U" => Some(Mode::U),
            _ => None,
        }
    }

    pub fn is_paired(self) -> bool {
        matches!(self, Mode::Isf | Mode::Isr | Mode::Iu | Mode::Osf | Mode::Osr | Mode::Ou)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Isf => "ISF",
            Mode::Isr => "ISR",
            Mode::Iu => "IU",
            Mode::Osf => "OSF",
            Mode::Osr => "OSR",
            Mode::Ou => "OU",
            Mode::Sf => "SF",
            Mode::Sr => "SR",
            Mode::U => "U",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mate {
    R1,
    R2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inward,
    Outward,
}

#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub anchor_mate: Mate,
    pub anchor_revcomp: bool,
    pub anchor_strand: char,
    pub mate_mate: Mate,
    pub mate_revcomp: bool,
    pub mate_strand: char,
    pub direction: Direction,
}

/// Returns the probe(s) to try, in order, for a paired mode. Empty for the
/// single-end modes, which have their own dispatch in `placement::single`.
pub fn probes_for(mode: Mode) -> Vec<Probe> {
    use Direction::*;
    use Mate::*;

    match mode {
        Mode::Isf => vec![Probe {
            anchor_mate: R1, anchor_revcomp: false, anchor_strand: '+',
            mate_mate: R2, mate_revcomp: true, mate_strand: '-',
            direction: Inward,
        }],
        Mode::Isr => vec![Probe {
            anchor_mate: R2, anchor_revcomp: false, anchor_strand: '-',
            mate_mate: R1, mate_revcomp: true, mate_strand: '+',
            direction: Inward,
        }],
        Mode::Iu => vec![
            Probe {
                anchor_mate: R1, anchor_revcomp: false, anchor_strand: '+',
                mate_mate: R2, mate_revcomp: true, mate_strand: '-',
                direction: Inward,
            },
            Probe {
                anchor_mate: R2, anchor_revcomp: false, anchor_strand: '-',
                mate_mate: R1, mate_revcomp: true, mate_strand: '+',
                direction: Inward,
            },
        ],
        Mode::Osf => vec![Probe {
            anchor_mate: R1, anchor_revcomp: false, anchor_strand: '-',
            mate_mate: R2, mate_revcomp: true, mate_strand: '+',
            direction: Outward,
        }],
        Mode::Osr => vec![Probe {
            anchor_mate: R2, anchor_revcomp: false, anchor_strand: '+',
            mate_mate: R1, mate_revcomp: true, mate_strand: '-',
            direction: Outward,
        }],
        Mode::Ou => vec![
            Probe {
                anchor_mate: R1, anchor_revcomp: false, anchor_strand: '-',
                mate_mate: R2, mate_revcomp: true, mate_strand: '+',
                direction: Outward,
            },
            Probe {
                anchor_mate: R2, anchor_revcomp: false, anchor_strand: '+',
                mate_mate: R1, mate_revcomp: true, mate_strand: '-',
                direction: Outward,
            },
        ],
        Mode::Sf | Mode::Sr | Mode::U => vec![],
    }
}
