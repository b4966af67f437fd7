//! Scanline filters (None, Sub, Up, Average, Paeth).
//!
//! For byte `i` of a row: `a` is the reconstructed byte `bpp` to the left
//! (0 when `i < bpp`), `b` the reconstructed byte above (0 on the first row)
//! and `c` the reconstructed byte above-left. Arithmetic is modulo 256.

/// Per-scanline filter type, stored as the row's leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FilterType {
    /// Raw bytes.
    None = 0,
    /// Difference from the left neighbor.
    Sub = 1,
    /// Difference from the byte above.
    Up = 2,
    /// Difference from the mean of left and above.
    Average = 3,
    /// Difference from the Paeth predictor.
    Paeth = 4,
}

impl FilterType {
    /// All filter types in byte order.
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];

    /// Parses a filter byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    /// The filter byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parses a lowercase filter name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(FilterType::None),
            "sub" => Some(FilterType::Sub),
            "up" => Some(FilterType::Up),
            "average" => Some(FilterType::Average),
            "paeth" => Some(FilterType::Paeth),
            _ => None,
        }
    }
}

/// How the writer picks a filter for each scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStrategy {
    /// The same filter on every row.
    Fixed(FilterType),
    /// Per row, the filter whose output has the smallest sum of absolute
    /// values (bytes read as signed).
    Adaptive,
}

impl FilterStrategy {
    /// Picks the filter for one row.
    pub(crate) fn choose(&self, raw: &[u8], prev: &[u8], bpp: usize, scratch: &mut Vec<u8>) -> FilterType {
        match *self {
            FilterStrategy::Fixed(filter) => filter,
            FilterStrategy::Adaptive => {
                let mut best = FilterType::None;
                let mut best_score = u64::MAX;
                for filter in FilterType::ALL {
                    scratch.clear();
                    filter_row(filter, raw, prev, bpp, scratch);
                    let score: u64 = scratch
                        .iter()
                        .map(|&x| (x as i8).unsigned_abs() as u64)
                        .sum();
                    if score < best_score {
                        best_score = score;
                        best = filter;
                    }
                }
                best
            }
        }
    }
}

/// The Paeth predictor: whichever of `a`, `b`, `c` is closest to `a + b - c`,
/// ties broken in the order a, b, c.
#[inline]
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

#[inline]
fn predict(filter: FilterType, a: u8, b: u8, c: u8) -> u8 {
    match filter {
        FilterType::None => 0,
        FilterType::Sub => a,
        FilterType::Up => b,
        FilterType::Average => ((a as u16 + b as u16) / 2) as u8,
        FilterType::Paeth => paeth_predictor(a, b, c),
    }
}

/// Reverses `filter` on `row` in place.
///
/// `prev` is the previous row after reconstruction (all zeros for the first
/// row) and must be as long as `row`.
pub fn unfilter_row(filter: FilterType, row: &mut [u8], prev: &[u8], bpp: usize) {
    debug_assert_eq!(row.len(), prev.len());

    match filter {
        FilterType::None => {}
        FilterType::Sub => {
            for i in bpp..row.len() {
                row[i] = row[i].wrapping_add(row[i - bpp]);
            }
        }
        FilterType::Up => {
            for (x, &b) in row.iter_mut().zip(prev) {
                *x = x.wrapping_add(b);
            }
        }
        FilterType::Average | FilterType::Paeth => {
            for i in 0..row.len() {
                let (a, c) = if i >= bpp {
                    (row[i - bpp], prev[i - bpp])
                } else {
                    (0, 0)
                };
                row[i] = row[i].wrapping_add(predict(filter, a, prev[i], c));
            }
        }
    }
}

/// Applies `filter` to the unfiltered `raw` row and appends the result to `out`.
///
/// `prev` is the previous unfiltered row (all zeros for the first row).
/// The filter-type byte itself is not written.
pub fn filter_row(filter: FilterType, raw: &[u8], prev: &[u8], bpp: usize, out: &mut Vec<u8>) {
    debug_assert_eq!(raw.len(), prev.len());

    out.reserve(raw.len());
    for i in 0..raw.len() {
        let (a, c) = if i >= bpp {
            (raw[i - bpp], prev[i - bpp])
        } else {
            (0, 0)
        };
        out.push(raw[i].wrapping_sub(predict(filter, a, prev[i], c)));
    }
}
