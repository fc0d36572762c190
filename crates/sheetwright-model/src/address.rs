use core::cmp::Ordering;

/// Convert a 1-based column index to its letter form (`1` -> `A`, `27` -> `AA`).
pub fn column_letter(col: u32) -> String {
    let mut n = col;
    let mut out = Vec::<u8>::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).expect("column letters are always valid UTF-8")
}

/// Parse column letters back to a 1-based index. Case-insensitive.
///
/// Returns `None` for an empty string, non-alphabetic input, or overflow.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col.checked_mul(26).and_then(|c| c.checked_add(v))?;
    }
    Some(col)
}

/// Canonical cell reference for 1-based coordinates (`(1, 1)` -> `A1`).
pub fn cell_reference(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row)
}

/// Split a cell reference into 1-based `(row, column)` coordinates.
pub fn parse_reference(reference: &str) -> Option<(u32, u32)> {
    let split = reference
        .bytes()
        .position(|b| b.is_ascii_digit())
        .unwrap_or(reference.len());
    let col = column_index(&reference[..split])?;
    let row: u32 = reference[split..].parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

/// The 1-based column a cell reference points at.
pub fn reference_column(reference: &str) -> Option<u32> {
    parse_reference(reference).map(|(_, col)| col)
}

/// The 1-based row a cell reference points at.
pub fn reference_row(reference: &str) -> Option<u32> {
    parse_reference(reference).map(|(row, _)| row)
}

/// Ordering of cell references within a row: shorter reference first, then
/// case-insensitive lexicographic. For references sharing a row number this
/// sorts columns `A`, `B`, .., `Z`, `AA`, .. correctly.
pub fn reference_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.bytes()
            .map(|b| b.to_ascii_uppercase())
            .cmp(b.bytes().map(|c| c.to_ascii_uppercase()))
    })
}
