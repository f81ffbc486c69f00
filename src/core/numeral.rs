//! Integer to Roman numeral conversion and back.
//!
//! Encoding is strict and always produces the minimal subtractive form.
//! Decoding is a lenient running sum that accepts any string and never fails;
//! callers range-check the result.

use crate::error::CipherError;

pub const MAX_NUMERAL: u32 = 3999;

const NUMERAL_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Convert `n` (1..=3999) to its minimal Roman numeral.
pub fn to_roman(n: u32) -> Result<String, CipherError> {
    if n == 0 || n > MAX_NUMERAL {
        return Err(CipherError::NumeralOutOfRange(n));
    }
    Ok(greedy(n))
}

/// Greedy subtraction over the value table. Callers guarantee the range.
pub(crate) fn greedy(mut n: u32) -> String {
    let mut result = String::new();
    for &(value, symbol) in &NUMERAL_TABLE {
        while n >= value {
            result.push_str(symbol);
            n -= value;
        }
    }
    result
}

fn symbol_value(c: char) -> i64 {
    match c {
        'I' => 1,
        'V' => 5,
        'X' => 10,
        'L' => 50,
        'C' => 100,
        'D' => 500,
        'M' => 1000,
        _ => 0,
    }
}

/// Parse a numeral as a left-to-right running sum: a symbol smaller than its
/// successor is subtracted, anything else is added. Unknown characters count
/// as zero. Malformed input still produces some integer, possibly far outside
/// the letter range.
pub fn from_roman(s: &str) -> i64 {
    let values: Vec<i64> = s.chars().map(symbol_value).collect();
    let mut total = 0;
    for (i, &curr) in values.iter().enumerate() {
        let next = values.get(i + 1).copied().unwrap_or(0);
        if curr < next {
            total -= curr;
        } else {
            total += curr;
        }
    }
    total
}

/// True if `c` belongs to the numeral alphabet {I,V,X,L,C,D,M}.
pub fn is_numeral_char(c: char) -> bool {
    symbol_value(c) != 0
}
