//! The fixed uppercase Latin alphabet every transform and breaker works over

/// Number of letters in the alphabet
pub const ALPHABET_SIZE: usize = 26;

/// Letters in index order
pub const ALPHABET: [u8; ALPHABET_SIZE] = *b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Index of an uppercase letter, `None` for anything else
#[inline]
pub fn index_of(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some((c as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Letter at `index` (taken modulo the alphabet size)
#[inline]
pub fn letter_at(index: usize) -> char {
    ALPHABET[index % ALPHABET_SIZE] as char
}

/// Shift an uppercase letter forward by `shift` places; other characters pass through
#[inline]
pub fn shift_letter(c: char, shift: usize) -> char {
    match index_of(c) {
        Some(i) => letter_at(i + shift % ALPHABET_SIZE),
        None => c,
    }
}

/// Shift an uppercase letter backward by `shift` places; other characters pass through
#[inline]
pub fn unshift_letter(c: char, shift: usize) -> char {
    shift_letter(c, ALPHABET_SIZE - shift % ALPHABET_SIZE)
}
