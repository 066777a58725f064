//! Natural ordering for milestone names (`2.0-alpha2` before `2.0-alpha10`).

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings, treating runs of ASCII digits as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                match compare_numbers(&l, &r) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            (Some(l), Some(r)) => match l.cmp(&r) {
                Ordering::Equal => {
                    left.next();
                    right.next();
                }
                ord => return ord,
            },
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

/// Compare digit runs by value without overflow; more leading zeros sort later.
fn compare_numbers(l: &str, r: &str) -> Ordering {
    let l_trimmed = l.trim_start_matches('0');
    let r_trimmed = r.trim_start_matches('0');
    l_trimmed
        .len()
        .cmp(&r_trimmed.len())
        .then_with(|| l_trimmed.cmp(r_trimmed))
        .then_with(|| l.len().cmp(&r.len()))
}
