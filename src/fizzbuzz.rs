//! Classic FizzBuzz over `1..=limit`.

use anyhow::{Result, bail};
use rand::Rng;

/// Upper end of the randomly chosen limit.
pub const RANDOM_LIMIT_MAX: u64 = 100;

pub fn fizzbuzz_line(i: u64) -> String {
    let mut out = String::new();
    if i % 3 == 0 {
        out.push_str("Fizz");
    }
    if i % 5 == 0 {
        out.push_str("Buzz");
    }
    if out.is_empty() {
        out = i.to_string();
    }
    out
}

pub fn fizzbuzz(limit: u64) -> Result<Vec<String>> {
    if limit < 1 {
        bail!("Input must be a positive number");
    }
    Ok((1..=limit).map(fizzbuzz_line).collect())
}

pub fn random_limit() -> u64 {
    rand::thread_rng().gen_range(1..=RANDOM_LIMIT_MAX)
}

/// Print the banner and the sequence for `limit` (random when `None`).
pub fn run(limit: Option<u64>, out: &mut impl std::io::Write) -> Result<()> {
    let limit = limit.unwrap_or_else(random_limit);
    let lines = fizzbuzz(limit)?;
    writeln!(out, "Running FizzBuzz for numbers 1 to {limit}:")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fifteen() {
        let got = fizzbuzz(15).unwrap();
        assert_eq!(got[0], "1");
        assert_eq!(got[2], "Fizz");
        assert_eq!(got[4], "Buzz");
        assert_eq!(got[14], "FizzBuzz");
        assert_eq!(got.len(), 15);
    }

    #[test]
    fn zero_is_rejected() {
        let err = fizzbuzz(0).unwrap_err();
        assert_eq!(err.to_string(), "Input must be a positive number");
    }

    #[test]
    fn random_limit_in_range() {
        for _ in 0..200 {
            let n = random_limit();
            assert!((1..=RANDOM_LIMIT_MAX).contains(&n));
        }
    }

    #[test]
    fn run_writes_banner_then_lines() {
        let mut buf = Vec::new();
        run(Some(3), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Running FizzBuzz for numbers 1 to 3:\n1\n2\nFizz\n"
        );
    }
}
