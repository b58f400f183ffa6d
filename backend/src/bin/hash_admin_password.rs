//! Print an Argon2id PHC string for `TECHFIX_ADMIN_PASSWORD_HASH`.
//!
//! ```text
//! printf '%s' 'correct horse' | hash-admin-password
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, BufRead, Write};

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use clap::Parser;
use techfix::domain::AdminPasswordHash;
use zeroize::Zeroizing;

/// `hash-admin-password` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hash-admin-password",
    about = "Hash an admin password read from stdin for the bootstrap admin account",
    version
)]
struct CliArgs {
    /// Keep surrounding whitespace instead of trimming the line.
    #[arg(long)]
    keep_whitespace: bool,
}

fn read_password(input: &mut impl BufRead, keep_whitespace: bool) -> io::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    input.read_line(&mut line)?;
    let password = if keep_whitespace {
        line.trim_end_matches(['\r', '\n'])
    } else {
        line.trim()
    };
    if password.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "password must not be empty",
        ));
    }
    Ok(Zeroizing::new(password.to_owned()))
}

fn hash(password: &str) -> io::Result<AdminPasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| io::Error::other(format!("hash password: {err}")))?
        .to_string();
    AdminPasswordHash::parse(phc).map_err(io::Error::other)
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let password = read_password(&mut io::stdin().lock(), args.keep_whitespace)?;
    let phc = hash(&password)?;
    writeln!(io::stdout().lock(), "{}", phc.as_str())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("correct horse\n", false, "correct horse")]
    #[case("  correct horse  \r\n", false, "correct horse")]
    #[case("  correct horse  \n", true, "  correct horse  ")]
    fn reads_one_line(#[case] input: &str, #[case] keep: bool, #[case] expected: &str) {
        let password = read_password(&mut Cursor::new(input), keep).expect("password");
        assert_eq!(password.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   \n")]
    fn blank_input_is_rejected(#[case] input: &str) {
        assert!(read_password(&mut Cursor::new(input), false).is_err());
    }

    #[rstest]
    fn hash_verifies_the_original_password() {
        let phc = hash("correct horse").expect("hash");
        assert!(phc.as_str().starts_with("$argon2id$"));
        assert!(phc.verify("correct horse").expect("verify"));
        assert!(!phc.verify("wrong").expect("verify"));
    }
}
