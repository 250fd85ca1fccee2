//! Admin account management.
//!
//! Admin accounts are ordinary `users` rows with `is_admin` set; there is
//! no separate admin table or role hierarchy.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use tracing::info;

use vastra_core::Email;

use super::CommandError;

/// Create a new admin account.
///
/// When no password is supplied on the command line, one is read from
/// stdin so it stays out of shell history.
///
/// # Errors
///
/// Returns `CommandError::UserExists` if the email is taken, and
/// `CommandError::InvalidEmail` for a malformed address.
pub async fn create(email: &str, name: &str, password: Option<&str>) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;

    let password = match password {
        Some(p) => p.to_owned(),
        None => prompt_password()?,
    };

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| CommandError::PasswordHash)?
        .to_string();

    let pool = super::connect().await?;

    let result = sqlx::query(
        r"
        INSERT INTO users (name, email, password_hash, is_admin)
        VALUES ($1, $2, $3, TRUE)
        ",
    )
    .bind(name)
    .bind(email.as_str())
    .bind(&password_hash)
    .execute(&pool)
    .await;

    match result {
        Ok(_) => {
            info!(email = %email, "Admin account created");
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(CommandError::UserExists(email.as_str().to_owned()))
        }
        Err(e) => Err(CommandError::Database(e)),
    }
}

/// Read a password from stdin.
fn prompt_password() -> Result<String, CommandError> {
    use std::io::{BufRead, Write};

    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "Password: ");
    let _ = stderr.flush();

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim_end().to_owned())
}
