//! Simulated company backend: the user directory, login checks, and the
//! password-change endpoint. Callers only ever see the async contracts;
//! the directory itself stands in for the HR database.

use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};

use crate::stores::auth_store::User;

/// Outcome of a password-change request, as reported by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

const MIN_PASSWORD_LEN: usize = 6;

/// Simulated round-trip latency in milliseconds
const LATENCY_MS: u32 = 800;

fn directory() -> Vec<(User, &'static str)> {
    vec![
        (
            User {
                username: "aguinea".to_string(),
                name: "Andrei Guinea".to_string(),
                email: "andrei.guinea@estelar.internal".to_string(),
                department: Some("Engineering".to_string()),
                manager: Some("Delia Farcas".to_string()),
                location: "Cluj-Napoca".to_string(),
                job_title: "Backend Developer".to_string(),
                description: None,
            },
            "parola123",
        ),
        (
            User {
                username: "dfarcas".to_string(),
                name: "Delia Farcas".to_string(),
                email: "delia.farcas@estelar.internal".to_string(),
                department: Some("Engineering".to_string()),
                manager: None,
                location: "Bucharest".to_string(),
                job_title: "Engineering Manager".to_string(),
                description: Some(
                    "Runs the mobile guild and the internal React Native trainings.".to_string(),
                ),
            },
            "parola123",
        ),
        (
            User {
                username: "mpopescu".to_string(),
                name: "Mihai Popescu".to_string(),
                email: "mihai.popescu@estelar.internal".to_string(),
                department: None,
                manager: Some("Delia Farcas".to_string()),
                location: "Remote".to_string(),
                job_title: "QA Analyst".to_string(),
                description: None,
            },
            "parola123",
        ),
    ]
}

/// Look up a directory entry by username.
pub fn find_user(username: &str) -> Option<User> {
    directory()
        .into_iter()
        .find(|(user, _)| user.username == username)
        .map(|(user, _)| user)
}

/// Look up a directory entry by display name. The feed joins posts to
/// users by this name, so the lookup inherits its collision caveat.
pub fn find_user_by_name(name: &str) -> Option<User> {
    directory()
        .into_iter()
        .find(|(user, _)| user.name == name)
        .map(|(user, _)| user)
}

/// Verify credentials and return the matching identity record.
pub async fn authenticate(username: &str, password: &str) -> Result<User, String> {
    log::info!("Authenticating {}...", username);
    TimeoutFuture::new(LATENCY_MS).await;

    directory()
        .into_iter()
        .find(|(user, stored)| user.username == username && *stored == password)
        .map(|(user, _)| user)
        .ok_or_else(|| "Invalid username or password.".to_string())
}

/// Business rules for a proposed new password.
pub fn validate_new_password(old: &str, new: &str, confirm: &str) -> Result<(), String> {
    if new.chars().count() < MIN_PASSWORD_LEN {
        Err("The new password must have at least 6 characters.".to_string())
    } else if new == old {
        Err("The new password must differ from the current one.".to_string())
    } else if new != confirm {
        Err("The password confirmation does not match.".to_string())
    } else {
        Ok(())
    }
}

/// Change a user's password. Rule violations come back as
/// `success: false` with a message; only transport-level problems reject.
pub async fn change_password(
    username: &str,
    old_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<PasswordChangeResult, String> {
    log::info!("Requesting password change for {}...", username);
    TimeoutFuture::new(LATENCY_MS).await;

    let Some((_, current)) = directory()
        .into_iter()
        .find(|(user, _)| user.username == username)
    else {
        return Ok(PasswordChangeResult {
            success: false,
            message: Some("Unknown user.".to_string()),
        });
    };

    if old_password != current {
        return Ok(PasswordChangeResult {
            success: false,
            message: Some("The current password is incorrect.".to_string()),
        });
    }

    if let Err(message) = validate_new_password(old_password, new_password, confirm_password) {
        return Ok(PasswordChangeResult {
            success: false,
            message: Some(message),
        });
    }

    log::info!("Password changed for {}", username);
    Ok(PasswordChangeResult {
        success: true,
        message: Some("Password changed successfully!".to_string()),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_password_minimum_length() {
        assert!(validate_new_password("old-pw", "abcde", "abcde").is_err());
        assert!(validate_new_password("old-pw", "abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_new_password_must_differ_from_old() {
        let err = validate_new_password("secret1", "secret1", "secret1").unwrap_err();
        assert!(err.contains("differ"));
    }

    #[test]
    fn test_confirmation_must_match() {
        let err = validate_new_password("old-pw", "secret1", "secret2").unwrap_err();
        assert!(err.contains("confirmation"));
    }

    #[test]
    fn test_directory_lookups() {
        let user = find_user("dfarcas").unwrap();
        assert_eq!(user.name, "Delia Farcas");
        assert_eq!(find_user_by_name("Delia Farcas").unwrap().username, "dfarcas");
        assert!(find_user("nobody").is_none());
    }
}
