use super::models::{User, UserId};
use super::Database;
use crate::auth::{hash_password, verify_password};
use crate::error::AppError;

/// Register a new user. Emails are unique and compared case-sensitively.
///
/// The password is hashed before the transaction starts; the uniqueness check
/// and the insert happen under the same lock.
pub fn create_user(db: &Database, email: &str, password: &str) -> Result<User, AppError> {
    let password_hash = hash_password(password)?;

    let user = db.transact(|snapshot| {
        if snapshot.find_user_by_email(email).is_some() {
            return Err(AppError::Conflict("email already used by existing user".to_string()));
        }

        let id = snapshot.next_user_id();
        let user = User {
            id,
            email: email.to_string(),
            password_hash,
            is_chirpy_red: false,
        };
        snapshot.users.insert(id, user.clone());
        Ok(user)
    });

    match &user {
        Ok(user) => tracing::info!(user_id = user.id, "User created"),
        Err(AppError::Conflict(_)) => tracing::warn!("Registration with an email already in use"),
        Err(_) => {}
    }
    user
}

pub fn get_user(db: &Database, id: UserId) -> Result<User, AppError> {
    db.query(|snapshot| {
        snapshot
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    })
}

/// Overwrite a user's email and password
///
/// Email uniqueness is not re-checked here, unlike `create_user`.
pub fn update_user(db: &Database, id: UserId, email: &str, password: &str) -> Result<(), AppError> {
    let password_hash = hash_password(password)?;

    db.transact(|snapshot| {
        let user = snapshot
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

        user.email = email.to_string();
        user.password_hash = password_hash;
        Ok(())
    })?;

    tracing::info!(user_id = id, "User updated");
    Ok(())
}

/// Check an email/password pair
///
/// # Errors
/// - `AppError::NotFound` when no user has this email
/// - `AuthError::InvalidCredentials` when the password does not match
pub fn authenticate_user(db: &Database, email: &str, password: &str) -> Result<User, AppError> {
    let user = db.query(|snapshot| {
        snapshot
            .find_user_by_email(email)
            .cloned()
            .ok_or_else(|| AppError::NotFound("user with this email".to_string()))
    })?;

    // bcrypt runs outside the lock
    verify_password(&user.password_hash, password).map_err(|e| {
        tracing::warn!(user_id = user.id, "Password mismatch");
        e
    })?;

    Ok(user)
}

/// Set the premium membership flag. Setting the current value again is a no-op.
pub fn set_premium_flag(db: &Database, id: UserId, value: bool) -> Result<(), AppError> {
    db.transact(|snapshot| {
        let user = snapshot
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

        user.is_chirpy_red = value;
        Ok(())
    })?;

    tracing::info!(user_id = id, is_chirpy_red = value, "Premium flag set");
    Ok(())
}
