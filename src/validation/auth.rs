use serde_json::Value;

use super::{as_object, required_str, FieldMessages, ValidationError};

const USER_NAME_MIN: usize = 3;
const USER_NAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 32;
const PASSWORD_SPECIALS: &str = "!@#$%^&*";

const USER_NAME: FieldMessages = FieldMessages {
    field: "userName",
    not_string: "Username must be a string!",
    empty: "Username is required!",
    required: "Username is required!",
};

const PASSWORD: FieldMessages = FieldMessages {
    field: "pwd",
    not_string: "Password must be a string!",
    empty: "Password is required!",
    required: "Password is required!",
};

/// Register/login payload after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

pub fn validate_credentials(body: &Value) -> Result<Credentials, ValidationError> {
    let body = as_object(body)?;

    let user_name = required_str(body, &USER_NAME)?;
    if !user_name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new(
            USER_NAME.field,
            "Username must only contain alphanumeric characters!",
        ));
    }
    let len = user_name.chars().count();
    if len < USER_NAME_MIN {
        return Err(ValidationError::new(
            USER_NAME.field,
            format!("Username must have atleast {} characters!", USER_NAME_MIN),
        ));
    }
    if len > USER_NAME_MAX {
        return Err(ValidationError::new(
            USER_NAME.field,
            format!("Username cannot have more than {} characters!", USER_NAME_MAX),
        ));
    }

    let password = required_str(body, &PASSWORD)?;
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(ValidationError::new(
            PASSWORD.field,
            format!("Password must have atleast {} characters!", PASSWORD_MIN),
        ));
    }
    if len > PASSWORD_MAX {
        return Err(ValidationError::new(
            PASSWORD.field,
            format!("Password cannot have more than {} characters!", PASSWORD_MAX),
        ));
    }
    if !is_strong_password(password) {
        return Err(ValidationError::new(
            PASSWORD.field,
            "Password must have atleast 1 digit, 1 special character, and 1 uppercase letter!",
        ));
    }

    Ok(Credentials {
        user_name: user_name.to_string(),
        password: password.to_string(),
    })
}

fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}
