use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;

use super::{as_object, optional_str, required_str, FieldMessages, ValidationError};
use crate::database::models::{EmployeeFields, EmployeePatch};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const EMAIL_TLDS: &[&str] = &["com", "net"];

static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{1,4}[-.\s]?[0-9]{10}$").expect("compile mobile regex")
});
static EMAIL_LOCAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("compile email regex")
});
static DOMAIN_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("compile domain regex")
});

/// Wording for one field under one of the two schemas
struct Rules {
    messages: FieldMessages,
    invalid: &'static str,
}

mod create {
    use super::{FieldMessages, Rules};

    pub(super) const NAME: FieldMessages = FieldMessages {
        field: "name",
        not_string: "Name must be a string!",
        empty: "Name is required!",
        required: "Name is required!",
    };
    pub(super) const EMAIL: Rules = Rules {
        messages: FieldMessages {
            field: "email",
            not_string: "Email must be a string!",
            empty: "Email is required!",
            required: "Email is required!",
        },
        invalid: "Invalid email address!",
    };
    pub(super) const MOBILE: Rules = Rules {
        messages: FieldMessages {
            field: "mobile",
            not_string: "Mobile number must be a string!",
            empty: "Mobile number is required!",
            required: "Mobile number is required!",
        },
        invalid: "Invalid mobile number!",
    };
    pub(super) const DESIGNATION: Rules = Rules {
        messages: FieldMessages {
            field: "designation",
            not_string: "Designation must be a string!",
            empty: "Designation is required!",
            required: "Designation is required!",
        },
        invalid: "Invalid designation!",
    };
    pub(super) const GENDER: Rules = Rules {
        messages: FieldMessages {
            field: "gender",
            not_string: "Gender must be a string!",
            empty: "Gender is required!",
            required: "Gender is required!",
        },
        invalid: "Invalid gender!",
    };
    pub(super) const COURSE: Rules = Rules {
        messages: FieldMessages {
            field: "course",
            not_string: "Course must be a string!",
            empty: "Course is required!",
            required: "Course is required!",
        },
        invalid: "Invalid course!",
    };
}

mod update {
    use super::{FieldMessages, Rules};

    pub(super) const NAME: FieldMessages = FieldMessages {
        field: "name",
        not_string: "Name must be a string!",
        empty: "Name cannot be empty!",
        required: "",
    };
    pub(super) const EMAIL: Rules = Rules {
        messages: FieldMessages {
            field: "email",
            not_string: "Email must be a string!",
            empty: "Email cannot be empty!",
            required: "",
        },
        invalid: "Invalid email address!",
    };
    pub(super) const MOBILE: Rules = Rules {
        messages: FieldMessages {
            field: "mobile",
            not_string: "Mobile number must be a string!",
            empty: "Mobile number cannot be empty!",
            required: "",
        },
        invalid: "Invalid mobile number format!",
    };
    pub(super) const DESIGNATION: Rules = Rules {
        messages: FieldMessages {
            field: "designation",
            not_string: "Designation must be a string!",
            empty: "Designation cannot be empty!",
            required: "",
        },
        invalid: "Designation must be one of 'hr', 'manager', or 'sales'!",
    };
    pub(super) const GENDER: Rules = Rules {
        messages: FieldMessages {
            field: "gender",
            not_string: "Gender must be a string!",
            empty: "Gender cannot be empty!",
            required: "",
        },
        invalid: "Gender must be either 'm' (male) or 'f' (female)!",
    };
    pub(super) const COURSE: Rules = Rules {
        messages: FieldMessages {
            field: "course",
            not_string: "Course must be a string!",
            empty: "Course cannot be empty!",
            required: "",
        },
        invalid: "Course must be one of 'mca', 'bca', or 'bsc'!",
    };
    pub(super) const PUBLIC_ID: FieldMessages = FieldMessages {
        field: "public_id",
        not_string: "Public ID must be a string!",
        empty: "Public ID cannot be empty!",
        required: "",
    };
}

const UPDATABLE: &[&str] = &["name", "email", "mobile", "designation", "gender", "course", "public_id"];

/// Update payload after validation: the field patch plus the asset to
/// replace when a new image comes along
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    pub patch: EmployeePatch,
    pub public_id: Option<String>,
}

pub fn validate_new_employee(body: &Value) -> Result<EmployeeFields, ValidationError> {
    let body = as_object(body)?;

    let name = required_str(body, &create::NAME)?;
    check_name(name, &create::NAME)?;

    let email = required_str(body, &create::EMAIL.messages)?;
    check(is_valid_email(email), &create::EMAIL)?;

    let mobile = required_str(body, &create::MOBILE.messages)?;
    check(MOBILE_REGEX.is_match(mobile), &create::MOBILE)?;

    let designation = parse_choice(required_str(body, &create::DESIGNATION.messages)?, &create::DESIGNATION)?;
    let gender = parse_choice(required_str(body, &create::GENDER.messages)?, &create::GENDER)?;
    let course = parse_choice(required_str(body, &create::COURSE.messages)?, &create::COURSE)?;

    Ok(EmployeeFields {
        name: name.to_string(),
        email: email.to_string(),
        mobile: mobile.to_string(),
        designation,
        gender,
        course,
    })
}

/// All fields optional but at least one must be present. Keys outside the
/// schema are ignored.
pub fn validate_employee_update(body: &Value) -> Result<EmployeeUpdate, ValidationError> {
    let body = as_object(body)?;
    let mut parsed = EmployeeUpdate::default();

    if let Some(name) = optional_str(body, &update::NAME)? {
        check_name(name, &update::NAME)?;
        parsed.patch.name = Some(name.to_string());
    }
    if let Some(email) = optional_str(body, &update::EMAIL.messages)? {
        check(is_valid_email(email), &update::EMAIL)?;
        parsed.patch.email = Some(email.to_string());
    }
    if let Some(mobile) = optional_str(body, &update::MOBILE.messages)? {
        check(MOBILE_REGEX.is_match(mobile), &update::MOBILE)?;
        parsed.patch.mobile = Some(mobile.to_string());
    }
    if let Some(value) = optional_str(body, &update::DESIGNATION.messages)? {
        parsed.patch.designation = Some(parse_choice(value, &update::DESIGNATION)?);
    }
    if let Some(value) = optional_str(body, &update::GENDER.messages)? {
        parsed.patch.gender = Some(parse_choice(value, &update::GENDER)?);
    }
    if let Some(value) = optional_str(body, &update::COURSE.messages)? {
        parsed.patch.course = Some(parse_choice(value, &update::COURSE)?);
    }
    if let Some(public_id) = optional_str(body, &update::PUBLIC_ID)? {
        parsed.public_id = Some(public_id.to_string());
    }

    if !UPDATABLE.iter().any(|key| body.contains_key(*key)) {
        return Err(ValidationError::new(
            "body",
            "At least one field must be provided for update!",
        ));
    }

    Ok(parsed)
}

fn check(ok: bool, rules: &Rules) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(rules.messages.field, rules.invalid))
    }
}

fn check_name(name: &str, messages: &FieldMessages) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len < NAME_MIN {
        return Err(ValidationError::new(
            messages.field,
            format!("Name must have at least {} characters!", NAME_MIN),
        ));
    }
    if len > NAME_MAX {
        return Err(ValidationError::new(
            messages.field,
            format!("Name cannot have more than {} characters!", NAME_MAX),
        ));
    }
    Ok(())
}

fn parse_choice<T: FromStr>(value: &str, rules: &Rules) -> Result<T, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::new(rules.messages.field, rules.invalid))
}

/// `local@label.label...` with at least two labels and a `.com`/`.net` TLD
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if !EMAIL_LOCAL_REGEX.is_match(local) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| DOMAIN_LABEL_REGEX.is_match(l)) {
        return false;
    }
    labels
        .last()
        .map(|tld| EMAIL_TLDS.contains(&tld.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
