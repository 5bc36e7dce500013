use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::database::manager::DatabaseError;

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Designation {
    Hr => "hr",
    Manager => "manager",
    Sales => "sales",
});

text_enum!(Gender {
    M => "m",
    F => "f",
});

text_enum!(Course {
    Mca => "mca",
    Bca => "bca",
    Bsc => "bsc",
});

/// Reference to an asset held by the image store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: Designation,
    pub gender: Gender,
    pub course: Course,
    pub image: EmployeeImage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new record, before the image is attached
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: Designation,
    pub gender: Gender,
    pub course: Course,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub fields: EmployeeFields,
    pub image: EmployeeImage,
}

/// Partial update. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub designation: Option<Designation>,
    pub gender: Option<Gender>,
    pub course: Option<Course>,
    pub image: Option<EmployeeImage>,
}

impl EmployeePatch {
    pub fn apply(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(mobile) = self.mobile {
            employee.mobile = mobile;
        }
        if let Some(designation) = self.designation {
            employee.designation = designation;
        }
        if let Some(gender) = self.gender {
            employee.gender = gender;
        }
        if let Some(course) = self.course {
            employee.course = course;
        }
        if let Some(image) = self.image {
            employee.image = image;
        }
    }
}

/// Row shape of the `employees` table; enum columns are plain text
#[derive(Debug, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    pub course: String,
    pub image_url: String,
    pub image_public_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, DatabaseError> {
    value
        .to_lowercase()
        .parse()
        .map_err(|_| DatabaseError::Corrupt(format!("unexpected {} value '{}'", column, value)))
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DatabaseError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            designation: parse_column("designation", &row.designation)?,
            gender: parse_column("gender", &row.gender)?,
            course: parse_column("course", &row.course)?,
            id: row.id,
            name: row.name,
            email: row.email,
            mobile: row.mobile,
            image: EmployeeImage {
                url: row.image_url,
                public_id: row.image_public_id,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
