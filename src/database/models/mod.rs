pub mod employee;
pub mod user;

pub use employee::{
    Course, Designation, Employee, EmployeeFields, EmployeeImage, EmployeePatch, EmployeeRow,
    Gender, NewEmployee,
};
pub use user::{NewUser, PublicUser, User};
