//! Organizational role labels.
//!
//! These must match the role strings the backend attaches to tasks in its
//! default project template.

pub const ROLE_PROJECT_COORDINATOR: &str = "Project Coordinator";
pub const ROLE_PROJECT_ENGINEER: &str = "Project Engineer";
pub const ROLE_SUPERVISOR: &str = "Supervisor";
pub const ROLE_MEASUREMENT_ENGINEER: &str = "Measurement Engineer";
pub const ROLE_OPERATION_HEAD: &str = "Operation Head";
pub const ROLE_PURCHASE_COORDINATOR: &str = "Purchase Coordinator";
pub const ROLE_DIRECTOR: &str = "Director";
pub const ROLE_STORE_COORDINATOR: &str = "Store Coordinator";

/// The closed set of labels every new project receives an assignment for.
pub const ORGANIZATIONAL_ROLES: [&str; 8] = [
    ROLE_PROJECT_COORDINATOR,
    ROLE_PROJECT_ENGINEER,
    ROLE_SUPERVISOR,
    ROLE_MEASUREMENT_ENGINEER,
    ROLE_OPERATION_HEAD,
    ROLE_PURCHASE_COORDINATOR,
    ROLE_DIRECTOR,
    ROLE_STORE_COORDINATOR,
];
