//! Department and service catalog.
//!
//! The catalog has a fixed shape: the same departments and services come
//! back on every call. Only staffing and capacity figures are randomized per
//! generation, so simulated centers differ run to run while chart axes stay
//! stable.

use serde::{Deserialize, Serialize};

use crate::sim::rng::{uniform_int, UniformSource};

/// Service-level wait target applied to every department, in minutes.
pub const TARGET_WAIT_MINUTES: u32 = 30;

const STAFF_RANGE: (u32, u32) = (5, 25);
const CAPACITY_RANGE: (u32, u32) = (50, 150);

/// Fixed department roster: (code, display name).
const DEPARTMENT_TABLE: [(&str, &str); 6] = [
    ("REG", "Civil Registry"),
    ("LIC", "Licensing & Permits"),
    ("TAX", "Revenue & Taxation"),
    ("SOC", "Social Services"),
    ("IMM", "Immigration Services"),
    ("TRA", "Transport & Vehicles"),
];

/// Fixed service table: (code, name, department code, duration minutes).
const SERVICE_TABLE: [(&str, &str, &str, u32); 12] = [
    ("REG-BC", "Birth Certificate", "REG", 15),
    ("REG-MC", "Marriage Certificate", "REG", 20),
    ("LIC-BL", "Business License", "LIC", 45),
    ("LIC-CP", "Construction Permit", "LIC", 60),
    ("TAX-RF", "Tax Filing Assistance", "TAX", 35),
    ("TAX-PC", "Property Tax Clearance", "TAX", 30),
    ("SOC-WB", "Welfare Benefits Application", "SOC", 40),
    ("SOC-HA", "Housing Assistance", "SOC", 50),
    ("IMM-PP", "Passport Application", "IMM", 25),
    ("IMM-RP", "Residence Permit", "IMM", 55),
    ("TRA-DL", "Driver License Renewal", "TRA", 20),
    ("TRA-VR", "Vehicle Registration", "TRA", 30),
];

// ============================================================================
// Identifiers
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DepartmentId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub i64);

// ============================================================================
// Entities
// ============================================================================

/// A service center department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub code: String,
    pub name: String,
    pub staff_count: u32,
    pub daily_capacity: u32,
    pub target_wait_minutes: u32,
}

/// Complexity tier derived from the nominal service duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceComplexity {
    Simple,
    Medium,
    Complex,
}

impl ServiceComplexity {
    /// Over 40 minutes is complex, over 25 medium, the rest simple.
    pub fn from_duration(minutes: u32) -> Self {
        if minutes > 40 {
            ServiceComplexity::Complex
        } else if minutes > 25 {
            ServiceComplexity::Medium
        } else {
            ServiceComplexity::Simple
        }
    }
}

/// A bookable service offered by a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub code: String,
    pub name: String,
    pub department_id: DepartmentId,
    pub estimated_duration_minutes: u32,
    pub complexity: ServiceComplexity,
}

/// Generated department and service roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub departments: Vec<Department>,
    pub services: Vec<Service>,
}

/// Build the catalog, drawing staffing and capacity from `source`.
pub fn build_catalog(source: &mut dyn UniformSource) -> Catalog {
    let departments: Vec<Department> = DEPARTMENT_TABLE
        .iter()
        .enumerate()
        .map(|(i, (code, name))| Department {
            id: DepartmentId((i + 1) as i64),
            code: (*code).to_string(),
            name: (*name).to_string(),
            staff_count: uniform_int(source, STAFF_RANGE.0, STAFF_RANGE.1),
            daily_capacity: uniform_int(source, CAPACITY_RANGE.0, CAPACITY_RANGE.1),
            target_wait_minutes: TARGET_WAIT_MINUTES,
        })
        .collect();

    let services: Vec<Service> = SERVICE_TABLE
        .iter()
        .enumerate()
        .map(|(i, (code, name, dept_code, duration))| {
            let department_id = departments
                .iter()
                .find(|d| d.code == *dept_code)
                .map(|d| d.id)
                .unwrap_or(DepartmentId(0));
            Service {
                id: ServiceId((i + 1) as i64),
                code: (*code).to_string(),
                name: (*name).to_string(),
                department_id,
                estimated_duration_minutes: *duration,
                complexity: ServiceComplexity::from_duration(*duration),
            }
        })
        .collect();

    Catalog {
        departments,
        services,
    }
}
