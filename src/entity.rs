// 🏢 Entity Model - The business under evaluation
//
// An entity is the MSME whose financial records feed the protocol.
// Turnover drives the revenue baseline, employee count drives payroll,
// and the sector is descriptive metadata carried into reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SECTOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Manufacturing,
    ItServices,
    Retail,
    Logistics,
    Healthcare,
}

impl Sector {
    /// All selectable sectors, in display order
    pub fn all() -> [Sector; 5] {
        [
            Sector::Manufacturing,
            Sector::ItServices,
            Sector::Retail,
            Sector::Logistics,
            Sector::Healthcare,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Manufacturing => "Manufacturing",
            Sector::ItServices => "IT Services",
            Sector::Retail => "Retail",
            Sector::Logistics => "Logistics",
            Sector::Healthcare => "Healthcare",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "manufacturing" => Ok(Sector::Manufacturing),
            "itservices" | "it" => Ok(Sector::ItServices),
            "retail" => Ok(Sector::Retail),
            "logistics" => Ok(Sector::Logistics),
            "healthcare" => Ok(Sector::Healthcare),
            other => Err(format!("Unknown sector: {}", other)),
        }
    }
}

// ============================================================================
// ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Legal name of the business
    pub name: String,

    /// Industry sector
    pub sector: Sector,

    /// Annual turnover in ₹ crore
    pub turnover_cr: f64,

    /// Headcount on payroll
    pub employees: u32,

    /// Whether the entity files GST returns
    #[serde(default = "default_true")]
    pub gst_registered: bool,

    /// Age of the primary bank account in months
    #[serde(default = "default_account_age")]
    pub account_age_months: u32,
}

fn default_true() -> bool {
    true
}

fn default_account_age() -> u32 {
    48
}

impl Entity {
    pub fn new(name: &str, sector: Sector, turnover_cr: f64, employees: u32) -> Self {
        Entity {
            name: name.to_string(),
            sector,
            turnover_cr,
            employees,
            gst_registered: true,
            account_age_months: 48,
        }
    }

    /// The bundled case study: a mid-size precision manufacturer
    pub fn case_study() -> Self {
        Entity::new("Precision Tools Pvt. Ltd.", Sector::Manufacturing, 7.5, 42)
    }

    /// Monthly revenue baseline in ₹ lakh (1 crore = 100 lakh)
    pub fn monthly_revenue_base(&self) -> f64 {
        self.turnover_cr * 100.0 / 12.0
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::case_study()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_study_entity() {
        let entity = Entity::case_study();

        assert_eq!(entity.name, "Precision Tools Pvt. Ltd.");
        assert_eq!(entity.sector, Sector::Manufacturing);
        assert_eq!(entity.turnover_cr, 7.5);
        assert_eq!(entity.employees, 42);
        assert!(entity.gst_registered);
        assert_eq!(entity.account_age_months, 48);
    }

    #[test]
    fn test_monthly_revenue_base() {
        let entity = Entity::new("Test Co", Sector::Retail, 12.0, 20);

        // ₹12 Cr = ₹1200 lakh per year = ₹100 lakh per month
        assert_eq!(entity.monthly_revenue_base(), 100.0);
    }

    #[test]
    fn test_sector_parsing() {
        assert_eq!("Manufacturing".parse::<Sector>().unwrap(), Sector::Manufacturing);
        assert_eq!("IT Services".parse::<Sector>().unwrap(), Sector::ItServices);
        assert_eq!("it-services".parse::<Sector>().unwrap(), Sector::ItServices);
        assert_eq!("retail".parse::<Sector>().unwrap(), Sector::Retail);
        assert!("Mining".parse::<Sector>().is_err());
    }

    #[test]
    fn test_sector_roundtrip_display() {
        for sector in Sector::all() {
            let parsed: Sector = sector.as_str().parse().unwrap();
            assert_eq!(parsed, sector);
        }
    }
}
