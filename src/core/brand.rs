//! Brand - the dual-tenant switch between the real-estate and
//! business-setup sides of the product.
//!
//! A brand is a display concern only: leads carry a brand tag so list
//! views can be scoped, and settings hold one accent color per brand.
//! Ids and cross-record references never depend on it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum Brand {
    #[default]
    RealEstate,
    BusinessSetup,
}

impl Brand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::RealEstate => "real-estate",
            Brand::BusinessSetup => "business-setup",
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "real-estate" | "realestate" | "re" => Ok(Brand::RealEstate),
            "business-setup" | "businesssetup" | "bs" => Ok(Brand::BusinessSetup),
            _ => Err(format!("Unknown brand: {}", s)),
        }
    }
}
