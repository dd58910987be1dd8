use serde::{Deserialize, Serialize};

use super::Amount;

/// A local service provider listed in the catalog.
/// Providers are identified by name and never change once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub name: String,
    pub service_area: String,
    /// Base rate in currency units per hour
    pub hourly_rate: Amount,
    /// Customer rating between 0.0 and 5.0
    pub rating: f64,
    pub category: String,
}

impl ServiceProvider {
    pub fn new(
        name: impl Into<String>,
        service_area: impl Into<String>,
        hourly_rate: Amount,
        rating: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            service_area: service_area.into(),
            hourly_rate,
            rating,
            category: category.into(),
        }
    }
}

/// The catalog every session starts with.
pub fn seed_catalog() -> Vec<ServiceProvider> {
    vec![
        ServiceProvider::new("ABC Plumbing Services", "Local Area", 120.0, 4.8, "Plumbing"),
        ServiceProvider::new("QuickFix Electrical", "Downtown", 150.0, 4.9, "Electrical"),
        ServiceProvider::new("GreenThumb Landscaping", "Suburbs", 200.0, 4.7, "Landscaping"),
        ServiceProvider::new("CleanSweep Cleaning Co.", "City Center", 80.0, 4.6, "Cleaning"),
        ServiceProvider::new("HomeShine Maintenance", "North Side", 90.0, 4.8, "Maintenance"),
        ServiceProvider::new("ProCarpet Care", "West End", 180.0, 4.9, "Carpet Cleaning"),
        ServiceProvider::new("Elite HVAC Solutions", "East District", 110.0, 4.5, "HVAC"),
        ServiceProvider::new("Handyman Heroes", "South Zone", 160.0, 4.7, "General Repair"),
    ]
}

/// Distinct categories in the order they first appear in the catalog.
pub fn distinct_categories(catalog: &[ServiceProvider]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for provider in catalog {
        if !categories.contains(&provider.category.as_str()) {
            categories.push(&provider.category);
        }
    }
    categories
}
