//! Catalog as returned by the JSON catalog endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::enums::{BillingPeriod, PhaseType, ProductCategory};
use crate::subscription::UsagePrice;

/// One version of a tenant catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Catalog name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Date this version became effective.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateTime<Utc>>,
    /// Currencies prices are defined in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub currencies: Vec<Currency>,
    /// Units usage is measured in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
    /// Products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
    /// Price lists.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_lists: Vec<PriceList>,
}

impl Catalog {
    /// Looks up a product by name.
    #[must_use]
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }
}

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Category, sent as `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductCategory>,
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    /// Plans of the product.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<Plan>,
    /// Add-ons bundled with it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<String>,
    /// Add-ons that may be purchased with it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
}

/// A catalog plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    /// Billing period of the recurring phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,
    /// Phases in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
}

/// A plan phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Phase type, sent as `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub phase_type: Option<PhaseType>,
    /// Recurring prices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<Price>,
    /// Fixed prices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_prices: Vec<Price>,
    /// Phase length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    /// Usage sections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usages: Vec<UsagePrice>,
}

/// Length of a phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    /// `DAYS`, `WEEKS`, `MONTHS`, `YEARS` or `UNLIMITED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Number of units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
}

/// A price in one currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
}

/// A named set of plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Plan names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<String>,
}

/// A usage unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
}

/// Flattened plan description returned by the add-on and base-plan listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Price list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list: Option<String>,
    /// Billing period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_phase_billing_period: Option<BillingPeriod>,
    /// Recurring price of the final phase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub final_phase_recurring_price: Vec<Price>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn reads_products_and_phases() {
        let catalog: Catalog = serde_json::from_str(
            r#"{
                "name": "Firearms",
                "currencies": ["USD", "EUR"],
                "products": [{
                    "type": "BASE",
                    "name": "Shotgun",
                    "plans": [{
                        "name": "shotgun-monthly",
                        "billingPeriod": "MONTHLY",
                        "phases": [
                            {"type": "TRIAL", "prices": [], "duration": {"unit": "DAYS", "number": 30}},
                            {"type": "EVERGREEN", "prices": [{"currency": "USD", "value": 249.95}]}
                        ]
                    }],
                    "included": [],
                    "available": ["Telescopic-Scope"]
                }],
                "priceLists": [{"name": "DEFAULT", "plans": ["shotgun-monthly"]}]
            }"#,
        )
        .unwrap();

        let shotgun = catalog.product("Shotgun").unwrap();
        assert_eq!(shotgun.product_type, Some(ProductCategory::Base));
        let phases = &shotgun.plans[0].phases;
        assert_eq!(phases[0].phase_type, Some(PhaseType::Trial));
        assert_eq!(phases[0].duration.as_ref().unwrap().number, Some(30));
        assert_eq!(phases[1].prices[0].value, Some(dec!(249.95)));
        assert!(catalog.product("Pistol").is_none());
    }
}
