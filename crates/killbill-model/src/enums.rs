//! Enumerations shared by the catalog, entitlement, invoice and payment models.
//!
//! Each enum serializes to the exact string the server uses, and `Display`
//! renders the same string so values can go straight into query parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// The value as sent on the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ModelError::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// How much audit history the server attaches to returned objects.
    AuditLevel {
        /// No audit logs.
        None => "NONE",
        /// Only the creation entry.
        Minimal => "MINIMAL",
        /// Every change.
        Full => "FULL",
    }
}

impl Default for AuditLevel {
    fn default() -> Self {
        Self::None
    }
}

wire_enum! {
    /// Kind of server object a tag, custom field or audit log refers to.
    ObjectType {
        /// Account.
        Account => "ACCOUNT",
        /// Account e-mail.
        AccountEmail => "ACCOUNT_EMAIL",
        /// Blocking state.
        BlockingStates => "BLOCKING_STATES",
        /// Subscription bundle.
        Bundle => "BUNDLE",
        /// Custom field.
        CustomField => "CUSTOM_FIELD",
        /// Invoice.
        Invoice => "INVOICE",
        /// Payment.
        Payment => "PAYMENT",
        /// Payment transaction.
        Transaction => "TRANSACTION",
        /// Invoice item.
        InvoiceItem => "INVOICE_ITEM",
        /// Invoice payment.
        InvoicePayment => "INVOICE_PAYMENT",
        /// Subscription.
        Subscription => "SUBSCRIPTION",
        /// Subscription event.
        SubscriptionEvent => "SUBSCRIPTION_EVENT",
        /// Service broadcast.
        ServiceBroadcast => "SERVICE_BROADCAST",
        /// Payment attempt.
        PaymentAttempt => "PAYMENT_ATTEMPT",
        /// Payment method.
        PaymentMethod => "PAYMENT_METHOD",
        /// Tag.
        Tag => "TAG",
        /// Tag definition.
        TagDefinition => "TAG_DEFINITION",
        /// Tenant.
        Tenant => "TENANT",
        /// Tenant key-value entry.
        TenantKvs => "TENANT_KVS",
    }
}

wire_enum! {
    /// Catalog product category.
    ProductCategory {
        /// A base product.
        Base => "BASE",
        /// An add-on attached to a base product.
        AddOn => "ADD_ON",
        /// A product billed on its own.
        Standalone => "STANDALONE",
    }
}

wire_enum! {
    /// Recurring billing period of a plan phase.
    BillingPeriod {
        /// Every day.
        Daily => "DAILY",
        /// Every week.
        Weekly => "WEEKLY",
        /// Every two weeks.
        Biweekly => "BIWEEKLY",
        /// Every 30 days.
        ThirtyDays => "THIRTY_DAYS",
        /// Every 31 days.
        ThirtyOneDays => "THIRTY_ONE_DAYS",
        /// Every 60 days.
        SixtyDays => "SIXTY_DAYS",
        /// Every 90 days.
        NinetyDays => "NINETY_DAYS",
        /// Every month.
        Monthly => "MONTHLY",
        /// Every two months.
        Bimestrial => "BIMESTRIAL",
        /// Every three months.
        Quarterly => "QUARTERLY",
        /// Every four months.
        Triannual => "TRIANNUAL",
        /// Every six months.
        Biannual => "BIANNUAL",
        /// Every year.
        Annual => "ANNUAL",
        /// Every eighteen months.
        Sesquiennial => "SESQUIENNIAL",
        /// Every two years.
        Biennial => "BIENNIAL",
        /// Every three years.
        Triennial => "TRIENNIAL",
        /// Not recurring.
        NoBillingPeriod => "NO_BILLING_PERIOD",
    }
}

wire_enum! {
    /// Type of a plan phase.
    PhaseType {
        /// Free trial.
        Trial => "TRIAL",
        /// Discounted period.
        Discount => "DISCOUNT",
        /// Fixed-term period.
        FixedTerm => "FIXEDTERM",
        /// Open-ended period.
        Evergreen => "EVERGREEN",
    }
}

wire_enum! {
    /// When a billing change takes effect.
    BillingActionPolicy {
        /// At the start of the current term.
        StartOfTerm => "START_OF_TERM",
        /// At the end of the current term.
        EndOfTerm => "END_OF_TERM",
        /// Right away.
        Immediate => "IMMEDIATE",
        /// Rejected by the catalog.
        Illegal => "ILLEGAL",
    }
}

wire_enum! {
    /// When an entitlement change takes effect.
    EntitlementActionPolicy {
        /// Right away.
        Immediate => "IMMEDIATE",
        /// At the end of the current term.
        EndOfTerm => "END_OF_TERM",
    }
}

wire_enum! {
    /// State of a subscription's entitlement.
    EntitlementState {
        /// Not started yet.
        Pending => "PENDING",
        /// Active.
        Active => "ACTIVE",
        /// Blocked, e.g. by overdue.
        Blocked => "BLOCKED",
        /// Cancelled.
        Cancelled => "CANCELLED",
        /// Expired at the end of a fixed term.
        Expired => "EXPIRED",
    }
}

wire_enum! {
    /// Invoice status.
    InvoiceStatus {
        /// Not yet committed; can still change.
        Draft => "DRAFT",
        /// Committed and payable.
        Committed => "COMMITTED",
        /// Voided.
        Void => "VOID",
    }
}

wire_enum! {
    /// Invoice item type.
    InvoiceItemType {
        /// Charge created outside the catalog.
        ExternalCharge => "EXTERNAL_CHARGE",
        /// Fixed price.
        Fixed => "FIXED",
        /// Recurring price.
        Recurring => "RECURRING",
        /// Repair adjustment.
        RepairAdj => "REPAIR_ADJ",
        /// Credit balance adjustment.
        CbaAdj => "CBA_ADJ",
        /// Credit adjustment.
        CreditAdj => "CREDIT_ADJ",
        /// Item adjustment.
        ItemAdj => "ITEM_ADJ",
        /// Usage charge.
        Usage => "USAGE",
        /// Tax.
        Tax => "TAX",
        /// Parent account summary.
        ParentSummary => "PARENT_SUMMARY",
    }
}

wire_enum! {
    /// Payment transaction type.
    TransactionType {
        /// Authorization.
        Authorize => "AUTHORIZE",
        /// Capture of an authorization.
        Capture => "CAPTURE",
        /// Chargeback.
        Chargeback => "CHARGEBACK",
        /// Credit to the customer.
        Credit => "CREDIT",
        /// Authorize and capture.
        Purchase => "PURCHASE",
        /// Refund.
        Refund => "REFUND",
        /// Void of an authorization.
        Void => "VOID",
    }
}

wire_enum! {
    /// Outcome of a payment transaction.
    TransactionStatus {
        /// Succeeded.
        Success => "SUCCESS",
        /// Unknown outcome.
        Unknown => "UNKNOWN",
        /// Still pending.
        Pending => "PENDING",
        /// Rejected by the gateway.
        PaymentFailure => "PAYMENT_FAILURE",
        /// Plugin error.
        PluginFailure => "PLUGIN_FAILURE",
        /// The payment system is switched off.
        PaymentSystemOff => "PAYMENT_SYSTEM_OFF",
    }
}

wire_enum! {
    /// Usage section type.
    UsageType {
        /// Capacity usage.
        Capacity => "CAPACITY",
        /// Consumable usage.
        Consumable => "CONSUMABLE",
    }
}

wire_enum! {
    /// Whether a price is billed in advance or in arrear.
    BillingMode {
        /// Billed at the start of the period.
        InAdvance => "IN_ADVANCE",
        /// Billed at the end of the period.
        InArrear => "IN_ARREAR",
    }
}

wire_enum! {
    /// How tiered block prices are applied.
    TierBlockPolicy {
        /// Each tier prices its own slice.
        AllTiers => "ALL_TIERS",
        /// The highest reached tier prices everything.
        TopTier => "TOP_TIER",
    }
}

wire_enum! {
    /// Kind of dry-run invoice.
    DryRunType {
        /// Invoice as of a target date.
        TargetDate => "TARGET_DATE",
        /// Next upcoming invoice.
        UpcomingInvoice => "UPCOMING_INVOICE",
        /// Invoice resulting from a subscription action.
        SubscriptionAction => "SUBSCRIPTION_ACTION",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(AuditLevel::Full.to_string(), "FULL");
        assert_eq!(ProductCategory::AddOn.to_string(), "ADD_ON");
        assert_eq!(BillingActionPolicy::EndOfTerm.to_string(), "END_OF_TERM");
        assert_eq!(PhaseType::FixedTerm.as_str(), "FIXEDTERM");
    }

    #[test]
    fn serde_matches_display() {
        let json = serde_json::to_string(&TransactionStatus::PaymentFailure).unwrap();
        assert_eq!(json, "\"PAYMENT_FAILURE\"");
        let back: BillingPeriod = serde_json::from_str("\"THIRTY_ONE_DAYS\"").unwrap();
        assert_eq!(back, BillingPeriod::ThirtyOneDays);
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert_eq!("IN_ARREAR".parse::<BillingMode>().unwrap(), BillingMode::InArrear);
        let err = "SOMETIMES".parse::<BillingMode>().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownVariant {
                kind: "BillingMode",
                value: "SOMETIMES".to_string(),
            }
        );
    }

    #[test]
    fn audit_level_defaults_to_none() {
        assert_eq!(AuditLevel::default(), AuditLevel::None);
    }
}
