//! Tags and custom fields attached to accounts, bundles, subscriptions,
//! invoices, payments and payment methods.
//!
//! Every such resource exposes the same `tags` and `customFields`
//! sub-resources, so one generic API serves them all. The id type selects
//! the resource: `MetadataApi<AccountId>` talks to `/accounts/{id}/tags`.
//! Payment methods carry custom fields but no tags.

use std::fmt::Display;
use std::marker::PhantomData;

use killbill_model::{
    AccountId, AuditLevel, BundleId, CustomField, CustomFieldId, InvoiceId, PaymentId,
    PaymentMethodId, SubscriptionId, Tag, TagDefinitionId,
};

use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::QueryParams;

/// A resource that carries custom fields.
pub trait CustomFieldResource: Display + Copy + Send + Sync {
    /// Collection path of the resource.
    const PATH: &'static str;
}

/// A resource that also carries tags.
pub trait TaggableResource: CustomFieldResource {}

macro_rules! metadata_resource {
    ($id:ty, $path:expr, taggable) => {
        metadata_resource!($id, $path);
        impl TaggableResource for $id {}
    };
    ($id:ty, $path:expr) => {
        impl CustomFieldResource for $id {
            const PATH: &'static str = $path;
        }
    };
}

metadata_resource!(AccountId, super::ACCOUNTS, taggable);
metadata_resource!(BundleId, super::BUNDLES, taggable);
metadata_resource!(SubscriptionId, super::SUBSCRIPTIONS, taggable);
metadata_resource!(InvoiceId, super::INVOICES, taggable);
metadata_resource!(PaymentId, super::PAYMENTS, taggable);
metadata_resource!(PaymentMethodId, super::PAYMENT_METHODS);

/// Tags and custom fields of one kind of resource.
#[derive(Debug, Clone)]
pub struct MetadataApi<Id> {
    http: KillBillHttpClient,
    resource: PhantomData<fn() -> Id>,
}

impl<Id: CustomFieldResource> MetadataApi<Id> {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self {
            http,
            resource: PhantomData,
        }
    }

    fn path(id: Id, sub: &str) -> String {
        format!("{}/{id}/{sub}", Id::PATH)
    }

    /// Custom fields of an object; an unknown object has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_custom_fields(
        &self,
        id: Id,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<CustomField>, ClientError> {
        self.http
            .get(Self::path(id, "customFields"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Attach custom fields and return the object's fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn create_custom_fields(
        &self,
        id: Id,
        fields: &[CustomField],
        opts: &RequestOptions,
    ) -> Result<Vec<CustomField>, ClientError> {
        opts.require_created_by("create_custom_fields")?;
        self.http
            .post(Self::path(id, "customFields"))
            .json(fields)?
            .follow_location()
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Update the values of existing custom fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// when a field has no id, or an error if the request fails.
    pub async fn modify_custom_fields(
        &self,
        id: Id,
        fields: &[CustomField],
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("modify_custom_fields")?;
        if fields.iter().any(|f| f.custom_field_id.is_none()) {
            return Err(ClientError::MissingParameter {
                parameter: "customFieldId",
                operation: "modify_custom_fields",
            });
        }
        self.http
            .put(Self::path(id, "customFields"))
            .json(fields)?
            .send_unit(opts)
            .await
    }

    /// Remove custom fields; an empty list removes all of them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_custom_fields(
        &self,
        id: Id,
        field_ids: &[CustomFieldId],
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_custom_fields")?;
        self.http
            .delete(Self::path(id, "customFields"))
            .query(QueryParams::new().with_all("customField", field_ids))
            .send_unit(opts)
            .await
    }
}

impl<Id: TaggableResource> MetadataApi<Id> {
    /// Tags of an object; an unknown object has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_tags(
        &self,
        id: Id,
        included_deleted: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Tag>, ClientError> {
        self.http
            .get(Self::path(id, "tags"))
            .query(
                QueryParams::new()
                    .with("includedDeleted", included_deleted)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Tag an object and return its tags.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn create_tags(
        &self,
        id: Id,
        tag_definitions: &[TagDefinitionId],
        opts: &RequestOptions,
    ) -> Result<Vec<Tag>, ClientError> {
        opts.require_created_by("create_tags")?;
        self.http
            .post(Self::path(id, "tags"))
            .json(tag_definitions)?
            .follow_location()
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Remove tags from an object.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_tags(
        &self,
        id: Id,
        tag_definitions: &[TagDefinitionId],
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_tags")?;
        self.http
            .delete(Self::path(id, "tags"))
            .query(QueryParams::new().with_all("tagDef", tag_definitions))
            .send_unit(opts)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_resource() {
        let id = InvoiceId::generate();
        assert_eq!(
            MetadataApi::<InvoiceId>::path(id, "tags"),
            format!("/1.0/kb/invoices/{id}/tags")
        );
        let pm = PaymentMethodId::generate();
        assert_eq!(
            MetadataApi::<PaymentMethodId>::path(pm, "customFields"),
            format!("/1.0/kb/paymentMethods/{pm}/customFields")
        );
    }
}
