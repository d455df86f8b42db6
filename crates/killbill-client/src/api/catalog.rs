//! Catalog retrieval and upload.

use chrono::NaiveDate;
use killbill_model::{AccountId, Catalog, PlanDetail};

use super::CATALOG;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::QueryParams;

const TEXT_XML: &str = "text/xml";

/// Catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: KillBillHttpClient,
}

impl CatalogApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Catalog versions in effect, as JSON. One entry per version unless
    /// `requested_date` selects a single one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_catalog_json(
        &self,
        requested_date: Option<NaiveDate>,
        account_id: Option<AccountId>,
        opts: &RequestOptions,
    ) -> Result<Vec<Catalog>, ClientError> {
        self.http
            .get(CATALOG)
            .query(
                QueryParams::new()
                    .with_date("requestedDate", requested_date)
                    .with_opt("accountId", account_id),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// The catalog as uploaded, in XML.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_catalog_xml(
        &self,
        requested_date: Option<NaiveDate>,
        account_id: Option<AccountId>,
        opts: &RequestOptions,
    ) -> Result<Option<String>, ClientError> {
        self.http
            .get(format!("{CATALOG}/xml"))
            .query(
                QueryParams::new()
                    .with_date("requestedDate", requested_date)
                    .with_opt("accountId", account_id),
            )
            .accept(TEXT_XML)
            .send_text(opts)
            .await
    }

    /// Upload a new catalog version.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn upload_catalog_xml(
        &self,
        catalog_xml: impl Into<String>,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("upload_catalog_xml")?;
        self.http
            .post(format!("{CATALOG}/xml"))
            .text(TEXT_XML, catalog_xml)
            .send_unit(opts)
            .await
    }

    /// Delete every catalog version of the tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_catalog(&self, opts: &RequestOptions) -> Result<(), ClientError> {
        opts.require_created_by("delete_catalog")?;
        self.http.delete(CATALOG).send_unit(opts).await
    }

    /// Add-on plans available for a base product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_available_addons(
        &self,
        base_product_name: Option<&str>,
        price_list_name: Option<&str>,
        account_id: Option<AccountId>,
        opts: &RequestOptions,
    ) -> Result<Vec<PlanDetail>, ClientError> {
        self.http
            .get(format!("{CATALOG}/availableAddons"))
            .query(
                QueryParams::new()
                    .with_opt("baseProductName", base_product_name)
                    .with_opt("priceListName", price_list_name)
                    .with_opt("accountId", account_id),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Base plans available for new subscriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_available_base_plans(
        &self,
        account_id: Option<AccountId>,
        opts: &RequestOptions,
    ) -> Result<Vec<PlanDetail>, ClientError> {
        self.http
            .get(format!("{CATALOG}/availableBasePlans"))
            .query(QueryParams::new().with_opt("accountId", account_id))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }
}
