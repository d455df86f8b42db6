//! Tag definitions.

use killbill_model::{AuditLevel, TagDefinition, TagDefinitionId};

use super::TAG_DEFINITIONS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::QueryParams;

/// Tag definition operations.
#[derive(Debug, Clone)]
pub struct TagDefinitionApi {
    http: KillBillHttpClient,
}

impl TagDefinitionApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Every tag definition, control tags included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_tag_definitions(
        &self,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<TagDefinition>, ClientError> {
        self.http
            .get(TAG_DEFINITIONS)
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Get a tag definition by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_tag_definition(
        &self,
        id: TagDefinitionId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<TagDefinition>, ClientError> {
        self.http
            .get(format!("{TAG_DEFINITIONS}/{id}"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
    }

    /// Create a tag definition and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// name, or an error if the request fails.
    pub async fn create_tag_definition(
        &self,
        definition: &TagDefinition,
        opts: &RequestOptions,
    ) -> Result<TagDefinition, ClientError> {
        const OPERATION: &str = "create_tag_definition";
        opts.require_created_by(OPERATION)?;
        required(definition.name.as_deref(), "name", OPERATION)?;

        self.http
            .post(TAG_DEFINITIONS)
            .json(definition)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Delete a tag definition.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_tag_definition(
        &self,
        id: TagDefinitionId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_tag_definition")?;
        self.http
            .delete(format!("{TAG_DEFINITIONS}/{id}"))
            .send_unit(opts)
            .await
    }
}
