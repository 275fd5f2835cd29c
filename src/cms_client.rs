use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

use crate::domain::FormSubmission;

use self::webflow::CreatedItemBody;

/// The collection a new item is written to, and the credential allowed to write it.
#[derive(Debug)]
pub struct CollectionTarget {
    pub api_token: Secret<String>,
    pub collection_id: String,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CmsItemPayload {
    pub field_data: FieldData,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<FormSubmission> for CmsItemPayload {
    fn from(submission: FormSubmission) -> Self {
        Self {
            field_data: FieldData {
                name: submission.name,
                email: submission.email,
                phone: submission.phone,
                message: submission.message,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedItem {
    pub id: String,
}

#[derive(thiserror::Error, Debug)]
pub enum CmsError {
    #[error("Webflow API error: {} - {body}", .status.as_u16())]
    Upstream { status: StatusCode, body: String },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait CmsClient: Send + Sync {
    async fn create_item(
        &self,
        target: &CollectionTarget,
        item: &CmsItemPayload,
    ) -> Result<CreatedItem, CmsError>;
}

#[derive(Clone, Debug)]
pub struct WebflowClient {
    http_client: Client,
    base_url: String,
}

impl WebflowClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
        }
    }
}

// curl --request POST \
// --url https://api.webflow.com/v2/collections/$COLLECTION_ID/items \
// --header "Authorization: Bearer $WEBFLOW_API_TOKEN" \
// --header 'accept: application/json' \
// --header 'content-type: application/json' \
// --data '{"fieldData": {"name": "Ann", "email": "a@x.com", "phone": "", "message": ""}}'
#[async_trait]
impl CmsClient for WebflowClient {
    #[tracing::instrument(
        name = "Creating Webflow CMS item",
        skip(self, target, item),
        fields(collection_id = %target.collection_id)
    )]
    async fn create_item(
        &self,
        target: &CollectionTarget,
        item: &CmsItemPayload,
    ) -> Result<CreatedItem, CmsError> {
        let url = format!(
            "{}/collections/{}/items",
            self.base_url.trim_end_matches('/'),
            target.collection_id
        );

        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", target.api_token.expose_secret()),
            )
            .header("accept", "application/json")
            .json(item)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = webflow::error_body(&response.text().await.unwrap_or_default());
            tracing::error!(%status, %body, "Webflow API error");
            return Err(CmsError::Upstream { status, body });
        }

        let CreatedItemBody { id } = response.json().await?;
        tracing::info!(item_id = %id, "Webflow CMS item created");

        Ok(CreatedItem { id })
    }
}

mod webflow {
    #[derive(serde::Deserialize, Debug)]
    pub struct CreatedItemBody {
        pub id: String,
    }

    /// Compact JSON when the body parses, the raw text otherwise.
    pub fn error_body(raw: &str) -> String {
        serde_json::from_str::<serde_json::Value>(raw)
            .map(|value| value.to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}
