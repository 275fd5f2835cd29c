/// The JSON body every submission request is answered with.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SubmissionResponse {
    Accepted {
        success: bool,
        message: String,
        #[serde(rename = "itemId")]
        item_id: String,
    },
    Rejected {
        success: bool,
        error: String,
    },
}

impl SubmissionResponse {
    pub fn accepted(item_id: String) -> Self {
        Self::Accepted {
            success: true,
            message: "Form submitted successfully".into(),
            item_id,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            success: false,
            error: error.into(),
        }
    }
}
