/// The body of a contact form post. Every field is optional on the wire;
/// `TryFrom` decides what is required.
#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum BodyParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UrlEncoded(#[from] serde_urlencoded::de::Error),
}

impl SubmissionFormData {
    /// Reads an HTML form post when `content_type` is urlencoded, JSON otherwise.
    /// An empty body, or JSON that is not an object, is read as an empty form.
    pub fn parse(content_type: &str, body: &[u8]) -> Result<Self, BodyParseError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        if content_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            return Ok(serde_urlencoded::from_bytes(body)?);
        }

        match serde_json::from_slice::<serde_json::Value>(body)? {
            value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl TryFrom<SubmissionFormData> for FormSubmission {
    type Error = String;

    fn try_from(value: SubmissionFormData) -> Result<Self, Self::Error> {
        let required = |field: Option<String>| field.filter(|value| !value.is_empty());

        match (required(value.name), required(value.email)) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                phone: value.phone.unwrap_or_default(),
                message: value.message.unwrap_or_default(),
            }),
            _ => Err("Name and email are required fields".into()),
        }
    }
}
