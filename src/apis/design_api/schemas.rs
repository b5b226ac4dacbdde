use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request body of POST /api/design. Every field is optional at the parsing
// layer so that missing fields surface as validation errors, not parse errors.
#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub image_base64: Option<String>,            // Data URI of the room photo.
    pub style: Option<String>,
    pub additional_preferences: Option<String>,
    pub image_description: Option<String>,       // Room type, e.g. "living room".
    pub design_prompt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    pub design_suggestions: String,              // Markdown text.
    pub generated_image_urls: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_base64: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StyleOption {
    pub value: String,
    pub label: String,
}

// Styles offered by the form's style selector.
pub const DESIGN_STYLES: [&str; 10] = [
    "modern",
    "farmhouse",
    "vintage",
    "scandinavian",
    "bohemian",
    "industrial",
    "minimalist",
    "coastal",
    "mid-century",
    "contemporary",
];

pub fn style_options() -> Vec<StyleOption> {
    DESIGN_STYLES
        .iter()
        .map(|style| {
            let mut chars = style.chars();
            let label = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
            StyleOption { value: style.to_string(), label }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: DesignRequest = serde_json::from_str(
            r#"{"imageBase64":"data:image/png;base64,AA","style":"modern","imageDescription":"kitchen"}"#,
        ).unwrap();
        assert_eq!(request.image_base64.as_deref(), Some("data:image/png;base64,AA"));
        assert_eq!(request.image_description.as_deref(), Some("kitchen"));
        assert!(request.additional_preferences.is_none());
    }

    #[test]
    fn test_style_labels() {
        let options = style_options();
        assert_eq!(options.len(), 10);
        assert_eq!(options[0], StyleOption { value: "modern".into(), label: "Modern".into() });
        assert_eq!(options[8].label, "Mid-century");
    }
}
