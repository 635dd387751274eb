// Draft validation for create and update
// Collects every violation instead of stopping at the first one, so the
// combined message names all missing or malformed fields at once.

use crate::catalog::AppDraft;
use crate::config::LimitsConfig;
use crate::error::{ApiError, ApiResult};

/// Logo content types accepted by the simulated upload check.
pub const ALLOWED_LOGO_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Validate a draft against the configured bounds. Returns all violations
/// aggregated into one error.
pub fn validate_draft(draft: &AppDraft, limits: &LimitsConfig) -> ApiResult<()> {
    let mut violations = Vec::new();

    if draft.name.trim().is_empty() {
        violations.push("App Name is required.".to_string());
    }
    if draft.description.trim().is_empty() {
        violations.push("Description is required.".to_string());
    }
    if draft.price.trim().is_empty() {
        violations.push("Price is required.".to_string());
    }
    if !is_valid_url(draft.apk_link.trim()) {
        violations.push("Invalid URL for APK link.".to_string());
    }
    if !is_valid_url(draft.ios_link.trim()) {
        violations.push("Invalid URL for iOS link.".to_string());
    }

    if let Some(upload) = &draft.logo_upload {
        if upload.size_bytes > 0 {
            if !ALLOWED_LOGO_TYPES.contains(&upload.content_type.as_str()) {
                violations.push(
                    "Invalid logo file type. Please upload a JPG, PNG, GIF, or WEBP image."
                        .to_string(),
                );
            }
            if upload.size_bytes > limits.max_logo_bytes {
                violations.push(format!(
                    "Logo file size exceeds limit ({}MB).",
                    limits.max_logo_bytes / (1024 * 1024)
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations))
    }
}

/// Minimal well-formedness check for a link field. Empty is allowed; a
/// non-empty value needs a scheme and a non-empty remainder.
pub fn is_valid_url(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    match s.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
                && !rest.is_empty()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AppDraft, LogoUpload};

    #[test]
    fn test_url_check() {
        assert!(is_valid_url(""));
        assert!(is_valid_url("https://example.com/app.apk"));
        assert!(is_valid_url("ftp://host/file"));
        assert!(!is_valid_url("#"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("://missing-scheme"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let draft = AppDraft {
            name: "".to_string(),
            description: "  ".to_string(),
            price: "".to_string(),
            ..AppDraft::default()
        };
        let err = validate_draft(&draft, &LimitsConfig::default()).unwrap_err();
        match err {
            crate::error::ApiError::Validation(violations) => {
                assert_eq!(violations.len(), 3);
                assert!(violations.contains(&"App Name is required.".to_string()));
                assert!(violations.contains(&"Description is required.".to_string()));
                assert!(violations.contains(&"Price is required.".to_string()));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_logo_upload_rules() {
        let mut draft = AppDraft {
            name: "App".to_string(),
            description: "Desc".to_string(),
            price: "Free".to_string(),
            ..AppDraft::default()
        };

        draft.logo_upload = Some(LogoUpload {
            file_name: "logo.bmp".to_string(),
            content_type: "image/bmp".to_string(),
            size_bytes: 1024,
        });
        assert!(validate_draft(&draft, &LimitsConfig::default()).is_err());

        draft.logo_upload = Some(LogoUpload {
            file_name: "logo.png".to_string(),
            content_type: "image/png".to_string(),
            size_bytes: 3 * 1024 * 1024,
        });
        assert!(validate_draft(&draft, &LimitsConfig::default()).is_err());

        draft.logo_upload = Some(LogoUpload {
            file_name: "logo.png".to_string(),
            content_type: "image/png".to_string(),
            size_bytes: 100 * 1024,
        });
        assert!(validate_draft(&draft, &LimitsConfig::default()).is_ok());

        // A zero-byte upload is treated as no upload at all
        draft.logo_upload = Some(LogoUpload {
            file_name: "empty.bmp".to_string(),
            content_type: "image/bmp".to_string(),
            size_bytes: 0,
        });
        assert!(validate_draft(&draft, &LimitsConfig::default()).is_ok());
    }
}
