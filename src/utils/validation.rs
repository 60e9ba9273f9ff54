use crate::domain::model::{Site, PAGE_PLACEHOLDER};
use crate::utils::error::{Result, ScrapeError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// A template must carry the page placeholder and be a valid http(s) URL once filled in.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains(PAGE_PLACEHOLDER) {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("URL template must contain the {} placeholder", PAGE_PLACEHOLDER),
        });
    }

    let sample = template.replace(PAGE_PLACEHOLDER, "1");
    validate_url(field_name, &sample).map_err(|e| match e {
        ScrapeError::InvalidConfigValueError { field, reason, .. } => {
            ScrapeError::InvalidConfigValueError {
                field,
                value: template.to_string(),
                reason,
            }
        }
        other => other,
    })
}

pub fn validate_sites(field_name: &str, sites: &[Site]) -> Result<()> {
    if sites.is_empty() {
        return Err(ScrapeError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (idx, site) in sites.iter().enumerate() {
        validate_non_empty_string(&format!("{}[{}].name", field_name, idx), &site.name)?;
        if !seen.insert(site.name.as_str()) {
            return Err(ScrapeError::InvalidConfigValueError {
                field: format!("{}[{}].name", field_name, idx),
                value: site.name.clone(),
                reason: "Site names must be unique".to_string(),
            });
        }
        validate_url_template(
            &format!("{}[{}].url_template", field_name, idx),
            &site.url_template,
        )?;
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("site", "https://example.com").is_ok());
        assert!(validate_url("site", "http://example.com").is_ok());
        assert!(validate_url("site", "").is_err());
        assert!(validate_url("site", "invalid-url").is_err());
        assert!(validate_url("site", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_url_template_requires_placeholder() {
        assert!(validate_url_template("t", "https://example.com/list?page={page}").is_ok());

        let err = validate_url_template("t", "https://example.com/list").unwrap_err();
        assert!(err.to_string().contains("{page}"));

        assert!(validate_url_template("t", "ftp://example.com/{page}").is_err());
    }

    #[test]
    fn test_validate_sites_rejects_duplicates_and_empty() {
        assert!(validate_sites("sites", &[]).is_err());

        let sites = vec![
            Site::new("A", "https://a.example/{page}"),
            Site::new("A", "https://b.example/{page}"),
        ];
        assert!(validate_sites("sites", &sites).is_err());

        let sites = vec![
            Site::new("A", "https://a.example/{page}"),
            Site::new("B", "https://b.example/{page}"),
        ];
        assert!(validate_sites("sites", &sites).is_ok());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("pages", 3, 1).is_ok());
        assert!(validate_positive_number("pages", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("start_page", 1usize, 1, 10).is_ok());
        assert!(validate_range("start_page", 10usize, 1, 10).is_ok());
        assert!(validate_range("start_page", 0usize, 1, 10).is_err());
        assert!(validate_range("start_page", usize::MAX, 1, 10).is_err());
    }
}
