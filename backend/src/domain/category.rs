//! Article categories. The name is the join key used by
//! `Article::category` and reader preferences.

use serde_json::json;

use super::{CategoryId, Error};

/// A named category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

/// Unvalidated category fields as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryInput {
    /// Validate and build a new category. Names are not deduplicated.
    pub fn into_category(self) -> Result<Category, Error> {
        let name = self
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::invalid_request("name is required")
                    .with_details(json!({ "field": "name", "code": "missing_field" }))
            })?;
        Ok(Category {
            id: CategoryId::random(),
            name,
            description: self.description.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn description_defaults_to_empty() {
        let category = CategoryInput {
            name: Some("Sports".to_owned()),
            description: None,
        }
        .into_category()
        .expect("valid category");
        assert_eq!(category.name, "Sports");
        assert_eq!(category.description, "");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    fn name_is_required(#[case] name: Option<&str>) {
        let result = CategoryInput {
            name: name.map(str::to_owned),
            description: Some("x".to_owned()),
        }
        .into_category();
        assert!(result.is_err());
    }
}
