//! Category types and the tree groupings built from the flat catalog list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wildflower_core::CategoryId;

use crate::wire::RawCategory;

// =============================================================================
// Category
// =============================================================================

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Parent category; `None` for top-level categories.
    pub parent_id: Option<CategoryId>,
    /// Display name (may be empty for malformed records).
    pub name: String,
    /// Banner image URL, when set.
    pub image: Option<String>,
}

impl Category {
    /// Builds a category from its raw record, defaulting missing fields.
    #[must_use]
    pub fn from_raw(raw: &RawCategory) -> Self {
        let description = raw.description.clone().unwrap_or_default();
        Self {
            id: CategoryId::new(raw.id.unwrap_or(0)),
            parent_id: raw.parent_id.map(CategoryId::new),
            name: description.name.unwrap_or_default(),
            image: description.image.filter(|url| !url.is_empty()),
        }
    }
}

// =============================================================================
// Tree Groupings
// =============================================================================

/// A top-level category together with its direct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBranch {
    /// The parent category.
    pub category: Category,
    /// Direct children, in input order. Always non-empty.
    pub children: Vec<Category>,
}

/// A category with its direct children attached when it has any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// The category itself.
    pub category: Category,
    /// Direct children, or `None` for leaves.
    pub sub_categories: Option<Vec<Category>>,
}

/// The four groupings different storefront surfaces consume.
///
/// Categories referencing a parent that is not in the input (orphans) appear
/// in no parent grouping; they still show up in [`Self::all_with_sub`]. A
/// category naming itself as its own parent lists itself as its only child
/// once, it does not recurse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    /// Top-level categories that have at least one child.
    pub parents_with_children: Vec<CategoryBranch>,
    /// Top-level categories with no children.
    pub parents_without_children: Vec<Category>,
    /// Every top-level category, children attached where present.
    pub all_parents: Vec<CategoryNode>,
    /// Every category in the input, children attached where present.
    pub all_with_sub: Vec<CategoryNode>,
}

/// Organizes a flat category list into the tree groupings.
///
/// Single pass to index children by parent, then one pass per grouping; all
/// groupings preserve input order.
#[must_use]
pub fn organize(categories: &[Category]) -> CategoryTree {
    let mut children_by_parent: HashMap<CategoryId, Vec<Category>> = HashMap::new();
    for category in categories {
        if let Some(parent_id) = category.parent_id {
            children_by_parent
                .entry(parent_id)
                .or_default()
                .push(category.clone());
        }
    }

    let mut tree = CategoryTree::default();

    for category in categories.iter().filter(|c| c.parent_id.is_none()) {
        let children = children_by_parent.get(&category.id).cloned();
        tree.all_parents.push(CategoryNode {
            category: category.clone(),
            sub_categories: children.clone(),
        });
        match children {
            Some(children) => tree.parents_with_children.push(CategoryBranch {
                category: category.clone(),
                children,
            }),
            None => tree.parents_without_children.push(category.clone()),
        }
    }

    for category in categories {
        tree.all_with_sub.push(CategoryNode {
            category: category.clone(),
            sub_categories: children_by_parent.get(&category.id).cloned(),
        });
    }

    tree
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wire::RawCategoryDescription;

    fn category(id: i64, parent_id: Option<i64>, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            parent_id: parent_id.map(CategoryId::new),
            name: name.to_owned(),
            image: None,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_tree() {
        let tree = organize(&[]);
        assert!(tree.parents_with_children.is_empty());
        assert!(tree.parents_without_children.is_empty());
        assert!(tree.all_parents.is_empty());
        assert!(tree.all_with_sub.is_empty());
    }

    #[test]
    fn test_parents_partition_by_having_children() {
        let input = vec![
            category(1, None, "Shoes"),
            category(2, Some(1), "Trail"),
            category(3, Some(1), "Road"),
            category(4, None, "Gift Cards"),
        ];
        let tree = organize(&input);

        assert_eq!(tree.parents_with_children.len(), 1);
        let branch = &tree.parents_with_children[0];
        assert_eq!(branch.category.name, "Shoes");
        assert_eq!(branch.children.len(), 2);
        assert_eq!(branch.children[0].name, "Trail");
        assert_eq!(branch.children[1].name, "Road");

        assert_eq!(tree.parents_without_children.len(), 1);
        assert_eq!(tree.parents_without_children[0].name, "Gift Cards");

        assert_eq!(tree.all_parents.len(), 2);
        assert!(tree.all_parents[0].sub_categories.is_some());
        assert!(tree.all_parents[1].sub_categories.is_none());
    }

    #[test]
    fn test_orphan_appears_only_in_all_with_sub() {
        let input = vec![category(1, None, "Shoes"), category(9, Some(404), "Lost")];
        let tree = organize(&input);

        assert!(tree.parents_with_children.is_empty());
        assert_eq!(tree.parents_without_children.len(), 1);
        assert_eq!(tree.all_with_sub.len(), 2);
        assert_eq!(tree.all_with_sub[1].category.name, "Lost");
        assert!(tree.all_with_sub[1].sub_categories.is_none());
    }

    #[test]
    fn test_nested_category_keeps_its_children_in_all_with_sub() {
        let input = vec![
            category(1, None, "Shoes"),
            category(2, Some(1), "Trail"),
            category(3, Some(2), "Winter Trail"),
        ];
        let tree = organize(&input);

        let trail = tree
            .all_with_sub
            .iter()
            .find(|node| node.category.id == CategoryId::new(2))
            .unwrap();
        assert_eq!(
            trail.sub_categories.as_deref().map(|c| c.len()),
            Some(1)
        );
    }

    #[test]
    fn test_self_referential_category_lists_itself_once() {
        let input = vec![category(5, Some(5), "Loop")];
        let tree = organize(&input);

        assert!(tree.parents_with_children.is_empty());
        assert_eq!(tree.all_with_sub.len(), 1);
        let children = tree.all_with_sub[0].sub_categories.as_deref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, CategoryId::new(5));
    }

    #[test]
    fn test_from_raw_defaults_missing_fields() {
        let sparse = Category::from_raw(&RawCategory::default());
        assert_eq!(sparse.id, CategoryId::new(0));
        assert_eq!(sparse.parent_id, None);
        assert_eq!(sparse.name, "");
        assert_eq!(sparse.image, None);

        let raw = RawCategory {
            id: Some(3),
            parent_id: Some(1),
            description: Some(RawCategoryDescription {
                name: Some("Trail".to_owned()),
                image: Some(String::new()),
            }),
        };
        let full = Category::from_raw(&raw);
        assert_eq!(full.id, CategoryId::new(3));
        assert_eq!(full.parent_id, Some(CategoryId::new(1)));
        assert_eq!(full.image, None);
    }
}
