//! Fixed category/subcategory taxonomy offered during review.
//!
//! Labels stay free text on the record; the taxonomy only drives the option
//! lists and flags labels that fall outside it.

use serde::{Deserialize, Serialize};

/// Top-level review categories, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Finance,
    Food,
    Giving,
    Living,
    Medical,
    Misc,
    Recreation,
    Supplies,
    Transportation,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Finance,
        Category::Food,
        Category::Giving,
        Category::Living,
        Category::Medical,
        Category::Misc,
        Category::Recreation,
        Category::Supplies,
        Category::Transportation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Finance => "Finance",
            Category::Food => "Food",
            Category::Giving => "Giving",
            Category::Living => "Living",
            Category::Medical => "Medical",
            Category::Misc => "Misc",
            Category::Recreation => "Recreation",
            Category::Supplies => "Supplies",
            Category::Transportation => "Transportation",
        }
    }

    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            Category::Finance => &["Banking", "Insurance", "Investment", "Job", "Misc", "Taxes"],
            Category::Food => &["Coffee", "Groceries", "Meal", "Snack"],
            Category::Giving => &["Church", "Donation", "Gift"],
            Category::Living => &["Fitness", "Lodging", "Phone", "Rent", "Utilities"],
            Category::Medical => &["Medical"],
            Category::Misc => &["Misc"],
            Category::Recreation => &["Concerts", "Drinks", "Misc", "Movies", "Video Games"],
            Category::Supplies => &[
                "Cabinet",
                "Skincare",
                "Clothes",
                "Beauty",
                "Furniture",
                "Misc",
                "Shoes",
                "Tech",
                "Appliances",
            ],
            Category::Transportation => &[
                "Bus",
                "Flight",
                "Gas",
                "Misc",
                "Parking",
                "Public",
                "Rental",
                "Rideshare",
                "Train",
            ],
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<Category> {
        let name = name.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    fn subcategory(&self, name: &str) -> Option<&'static str> {
        let name = name.trim();
        self.subcategories()
            .iter()
            .copied()
            .find(|s| s.eq_ignore_ascii_case(name))
    }
}

/// One subcategory choice, tagged with the category it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubcategoryOption {
    pub subcategory: &'static str,
    pub category: Category,
}

/// Category names in display order.
pub fn categories() -> Vec<&'static str> {
    Category::ALL.iter().map(Category::name).collect()
}

/// Subcategory choices for a category.
///
/// With no category, or one outside the taxonomy, every subcategory is
/// offered, each paired with its category (names like "Misc" repeat).
pub fn subcategories(category: Option<&str>) -> Vec<SubcategoryOption> {
    match category.and_then(Category::from_name) {
        Some(cat) => options_for(cat).collect(),
        None => Category::ALL.into_iter().flat_map(options_for).collect(),
    }
}

fn options_for(category: Category) -> impl Iterator<Item = SubcategoryOption> {
    category
        .subcategories()
        .iter()
        .map(move |&subcategory| SubcategoryOption { subcategory, category })
}

/// Type-ahead filter: keep options containing `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_options<'a>(options: &[&'a str], query: &str) -> Vec<&'a str> {
    let q = query.trim().to_lowercase();
    options
        .iter()
        .copied()
        .filter(|o| q.is_empty() || o.to_lowercase().contains(&q))
        .collect()
}

/// How a record's labels relate to the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelCheck {
    /// Both labels blank
    Unlabeled,
    /// Known category; subcategory blank or belonging to it
    Valid,
    UnknownCategory { category: String },
    SubcategoryMismatch { category: String, subcategory: String },
}

impl LabelCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, LabelCheck::Unlabeled | LabelCheck::Valid)
    }
}

/// Check a category/subcategory pair against the taxonomy.
///
/// A subcategory with no category is accepted when some category owns it,
/// since review allows picking the subcategory first.
pub fn check(category: &str, subcategory: &str) -> LabelCheck {
    let (category, subcategory) = (category.trim(), subcategory.trim());

    if category.is_empty() {
        if subcategory.is_empty() {
            return LabelCheck::Unlabeled;
        }
        let known = Category::ALL.iter().any(|c| c.subcategory(subcategory).is_some());
        return if known {
            LabelCheck::Valid
        } else {
            LabelCheck::SubcategoryMismatch {
                category: String::new(),
                subcategory: subcategory.to_string(),
            }
        };
    }

    let Some(cat) = Category::from_name(category) else {
        return LabelCheck::UnknownCategory {
            category: category.to_string(),
        };
    };

    if subcategory.is_empty() || cat.subcategory(subcategory).is_some() {
        LabelCheck::Valid
    } else {
        LabelCheck::SubcategoryMismatch {
            category: cat.name().to_string(),
            subcategory: subcategory.to_string(),
        }
    }
}

/// The category that owns `subcategory`, when exactly one does.
///
/// Names shared across categories ("Misc") resolve to `None`.
pub fn owning_category(subcategory: &str) -> Option<Category> {
    let mut owners = Category::ALL
        .into_iter()
        .filter(|c| c.subcategory(subcategory).is_some());
    let owner = owners.next()?;
    owners.next().is_none().then_some(owner)
}
